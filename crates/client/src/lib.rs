//! Typed client for the library reservation backend.

pub mod api;
pub mod bulk;
pub mod error;
pub mod models;
pub mod payload;

pub use api::{HttpLibraryApi, LibraryApi};
pub use error::ClientError;
pub use models::{Book, RecordId, Reservation, ReservationLookup, ServerReply, User};
pub use payload::{MakeReservation, RemoveReservation, UpdateReservation};
