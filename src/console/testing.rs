//! In-memory backend for console and module tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lectern_client::{
    Book, ClientError, LibraryApi, MakeReservation, RecordId, RemoveReservation, Reservation,
    ReservationLookup, ServerReply, UpdateReservation, User,
};
use serde_json::Value;
use tokio::sync::{Notify, Semaphore};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Get(String),
    Post(String, Value),
}

/// Where a gated fake parks its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GatePoint {
    /// The first make-reservation call.
    Make,
    /// The first books listing issued after any form post.
    BooksAfterPost,
}

/// Holds one backend call until released.
pub(crate) struct Gate {
    pub entered: Notify,
    pub release: Semaphore,
}

impl Gate {
    fn closed() -> Self {
        Self {
            entered: Notify::new(),
            release: Semaphore::new(0),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeLibrary {
    books: Mutex<Vec<Book>>,
    reservations: Mutex<Vec<Reservation>>,
    users: Mutex<Vec<User>>,
    failing: Mutex<HashSet<String>>,
    fail_posts: Mutex<bool>,
    reply: Mutex<ServerReply>,
    calls: Mutex<Vec<Call>>,
    gate: Mutex<Option<(GatePoint, Arc<Gate>)>>,
}

impl FakeLibrary {
    pub fn stocked() -> Self {
        let library = Self::default();
        *library.books.lock().unwrap() = vec![
            Book {
                book_id: RecordId::Number(1),
                title: "Dune".into(),
                author: "Herbert".into(),
                genre: Some("SciFi".into()),
                published_year: Some(1965),
                available: Some(true),
            },
            Book {
                book_id: RecordId::Number(2),
                title: "Emma".into(),
                author: "Austen".into(),
                genre: Some("Romance".into()),
                published_year: Some(1815),
                available: Some(false),
            },
        ];
        *library.reservations.lock().unwrap() = vec![Reservation {
            reservation_id: "r-1".into(),
            book_id: RecordId::Number(2),
            user_id: RecordId::Number(5),
            reserved_at: Some("2024-03-01T14:05:09Z".into()),
        }];
        *library.users.lock().unwrap() = vec![User {
            user_id: RecordId::Number(5),
            name: "Ada".into(),
            email: "ada@example.org".into(),
        }];
        *library.reply.lock().unwrap() = ServerReply::message("ok");
        library
    }

    pub fn gated() -> (Self, Arc<Gate>) {
        Self::gated_at(GatePoint::Make)
    }

    /// Gate the refresh that follows a form post, after the reply is in.
    pub fn gated_after_post() -> (Self, Arc<Gate>) {
        Self::gated_at(GatePoint::BooksAfterPost)
    }

    fn gated_at(point: GatePoint) -> (Self, Arc<Gate>) {
        let library = Self::stocked();
        let gate = Arc::new(Gate::closed());
        *library.gate.lock().unwrap() = Some((point, gate.clone()));
        (library, gate)
    }

    async fn pass_gate(&self, point: GatePoint) {
        let gate = {
            let mut slot = self.gate.lock().unwrap();
            if matches!(slot.as_ref(), Some((at, _)) if *at == point) {
                slot.take().map(|(_, gate)| gate)
            } else {
                None
            }
        };
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.acquire().await.unwrap().forget();
        }
    }

    pub fn set_books(&self, books: Vec<Book>) {
        *self.books.lock().unwrap() = books;
    }

    pub fn fail_listing(&self, endpoint: &str) {
        self.failing.lock().unwrap().insert(endpoint.to_string());
    }

    pub fn fail_posts(&self) {
        *self.fail_posts.lock().unwrap() = true;
    }

    pub fn reply_with(&self, reply: ServerReply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn gets(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Get(path) => Some(path),
                Call::Post(..) => None,
            })
            .collect()
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Post(path, body) => Some((path, body)),
                Call::Get(_) => None,
            })
            .collect()
    }

    async fn list<T: Clone>(
        &self,
        endpoint: &str,
        items: &Mutex<Vec<T>>,
    ) -> Result<Vec<T>, ClientError> {
        if endpoint == "/api/books" && !self.posts().is_empty() {
            self.pass_gate(GatePoint::BooksAfterPost).await;
        }
        self.calls
            .lock()
            .unwrap()
            .push(Call::Get(endpoint.to_string()));
        if self.failing.lock().unwrap().contains(endpoint) {
            return Err(ClientError::Status {
                endpoint: endpoint.to_string(),
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(items.lock().unwrap().clone())
    }

    fn post(&self, endpoint: &str, body: Value) -> Result<ServerReply, ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Post(endpoint.to_string(), body));
        if *self.fail_posts.lock().unwrap() {
            return Err(ClientError::Status {
                endpoint: endpoint.to_string(),
                status: 502,
                body: "bad gateway".to_string(),
            });
        }
        Ok(self.reply.lock().unwrap().clone())
    }
}

#[async_trait]
impl LibraryApi for FakeLibrary {
    async fn list_books(&self) -> Result<Vec<Book>, ClientError> {
        self.list("/api/books", &self.books).await
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>, ClientError> {
        self.list("/api/reservations", &self.reservations).await
    }

    async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.list("/api/users", &self.users).await
    }

    async fn make_reservation(&self, body: &MakeReservation) -> Result<ServerReply, ClientError> {
        self.pass_gate(GatePoint::Make).await;
        self.post("/make_reservation", serde_json::to_value(body).unwrap())
    }

    async fn update_reservation(
        &self,
        body: &UpdateReservation,
    ) -> Result<ServerReply, ClientError> {
        self.post("/update_reservation", serde_json::to_value(body).unwrap())
    }

    async fn remove_reservation(
        &self,
        body: &RemoveReservation,
    ) -> Result<ServerReply, ClientError> {
        self.post("/remove_reservation", serde_json::to_value(body).unwrap())
    }

    async fn view_reservation(
        &self,
        reservation_id: &str,
    ) -> Result<ReservationLookup, ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Get(format!("/view_reservation/{reservation_id}")));
        let found = self
            .reservations
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.reservation_id.to_string() == reservation_id)
            .cloned();
        Ok(match found {
            Some(reservation) => ReservationLookup::Found(reservation),
            None => ReservationLookup::Missing {
                error: "Reservation not found.".to_string(),
            },
        })
    }
}
