//! The three reservation forms and the inputs they read.

use std::collections::HashMap;

use lectern_kernel::settings::UpdateVariant;
use serde::Deserialize;

/// Element ids of the form inputs.
pub mod input_ids {
    pub const BOOK_ID: &str = "book-id";
    pub const USER_ID: &str = "user-id";
    pub const RESERVATION_ID: &str = "reservation-id";
    pub const NEW_USER_ID: &str = "new-user-id";
    pub const UPDATE_BOOK_ID: &str = "update-book-id";
    pub const UPDATE_USER_ID: &str = "update-user-id";
    pub const REMOVE_BOOK_ID: &str = "remove-book-id";
    pub const REMOVE_USER_ID: &str = "remove-user-id";
}

/// Submitted input values keyed by element id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FormInputs(HashMap<String, String>);

impl FormInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: &str, value: impl Into<String>) -> Self {
        self.0.insert(id.to_string(), value.into());
        self
    }

    /// Value of the input with this id. An absent input reads as empty.
    pub fn value(&self, id: &str) -> String {
        self.0.get(id).cloned().unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormInputs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One of the three mutating forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Make,
    Update,
    Remove,
}

impl FormKind {
    pub const ALL: [FormKind; 3] = [FormKind::Make, FormKind::Update, FormKind::Remove];

    pub fn form_id(self) -> &'static str {
        match self {
            FormKind::Make => "make-reservation-form",
            FormKind::Update => "update-reservation-form",
            FormKind::Remove => "remove-reservation-form",
        }
    }

    /// Path the console page posts this form to.
    pub fn action_path(self) -> &'static str {
        match self {
            FormKind::Make => "/forms/make-reservation",
            FormKind::Update => "/forms/update-reservation",
            FormKind::Remove => "/forms/remove-reservation",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FormKind::Make => "Make reservation",
            FormKind::Update => "Update reservation",
            FormKind::Remove => "Remove reservation",
        }
    }

    /// Inputs the form renders and reads, as `(id, label)`.
    pub fn inputs(self, variant: UpdateVariant) -> [(&'static str, &'static str); 2] {
        use input_ids::*;

        match (self, variant) {
            (FormKind::Make, _) => [(BOOK_ID, "Book ID"), (USER_ID, "User ID")],
            (FormKind::Update, UpdateVariant::ReservationId) => [
                (RESERVATION_ID, "Reservation ID"),
                (NEW_USER_ID, "New user ID"),
            ],
            (FormKind::Update, UpdateVariant::BookUser) => {
                [(UPDATE_BOOK_ID, "Book ID"), (UPDATE_USER_ID, "User ID")]
            }
            (FormKind::Remove, _) => [(REMOVE_BOOK_ID, "Book ID"), (REMOVE_USER_ID, "User ID")],
        }
    }
}
