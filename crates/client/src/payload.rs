//! Request bodies for the mutating form endpoints.
//!
//! Values are carried exactly as typed into the form, so every field is a string.

use serde::Serialize;

/// Body of `POST /make_reservation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MakeReservation {
    pub book_id: String,
    pub user_id: String,
}

/// Body of `POST /remove_reservation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoveReservation {
    pub book_id: String,
    pub user_id: String,
}

/// Body of `POST /update_reservation`. Backends accept one of two shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UpdateReservation {
    /// Hand an existing reservation to another user.
    ByReservation {
        reservation_id: String,
        new_user_id: String,
    },
    /// Address the reservation by the book and user it links.
    ByBookAndUser { book_id: String, user_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn remove_body_sends_values_as_strings() {
        let body = RemoveReservation {
            book_id: "2".into(),
            user_id: "5".into(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"book_id": "2", "user_id": "5"})
        );
    }

    #[test]
    fn update_variants_serialize_to_their_own_shape() {
        let by_reservation = UpdateReservation::ByReservation {
            reservation_id: "r-1".into(),
            new_user_id: "9".into(),
        };
        assert_eq!(
            serde_json::to_value(&by_reservation).unwrap(),
            json!({"reservation_id": "r-1", "new_user_id": "9"})
        );

        let by_pair = UpdateReservation::ByBookAndUser {
            book_id: "b-1".into(),
            user_id: "3".into(),
        };
        assert_eq!(
            serde_json::to_value(&by_pair).unwrap(),
            json!({"book_id": "b-1", "user_id": "3"})
        );
    }
}
