use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier as the backend sends it: a bare number or an opaque string (UUIDs).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Text(String::new())
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

/// Unset columns come back as `null`; read them as the empty value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A book as listed by `GET /api/books`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub book_id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub published_year: Option<i64>,
    /// Only sent by newer backends.
    #[serde(default)]
    pub available: Option<bool>,
}

/// A reservation as listed by `GET /api/reservations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: RecordId,
    #[serde(deserialize_with = "null_as_default")]
    pub book_id: RecordId,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: RecordId,
    /// ISO-8601 or HTTP-date text, depending on the backend's JSON encoder.
    #[serde(default)]
    pub reserved_at: Option<String>,
}

/// A library user as listed by `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

/// Reply to any of the mutating form endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Set by `/make_reservation` on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<RecordId>,
}

impl ServerReply {
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            message: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            error: Some(text.into()),
            ..Self::default()
        }
    }

    /// Text to show the operator: the message if there is one, otherwise the error.
    /// Empty strings count as absent.
    pub fn alert_text(&self) -> Option<&str> {
        non_empty(&self.message).or_else(|| non_empty(&self.error))
    }

    pub fn is_error(&self) -> bool {
        let has_message = self.message.as_deref().is_some_and(|m| !m.is_empty());
        let has_error = self.error.as_deref().is_some_and(|e| !e.is_empty());
        !has_message && has_error
    }
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|s| !s.is_empty())
}

/// Reply to `GET /view_reservation/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReservationLookup {
    Found(Reservation),
    Missing { error: String },
}
