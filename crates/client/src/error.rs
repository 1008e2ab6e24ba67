//! Errors raised while talking to the reservation backend.

use thiserror::Error;

/// Longest slice of an unexpected response body kept in an error.
const BODY_EXCERPT_LEN: usize = 200;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid backend url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("{endpoint} returned an unreadable body: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    pub(crate) fn status(endpoint: &str, status: u16, body: &str) -> Self {
        Self::Status {
            endpoint: endpoint.to_string(),
            status,
            body: excerpt(body),
        }
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_keeps_short_bodies_whole() {
        let err = ClientError::status("/api/books", 502, "  Bad Gateway\n");
        assert_eq!(err.to_string(), "/api/books returned HTTP 502: Bad Gateway");
    }

    #[test]
    fn status_error_truncates_long_bodies() {
        let body = "x".repeat(500);
        match ClientError::status("/api/users", 500, &body) {
            ClientError::Status { body, .. } => {
                assert_eq!(body.len(), BODY_EXCERPT_LEN + 3);
                assert!(body.ends_with("..."));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
