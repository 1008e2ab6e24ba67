//! HTTP access to the reservation backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::ClientError;
use crate::models::{Book, Reservation, ReservationLookup, ServerReply, User};
use crate::payload::{MakeReservation, RemoveReservation, UpdateReservation};

/// Endpoint paths exposed by the backend.
pub mod endpoints {
    pub const BOOKS: &str = "/api/books";
    pub const RESERVATIONS: &str = "/api/reservations";
    pub const USERS: &str = "/api/users";
    pub const MAKE_RESERVATION: &str = "/make_reservation";
    pub const UPDATE_RESERVATION: &str = "/update_reservation";
    pub const REMOVE_RESERVATION: &str = "/remove_reservation";
    pub const VIEW_RESERVATION: &str = "/view_reservation";
}

/// Operations the console needs from the backend.
#[async_trait]
pub trait LibraryApi: Send + Sync {
    async fn list_books(&self) -> Result<Vec<Book>, ClientError>;

    async fn list_reservations(&self) -> Result<Vec<Reservation>, ClientError>;

    async fn list_users(&self) -> Result<Vec<User>, ClientError>;

    async fn make_reservation(&self, body: &MakeReservation) -> Result<ServerReply, ClientError>;

    async fn update_reservation(
        &self,
        body: &UpdateReservation,
    ) -> Result<ServerReply, ClientError>;

    async fn remove_reservation(
        &self,
        body: &RemoveReservation,
    ) -> Result<ServerReply, ClientError>;

    async fn view_reservation(&self, reservation_id: &str)
        -> Result<ReservationLookup, ClientError>;
}

/// `LibraryApi` over plain HTTP/JSON.
#[derive(Clone)]
pub struct HttpLibraryApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLibraryApi {
    /// Build a client for the backend rooted at `base_url`.
    /// Every request gives up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let parsed = Url::parse(&base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url,
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ClientError::Transport {
                endpoint: base_url.clone(),
                source,
            })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, ClientError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| ClientError::InvalidBaseUrl {
            url: raw,
            reason: e.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        url: Url,
    ) -> Result<T, ClientError> {
        tracing::debug!(endpoint, "GET");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|source| ClientError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(ClientError::status(endpoint, status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|source| ClientError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    async fn get_list<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>, ClientError> {
        let url = self.endpoint_url(endpoint)?;
        let items: Vec<T> = self.get_json(endpoint, url).await?;
        tracing::debug!(endpoint, count = items.len(), "collection fetched");
        Ok(items)
    }

    /// POST a JSON body and read the `{message}`/`{error}` reply.
    ///
    /// A reply that decodes is returned whatever the status code; backends
    /// report business failures both ways.
    async fn post_form<B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<ServerReply, ClientError> {
        let url = self.endpoint_url(endpoint)?;
        tracing::debug!(endpoint, "POST");

        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|source| ClientError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

        match serde_json::from_str::<ServerReply>(&text) {
            Ok(reply) => {
                if !status.is_success() {
                    tracing::debug!(endpoint, status = status.as_u16(), "reply with error status");
                }
                Ok(reply)
            }
            Err(source) if status.is_success() => Err(ClientError::Decode {
                endpoint: endpoint.to_string(),
                source,
            }),
            Err(_) => Err(ClientError::status(endpoint, status.as_u16(), &text)),
        }
    }
}

#[async_trait]
impl LibraryApi for HttpLibraryApi {
    async fn list_books(&self) -> Result<Vec<Book>, ClientError> {
        self.get_list(endpoints::BOOKS).await
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>, ClientError> {
        self.get_list(endpoints::RESERVATIONS).await
    }

    async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.get_list(endpoints::USERS).await
    }

    async fn make_reservation(&self, body: &MakeReservation) -> Result<ServerReply, ClientError> {
        self.post_form(endpoints::MAKE_RESERVATION, body).await
    }

    async fn update_reservation(
        &self,
        body: &UpdateReservation,
    ) -> Result<ServerReply, ClientError> {
        self.post_form(endpoints::UPDATE_RESERVATION, body).await
    }

    async fn remove_reservation(
        &self,
        body: &RemoveReservation,
    ) -> Result<ServerReply, ClientError> {
        self.post_form(endpoints::REMOVE_RESERVATION, body).await
    }

    async fn view_reservation(
        &self,
        reservation_id: &str,
    ) -> Result<ReservationLookup, ClientError> {
        let endpoint = endpoints::VIEW_RESERVATION;
        let mut url = self.endpoint_url(endpoint)?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: "cannot append path segments".to_string(),
            })?
            .push(reservation_id);

        self.get_json(endpoint, url).await
    }
}
