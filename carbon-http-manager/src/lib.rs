//! HTTP capability for carbon.
//!
//! Requests and responses are plain data so they can cross the core boundary;
//! the core decides what to fetch and the shell (or [`HttpManager`]) does it.

mod manager;
pub mod requests;

pub use manager::{HttpConfig, HttpManager};
pub use requests::{get, post};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpHeader {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<HttpHeader>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(HttpHeader {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<HttpHeader>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode a JSON body. Non-2xx statuses are reported as [`HttpError::Status`]
    /// without looking at the body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        if !self.is_success() {
            return Err(HttpError::Status(self.status));
        }
        serde_json::from_slice(&self.body).map_err(|err| HttpError::Body(err.to_string()))
    }
}

/// Why an HTTP exchange produced no usable response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum HttpError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request timed out after {0} ms")]
    Timeout(u64),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("unreadable body: {0}")]
    Body(String),
}

pub type HttpResult = Result<HttpResponse, HttpError>;
