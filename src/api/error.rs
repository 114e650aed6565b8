//! Error types for talking to a books backend.

use crate::model::BookId;
use thiserror::Error;

/// Errors returned by any [`BooksApi`](super::BooksApi) implementation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The configured base URL cannot address the books collection.
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request never produced a response (connect, timeout, TLS...).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The addressed book does not exist on the backend.
    #[error("book not found: {0}")]
    NotFound(BookId),

    /// The in-process backend has shut down.
    #[error("books backend closed")]
    BackendClosed,

    /// The in-process backend dropped the request without answering.
    #[error("books backend dropped the response")]
    BackendDropped,
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}
