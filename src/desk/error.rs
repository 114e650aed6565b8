//! Error types for desk operations.

use super::form::ValidationError;
use crate::api::ApiError;
use crate::model::BookId;
use thiserror::Error;

/// Errors returned by [`DeskHandle`](super::DeskHandle) operations.
///
/// Every variant except `Superseded`, `Closed` and `Dropped` is also shown
/// to the user as an error banner.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DeskError {
    /// The form failed its client-side checks; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The selected book is not in the displayed list.
    #[error("Book {0} is not in the list.")]
    UnknownBook(BookId),

    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A newer fetch was issued before this one completed; its results were
    /// discarded.
    #[error("fetch {generation} was superseded by a newer one")]
    Superseded { generation: u64 },

    /// The desk task has stopped.
    #[error("Desk closed")]
    Closed,

    /// The desk dropped the request without answering.
    #[error("Desk dropped response channel")]
    Dropped,
}
