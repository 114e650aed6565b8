//! Mailbox messages of the desk actor.
//!
//! Requests come from [`DeskHandle`](super::DeskHandle). Completions are
//! posted back by the tasks the actor spawns for network calls and banner
//! timers, so every state change happens inside the actor loop.

use super::banner::BannerKind;
use super::error::DeskError;
use super::form::{FormField, FormMode};
use super::state::DeskState;
use crate::api::ApiError;
use crate::model::{Book, BookId};
use tokio::sync::oneshot;

/// Type alias for the one-shot reply channel used by the desk.
pub(crate) type Reply<T> = oneshot::Sender<Result<T, DeskError>>;

#[derive(Debug)]
pub(crate) enum DeskMessage {
    // --- Requests ---
    Search {
        query: String,
        respond_to: Reply<Vec<Book>>,
    },
    Refresh {
        respond_to: Reply<Vec<Book>>,
    },
    SetField {
        field: FormField,
        value: String,
        respond_to: Reply<()>,
    },
    Select {
        id: BookId,
        respond_to: Reply<Book>,
    },
    Cancel {
        respond_to: Reply<()>,
    },
    Submit {
        respond_to: Reply<Book>,
    },
    Delete {
        id: BookId,
        respond_to: Reply<()>,
    },
    Snapshot {
        respond_to: Reply<DeskState>,
    },

    // --- Completions ---
    Fetched {
        generation: u64,
        result: Result<Vec<Book>, ApiError>,
        respond_to: Reply<Vec<Book>>,
    },
    Saved {
        target: FormMode,
        result: Result<Book, ApiError>,
        respond_to: Reply<Book>,
    },
    Deleted {
        id: BookId,
        result: Result<(), ApiError>,
        respond_to: Reply<()>,
    },
    BannerExpired {
        kind: BannerKind,
        ticket: u64,
    },
}
