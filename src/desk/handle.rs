//! # Desk Handle
//!
//! [`DeskHandle`] is the "client" half of the desk: a cheap, cloneable
//! wrapper around the mailbox sender. Every method sends one request and
//! waits for the actor's reply, which for network operations arrives only
//! after the result has been merged into the desk state.

use super::error::DeskError;
use super::form::FormField;
use super::message::{DeskMessage, Reply};
use super::state::DeskState;
use crate::model::{Book, BookId};
use tokio::sync::{mpsc, oneshot};
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct DeskHandle {
    sender: mpsc::Sender<DeskMessage>,
}

impl DeskHandle {
    pub(crate) fn new(sender: mpsc::Sender<DeskMessage>) -> Self {
        Self { sender }
    }

    /// Sets the search query and fetches the matching books.
    ///
    /// An empty query lists everything. Returns
    /// [`DeskError::Superseded`] if a newer fetch was issued before this one
    /// completed.
    #[instrument(skip(self, query))]
    pub async fn search(&self, query: impl Into<String>) -> Result<Vec<Book>, DeskError> {
        let query = query.into();
        self.request(|respond_to| DeskMessage::Search { query, respond_to })
            .await
    }

    /// Fetches again with the current search query.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Vec<Book>, DeskError> {
        self.request(|respond_to| DeskMessage::Refresh { respond_to })
            .await
    }

    pub async fn set_field(
        &self,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<(), DeskError> {
        let value = value.into();
        self.request(|respond_to| DeskMessage::SetField {
            field,
            value,
            respond_to,
        })
        .await
    }

    pub async fn set_name(&self, name: impl Into<String>) -> Result<(), DeskError> {
        self.set_field(FormField::Name, name).await
    }

    pub async fn set_price(&self, price: impl Into<String>) -> Result<(), DeskError> {
        self.set_field(FormField::Price, price).await
    }

    /// Puts the displayed book with `id` into the form for editing.
    #[instrument(skip(self, id))]
    pub async fn select(&self, id: impl Into<BookId>) -> Result<Book, DeskError> {
        let id = id.into();
        self.request(|respond_to| DeskMessage::Select { id, respond_to })
            .await
    }

    /// Leaves edit mode and empties the form. Never touches the network.
    pub async fn cancel(&self) -> Result<(), DeskError> {
        self.request(|respond_to| DeskMessage::Cancel { respond_to })
            .await
    }

    /// Creates or updates from the form, depending on its mode.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<Book, DeskError> {
        self.request(|respond_to| DeskMessage::Submit { respond_to })
            .await
    }

    #[instrument(skip(self, id))]
    pub async fn delete(&self, id: impl Into<BookId>) -> Result<(), DeskError> {
        let id = id.into();
        self.request(|respond_to| DeskMessage::Delete { id, respond_to })
            .await
    }

    /// A copy of the current desk state.
    pub async fn snapshot(&self) -> Result<DeskState, DeskError> {
        self.request(|respond_to| DeskMessage::Snapshot { respond_to })
            .await
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Reply<T>) -> DeskMessage,
    ) -> Result<T, DeskError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| DeskError::Closed)?;
        response.await.map_err(|_| DeskError::Dropped)?
    }
}
