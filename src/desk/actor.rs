//! # Desk Actor
//!
//! The "server" half of the desk. It owns [`DeskState`] and the receiving end
//! of the mailbox and handles one message at a time, which makes the loop the
//! only place state ever changes. No `Mutex` is needed.
//!
//! Network calls must not stall the loop, so each one runs in a spawned task
//! that posts a completion message back into the mailbox. The caller's reply
//! channel travels with the completion and is answered once the result has
//! been applied to the state.
//!
//! ```text
//! handle.submit() ──Submit──▶ actor ──spawn──▶ api.create(..)
//!                                                   │
//! handle ◀──reply── actor ◀────────Saved────────────┘
//! ```
//!
//! ## Fetch generations
//!
//! Each fetch is stamped with an increasing generation. A completion carrying
//! an older generation than the last one issued is discarded, so a slow
//! search can never overwrite the results of a newer one.
//!
//! A create, update or delete that lands while a fetch is in flight is
//! recorded as a [`CachePatch`] and applied again on top of that fetch's
//! results, since the fetch may have read the backend before the mutation.
//!
//! ## Shutdown
//!
//! The actor keeps only a weak sender to its own mailbox. Once every
//! [`DeskHandle`] is gone and in-flight requests have reported back, the
//! mailbox closes and [`DeskActor::run`] returns. Pending banner timers do not
//! keep it alive.

use super::banner::BannerKind;
use super::error::DeskError;
use super::form::FormMode;
use super::handle::DeskHandle;
use super::message::{DeskMessage, Reply};
use super::state::{CachePatch, DeskState};
use crate::api::{ApiError, BooksApi};
use crate::config::DeskConfig;
use crate::model::{Book, BookId};
use crate::search;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct DeskActor {
    receiver: mpsc::Receiver<DeskMessage>,
    mailbox: mpsc::WeakSender<DeskMessage>,
    api: Arc<dyn BooksApi>,
    state: DeskState,
    generation: u64,
    /// Mutations applied since the in-flight fetch was issued.
    unfetched: Vec<CachePatch>,
    banner_duration: Duration,
}

impl DeskActor {
    /// Creates a desk over `api` and the handle that drives it.
    ///
    /// The actor does nothing until [`run`](Self::run) is spawned. Nothing is
    /// fetched on start; the caller issues the first
    /// [`refresh`](DeskHandle::refresh).
    pub fn new(api: Arc<dyn BooksApi>, config: &DeskConfig) -> (Self, DeskHandle) {
        let (sender, receiver) = mpsc::channel(config.mailbox_size);
        let actor = Self {
            receiver,
            mailbox: sender.downgrade(),
            api,
            state: DeskState::default(),
            generation: 0,
            unfetched: Vec::new(),
            banner_duration: config.banner_duration,
        };
        (actor, DeskHandle::new(sender))
    }

    /// Runs the event loop until the mailbox closes.
    pub async fn run(mut self) {
        info!("Desk started");

        while let Some(message) = self.receiver.recv().await {
            self.handle(message);
        }

        info!(books = self.state.books.len(), "Desk shutdown");
    }

    fn handle(&mut self, message: DeskMessage) {
        match message {
            DeskMessage::Search { query, respond_to } => {
                debug!(%query, "Search");
                self.state.search_query = query;
                self.start_fetch(respond_to);
            }
            DeskMessage::Refresh { respond_to } => {
                debug!(query = %self.state.search_query, "Refresh");
                self.start_fetch(respond_to);
            }
            DeskMessage::SetField {
                field,
                value,
                respond_to,
            } => {
                debug!(?field, %value, "SetField");
                self.state.form.set(field, value);
                let _ = respond_to.send(Ok(()));
            }
            DeskMessage::Select { id, respond_to } => self.select(id, respond_to),
            DeskMessage::Cancel { respond_to } => {
                debug!("Cancel");
                self.state.form.clear();
                let _ = respond_to.send(Ok(()));
            }
            DeskMessage::Submit { respond_to } => self.submit(respond_to),
            DeskMessage::Delete { id, respond_to } => {
                debug!(%id, "Delete");
                let api = self.api.clone();
                self.spawn_completion(async move {
                    let result = api.delete(&id).await;
                    DeskMessage::Deleted {
                        id,
                        result,
                        respond_to,
                    }
                });
            }
            DeskMessage::Snapshot { respond_to } => {
                let _ = respond_to.send(Ok(self.state.clone()));
            }
            DeskMessage::Fetched {
                generation,
                result,
                respond_to,
            } => self.on_fetched(generation, result, respond_to),
            DeskMessage::Saved {
                target,
                result,
                respond_to,
            } => self.on_saved(target, result, respond_to),
            DeskMessage::Deleted {
                id,
                result,
                respond_to,
            } => self.on_deleted(id, result, respond_to),
            DeskMessage::BannerExpired { kind, ticket } => {
                if self.state.banners.expire(kind, ticket) {
                    debug!(?kind, ticket, "Banner cleared");
                }
            }
        }
    }

    fn start_fetch(&mut self, respond_to: Reply<Vec<Book>>) {
        self.generation += 1;
        self.state.loading = true;
        self.unfetched.clear();

        let generation = self.generation;
        let query = self.state.search_query.clone();
        let api = self.api.clone();
        self.spawn_completion(async move {
            let result = search::fetch_books(api.as_ref(), &query).await;
            DeskMessage::Fetched {
                generation,
                result,
                respond_to,
            }
        });
    }

    fn select(&mut self, id: BookId, respond_to: Reply<Book>) {
        match self.state.book(&id).cloned() {
            Some(book) => {
                debug!(%id, "Editing");
                self.state.form.prefill(&book);
                let _ = respond_to.send(Ok(book));
            }
            None => {
                let error = DeskError::UnknownBook(id);
                self.show(BannerKind::Error, error.to_string());
                let _ = respond_to.send(Err(error));
            }
        }
    }

    fn submit(&mut self, respond_to: Reply<Book>) {
        let draft = match self.state.form.to_draft() {
            Ok(draft) => draft,
            Err(invalid) => {
                debug!(error = %invalid, "Submit rejected");
                self.show(BannerKind::Error, invalid.to_string());
                let _ = respond_to.send(Err(invalid.into()));
                return;
            }
        };

        let target = self.state.form.mode();
        debug!(?target, ?draft, "Submit");
        let api = self.api.clone();
        self.spawn_completion(async move {
            let result = match &target {
                FormMode::Create => api.create(&draft).await,
                FormMode::Edit(id) => api.update(id, &draft).await,
            };
            DeskMessage::Saved {
                target,
                result,
                respond_to,
            }
        });
    }

    fn on_fetched(
        &mut self,
        generation: u64,
        result: Result<Vec<Book>, ApiError>,
        respond_to: Reply<Vec<Book>>,
    ) {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "Dropping stale fetch");
            let _ = respond_to.send(Err(DeskError::Superseded { generation }));
            return;
        }

        self.state.loading = false;
        let unfetched = std::mem::take(&mut self.unfetched);
        match result {
            Ok(books) => {
                info!(generation, size = books.len(), "Fetched");
                self.state.books = books;
                for patch in &unfetched {
                    debug!(?patch, "Reapplying mutation over fetch");
                    self.state.apply(patch);
                }
                let _ = respond_to.send(Ok(self.state.books.clone()));
            }
            Err(e) => {
                warn!(generation, error = %e, "Fetch failed");
                self.show(BannerKind::Error, format!("Could not load books: {e}"));
                let _ = respond_to.send(Err(e.into()));
            }
        }
    }

    fn on_saved(&mut self, target: FormMode, result: Result<Book, ApiError>, respond_to: Reply<Book>) {
        let book = match result {
            Ok(book) => book,
            Err(e) => {
                warn!(?target, error = %e, "Save failed");
                self.show(BannerKind::Error, format!("Could not save book: {e}"));
                let _ = respond_to.send(Err(e.into()));
                return;
            }
        };

        let notice = match &target {
            FormMode::Edit(id) => {
                if !self.patch(CachePatch::Replace(id.clone(), book.clone())) {
                    debug!(%id, "Updated book is not in the displayed list");
                }
                info!(%id, "Updated");
                "Book updated successfully."
            }
            FormMode::Create => {
                self.patch(CachePatch::Append(book.clone()));
                info!(id = %book.id, size = self.state.books.len(), "Created");
                "Book created successfully."
            }
        };
        // The user may have moved on to another book meanwhile.
        if self.state.form.mode() == target {
            self.state.form.clear();
        }
        self.show(BannerKind::Message, notice);
        let _ = respond_to.send(Ok(book));
    }

    fn on_deleted(&mut self, id: BookId, result: Result<(), ApiError>, respond_to: Reply<()>) {
        if let Err(e) = result {
            warn!(%id, error = %e, "Delete failed");
            self.show(BannerKind::Error, format!("Could not delete book: {e}"));
            let _ = respond_to.send(Err(e.into()));
            return;
        }

        self.patch(CachePatch::Remove(id.clone()));
        if self.state.form.is_editing_book(&id) {
            self.state.form.clear();
        }
        info!(%id, size = self.state.books.len(), "Deleted");
        self.show(BannerKind::Message, "Book deleted successfully.");
        let _ = respond_to.send(Ok(()));
    }

    /// Applies `patch` and remembers it if a fetch could still overwrite it.
    fn patch(&mut self, patch: CachePatch) -> bool {
        let changed = self.state.apply(&patch);
        if self.state.loading {
            self.unfetched.push(patch);
        }
        changed
    }

    /// Shows a banner and schedules its removal.
    fn show(&mut self, kind: BannerKind, text: impl Into<String>) {
        let ticket = self.state.banners.show(kind, text);
        let mailbox = self.mailbox.clone();
        let delay = self.banner_duration;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(mailbox) = mailbox.upgrade() {
                let _ = mailbox
                    .send(DeskMessage::BannerExpired { kind, ticket })
                    .await;
            }
        });
    }

    /// Runs `work` off the loop and posts its completion back to the mailbox.
    ///
    /// The task holds a strong sender, so the desk stays up until it reports.
    fn spawn_completion<F>(&self, work: F)
    where
        F: Future<Output = DeskMessage> + Send + 'static,
    {
        let Some(mailbox) = self.mailbox.upgrade() else {
            warn!("Desk is shutting down, request dropped");
            return;
        };
        tokio::spawn(async move {
            let completion = work.await;
            let _ = mailbox.send(completion).await;
        });
    }
}
