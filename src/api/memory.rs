//! # In-Process Backend
//!
//! [`MemoryBackend`] is a json-server stand-in that lives inside the process.
//! It is the "server" half of an actor: it owns the book table and the
//! receiving end of a channel, and processes requests one at a time, so the
//! table needs no locking. [`MemoryBooksApi`] is the cloneable "client" half
//! and implements [`BooksApi`].
//!
//! Semantics follow json-server:
//! - ids are assigned by the backend from an incrementing counter,
//! - records are returned in insertion order,
//! - filtered queries match a field's string form exactly.
//!
//! ```rust
//! use book_desk::api::{BooksApi, MemoryBackend};
//! use book_desk::model::BookDraft;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (backend, api) = MemoryBackend::new(16);
//!     tokio::spawn(backend.run());
//!
//!     let draft = BookDraft { name: "Dune".to_string(), price: 12.0 };
//!     let book = api.create(&draft).await.unwrap();
//!     assert_eq!(book.id.as_str(), "1");
//! }
//! ```

use super::{ApiError, BooksApi, SearchField};
use crate::model::{Book, BookDraft, BookId};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

/// Type alias for the one-shot response channel used by the backend.
type Response<T> = oneshot::Sender<Result<T, ApiError>>;

/// Requests understood by the [`MemoryBackend`], one per REST endpoint.
#[derive(Debug)]
enum BackendRequest {
    List {
        respond_to: Response<Vec<Book>>,
    },
    Find {
        field: SearchField,
        value: String,
        respond_to: Response<Vec<Book>>,
    },
    Create {
        draft: BookDraft,
        respond_to: Response<Book>,
    },
    Update {
        id: BookId,
        draft: BookDraft,
        respond_to: Response<Book>,
    },
    Delete {
        id: BookId,
        respond_to: Response<()>,
    },
}

/// The in-process books backend.
pub struct MemoryBackend {
    receiver: mpsc::Receiver<BackendRequest>,
    books: Vec<Book>,
    next_id: u64,
}

impl MemoryBackend {
    /// Creates an empty backend and its client.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - Capacity of the request channel. When it is full,
    ///   callers wait for space.
    pub fn new(buffer_size: usize) -> (Self, MemoryBooksApi) {
        Self::with_books(buffer_size, Vec::new())
    }

    /// Creates a backend preloaded with `books`.
    ///
    /// New ids continue after the largest numeric id already present.
    pub fn with_books(buffer_size: usize, books: Vec<Book>) -> (Self, MemoryBooksApi) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let next_id = books
            .iter()
            .filter_map(|book| book.id.as_str().parse::<u64>().ok())
            .max()
            .map_or(1, |max| max.saturating_add(1));
        let backend = Self {
            receiver,
            books,
            next_id,
        };
        (backend, MemoryBooksApi { sender })
    }

    /// Runs the request loop until every client has been dropped.
    pub async fn run(mut self) {
        info!(size = self.books.len(), "Books backend started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                BackendRequest::List { respond_to } => {
                    debug!(size = self.books.len(), "List");
                    let _ = respond_to.send(Ok(self.books.clone()));
                }
                BackendRequest::Find {
                    field,
                    value,
                    respond_to,
                } => {
                    let found: Vec<Book> = self
                        .books
                        .iter()
                        .filter(|book| field.value_of(book) == value)
                        .cloned()
                        .collect();
                    debug!(%field, %value, found = found.len(), "Find");
                    let _ = respond_to.send(Ok(found));
                }
                BackendRequest::Create { draft, respond_to } => {
                    let id = BookId::from(self.next_id);
                    self.next_id = self.next_id.saturating_add(1);
                    let book = Book::from_draft(id, draft);
                    self.books.push(book.clone());
                    info!(id = %book.id, size = self.books.len(), "Created");
                    let _ = respond_to.send(Ok(book));
                }
                BackendRequest::Update {
                    id,
                    draft,
                    respond_to,
                } => {
                    if let Some(book) = self.books.iter_mut().find(|book| book.id == id) {
                        *book = Book::from_draft(id.clone(), draft);
                        info!(%id, "Updated");
                        let _ = respond_to.send(Ok(book.clone()));
                    } else {
                        warn!(%id, "Not found");
                        let _ = respond_to.send(Err(ApiError::NotFound(id)));
                    }
                }
                BackendRequest::Delete { id, respond_to } => {
                    if let Some(index) = self.books.iter().position(|book| book.id == id) {
                        self.books.remove(index);
                        info!(%id, size = self.books.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(%id, "Not found");
                        let _ = respond_to.send(Err(ApiError::NotFound(id)));
                    }
                }
            }
        }

        info!(size = self.books.len(), "Books backend shutdown");
    }
}

/// Client half of the [`MemoryBackend`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct MemoryBooksApi {
    sender: mpsc::Sender<BackendRequest>,
}

impl MemoryBooksApi {
    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> BackendRequest,
    ) -> Result<T, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ApiError::BackendClosed)?;
        response.await.map_err(|_| ApiError::BackendDropped)?
    }
}

#[async_trait]
impl BooksApi for MemoryBooksApi {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Book>, ApiError> {
        self.request(|respond_to| BackendRequest::List { respond_to })
            .await
    }

    #[instrument(skip(self))]
    async fn find(&self, field: SearchField, value: &str) -> Result<Vec<Book>, ApiError> {
        let value = value.to_string();
        self.request(|respond_to| BackendRequest::Find {
            field,
            value,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    async fn create(&self, draft: &BookDraft) -> Result<Book, ApiError> {
        let draft = draft.clone();
        self.request(|respond_to| BackendRequest::Create { draft, respond_to })
            .await
    }

    #[instrument(skip(self))]
    async fn update(&self, id: &BookId, draft: &BookDraft) -> Result<Book, ApiError> {
        let (id, draft) = (id.clone(), draft.clone());
        self.request(|respond_to| BackendRequest::Update {
            id,
            draft,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &BookId) -> Result<(), ApiError> {
        let id = id.clone();
        self.request(|respond_to| BackendRequest::Delete { id, respond_to })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, price: f64) -> BookDraft {
        BookDraft {
            name: name.to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn assigns_ids_after_seeded_books() {
        let seeded = vec![Book::new("3", "Emma", 8.0), Book::new("x9", "Odyssey", 11.0)];
        let (backend, api) = MemoryBackend::with_books(8, seeded);
        tokio::spawn(backend.run());

        let created = api.create(&draft("Dune", 12.0)).await.unwrap();
        assert_eq!(created.id, BookId::from("4"));

        let all = api.list().await.unwrap();
        let names: Vec<_> = all.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Emma", "Odyssey", "Dune"]);
    }

    #[tokio::test]
    async fn ids_past_the_u32_range_keep_counting() {
        let seeded = vec![Book::new("4294967295", "Emma", 8.0)];
        let (backend, api) = MemoryBackend::with_books(8, seeded);
        tokio::spawn(backend.run());

        let created = api.create(&draft("Dune", 12.0)).await.unwrap();
        assert_eq!(created.id, BookId::from("4294967296"));
    }

    #[tokio::test]
    async fn find_matches_field_string_form_exactly() {
        let seeded = vec![
            Book::new("1", "Emma", 10.0),
            Book::new("2", "Emma Watson", 10.5),
            Book::new("3", "Dune", 10.0),
        ];
        let (backend, api) = MemoryBackend::with_books(8, seeded);
        tokio::spawn(backend.run());

        let by_name = api.find(SearchField::Name, "Emma").await.unwrap();
        assert_eq!(by_name.len(), 1);

        let by_price = api.find(SearchField::Price, "10").await.unwrap();
        let ids: Vec<_> = by_price.iter().map(|b| b.id.to_string()).collect();
        assert_eq!(ids, ["1", "3"]);

        let by_id = api.find(SearchField::Id, "2").await.unwrap();
        assert_eq!(by_id[0].name, "Emma Watson");
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_books() {
        let (backend, api) = MemoryBackend::new(8);
        tokio::spawn(backend.run());

        let missing = BookId::from("42");
        let err = api.update(&missing, &draft("Nope", 1.0)).await.unwrap_err();
        assert_eq!(err, ApiError::NotFound(missing.clone()));

        let err = api.delete(&missing).await.unwrap_err();
        assert_eq!(err, ApiError::NotFound(missing));
    }

    #[tokio::test]
    async fn update_replaces_in_place() {
        let seeded = vec![Book::new("1", "A", 1.0), Book::new("2", "B", 2.0), Book::new("3", "C", 3.0)];
        let (backend, api) = MemoryBackend::with_books(8, seeded);
        tokio::spawn(backend.run());

        let updated = api.update(&BookId::from("2"), &draft("B2", 2.5)).await.unwrap();
        assert_eq!(updated, Book::new("2", "B2", 2.5));

        let all = api.list().await.unwrap();
        assert_eq!(all[1], updated);
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn closed_backend_is_reported() {
        let (backend, api) = MemoryBackend::new(8);
        drop(backend);
        assert_eq!(api.list().await.unwrap_err(), ApiError::BackendClosed);
    }
}
