//! # Books API
//!
//! The REST seam between the desk and a books backend.
//!
//! The desk never talks HTTP directly. It holds an `Arc<dyn BooksApi>` and the
//! concrete backend is chosen at wiring time:
//!
//! | Implementation | Backend | Use |
//! |---|---|---|
//! | [`HttpBooksApi`] | json-server style REST endpoint | production |
//! | [`MemoryBooksApi`] | [`MemoryBackend`] actor in the same process | demos, integration tests |
//! | [`MockBooksApi`] | scripted expectations | unit tests of desk logic |
//!
//! ## Endpoints
//!
//! ```text
//! GET    /books            -> list
//! GET    /books?id=X       -> find(SearchField::Id, X)
//! GET    /books?name=X     -> find(SearchField::Name, X)
//! GET    /books?price=X    -> find(SearchField::Price, X)
//! POST   /books            -> create
//! PUT    /books/{id}       -> update
//! DELETE /books/{id}       -> delete
//! ```

pub mod error;
pub mod http;
pub mod memory;
pub mod mock;

pub use error::*;
pub use http::*;
pub use memory::*;
pub use mock::*;

use crate::model::{Book, BookDraft, BookId};
use async_trait::async_trait;
use std::fmt::Display;

/// Book attribute a filtered query matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Id,
    Name,
    Price,
}

impl SearchField {
    /// All fields, in the order search results are merged.
    pub const ALL: [SearchField; 3] = [SearchField::Id, SearchField::Name, SearchField::Price];

    /// Query-string parameter name.
    pub fn param(self) -> &'static str {
        match self {
            SearchField::Id => "id",
            SearchField::Name => "name",
            SearchField::Price => "price",
        }
    }

    /// The value of this field on `book`, as the backend compares it.
    pub fn value_of(self, book: &Book) -> String {
        match self {
            SearchField::Id => book.id.to_string(),
            SearchField::Name => book.name.clone(),
            SearchField::Price => book.price.to_string(),
        }
    }
}

impl Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.param())
    }
}

/// CRUD operations against a books backend.
#[async_trait]
pub trait BooksApi: Send + Sync {
    /// `GET /books`
    async fn list(&self) -> Result<Vec<Book>, ApiError>;

    /// `GET /books?{field}={value}`
    async fn find(&self, field: SearchField, value: &str) -> Result<Vec<Book>, ApiError>;

    /// `POST /books`, returning the stored record with its new id.
    async fn create(&self, draft: &BookDraft) -> Result<Book, ApiError>;

    /// `PUT /books/{id}`, returning the stored record.
    async fn update(&self, id: &BookId, draft: &BookDraft) -> Result<Book, ApiError>;

    /// `DELETE /books/{id}`
    async fn delete(&self, id: &BookId) -> Result<(), ApiError>;
}
