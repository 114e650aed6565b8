//! # Mock Books API & Testing Guide
//!
//! [`MockBooksApi`] implements [`BooksApi`] from a queue of scripted
//! expectations and records every call it receives. It lets desk logic be
//! tested deterministically, including failures and slow responses that are
//! hard to provoke from a real backend.
//!
//! | Feature | MockBooksApi | MemoryBackend |
//! |---------|--------------|---------------|
//! | **State** | None (expectations) | Real book table |
//! | **Error injection** | `return_err` | Only not-found |
//! | **Latency** | `delayed(..)` | None |
//! | **Call log** | [`MockBooksApi::calls`] | None |
//!
//! ```rust
//! use book_desk::api::{ApiCall, ApiError, BooksApi, MockBooksApi};
//! use book_desk::model::Book;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockBooksApi::new();
//!     mock.expect_list().return_ok(vec![Book::new("1", "Dune", 12.0)]);
//!     mock.expect_list().return_err(ApiError::Network("refused".into()));
//!
//!     assert_eq!(mock.list().await.unwrap().len(), 1);
//!     assert!(mock.list().await.is_err());
//!     assert_eq!(mock.calls(), vec![ApiCall::List, ApiCall::List]);
//!     mock.verify();
//! }
//! ```
//!
//! Expectations are matched by operation (and by field or id where the
//! operation has one), first come first served. An unmatched call panics.

use super::{ApiError, BooksApi, SearchField};
use crate::model::{Book, BookDraft, BookId};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A call received by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List,
    Find(SearchField, String),
    Create(BookDraft),
    Update(BookId, BookDraft),
    Delete(BookId),
}

#[derive(Debug, Clone, PartialEq)]
enum Matcher {
    List,
    Find(SearchField),
    Create,
    Update(BookId),
    Delete(BookId),
}

impl Matcher {
    fn accepts(&self, call: &ApiCall) -> bool {
        match (self, call) {
            (Matcher::List, ApiCall::List) | (Matcher::Create, ApiCall::Create(_)) => true,
            (Matcher::Find(expected), ApiCall::Find(field, _)) => expected == field,
            (Matcher::Update(expected), ApiCall::Update(id, _)) => expected == id,
            (Matcher::Delete(expected), ApiCall::Delete(id)) => expected == id,
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Books(Vec<Book>),
    Book(Book),
    Done,
    Failed(ApiError),
}

#[derive(Debug)]
struct Expectation {
    matcher: Matcher,
    delay: Option<Duration>,
    reply: Reply,
}

#[derive(Debug, Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    calls: Vec<ApiCall>,
}

/// Scripted [`BooksApi`]. Clones share the same script and call log.
#[derive(Debug, Clone, Default)]
pub struct MockBooksApi {
    state: Arc<Mutex<MockState>>,
}

impl MockBooksApi {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `list` call.
    pub fn expect_list(&self) -> ExpectationBuilder<Vec<Book>> {
        self.builder(Matcher::List)
    }

    /// Expects a `find` call on `field`.
    pub fn expect_find(&self, field: SearchField) -> ExpectationBuilder<Vec<Book>> {
        self.builder(Matcher::Find(field))
    }

    /// Expects a `create` call.
    pub fn expect_create(&self) -> ExpectationBuilder<Book> {
        self.builder(Matcher::Create)
    }

    /// Expects an `update` call for `id`.
    pub fn expect_update(&self, id: impl Into<BookId>) -> ExpectationBuilder<Book> {
        self.builder(Matcher::Update(id.into()))
    }

    /// Expects a `delete` call for `id`.
    pub fn expect_delete(&self, id: impl Into<BookId>) -> ExpectationBuilder<()> {
        self.builder(Matcher::Delete(id.into()))
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    /// Panics if any expectation is still pending.
    pub fn verify(&self) {
        let state = self.lock();
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                state.expectations.len(),
                state.expectations
            );
        }
    }

    fn builder<T>(&self, matcher: Matcher) -> ExpectationBuilder<T> {
        ExpectationBuilder {
            state: self.state.clone(),
            matcher,
            delay: None,
            _reply: std::marker::PhantomData,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }

    async fn answer(&self, call: ApiCall) -> Reply {
        let expectation = {
            let mut state = self.lock();
            state.calls.push(call.clone());
            let position = state
                .expectations
                .iter()
                .position(|e| e.matcher.accepts(&call));
            position.and_then(|index| state.expectations.remove(index))
        };
        let Some(expectation) = expectation else {
            panic!("Unexpected call: {call:?}");
        };
        if let Some(delay) = expectation.delay {
            tokio::time::sleep(delay).await;
        }
        expectation.reply
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T> {
    state: Arc<Mutex<MockState>>,
    matcher: Matcher,
    delay: Option<Duration>,
    _reply: std::marker::PhantomData<T>,
}

impl<T> ExpectationBuilder<T> {
    /// Holds the reply back for `delay` before answering.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answers the call with an error.
    pub fn return_err(self, error: ApiError) {
        self.push(Reply::Failed(error));
    }

    fn push(self, reply: Reply) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.expectations.push_back(Expectation {
            matcher: self.matcher,
            delay: self.delay,
            reply,
        });
    }
}

impl ExpectationBuilder<Vec<Book>> {
    /// Answers the call with `books`.
    pub fn return_ok(self, books: Vec<Book>) {
        self.push(Reply::Books(books));
    }
}

impl ExpectationBuilder<Book> {
    /// Answers the call with `book`.
    pub fn return_ok(self, book: Book) {
        self.push(Reply::Book(book));
    }
}

impl ExpectationBuilder<()> {
    /// Answers the call with success.
    pub fn return_ok(self) {
        self.push(Reply::Done);
    }
}

fn mismatch(call: &str, reply: &Reply) -> ! {
    panic!("Expectation for {call} scripted with the wrong reply: {reply:?}")
}

#[async_trait]
impl BooksApi for MockBooksApi {
    async fn list(&self) -> Result<Vec<Book>, ApiError> {
        match self.answer(ApiCall::List).await {
            Reply::Books(books) => Ok(books),
            Reply::Failed(e) => Err(e),
            other => mismatch("list", &other),
        }
    }

    async fn find(&self, field: SearchField, value: &str) -> Result<Vec<Book>, ApiError> {
        match self.answer(ApiCall::Find(field, value.to_string())).await {
            Reply::Books(books) => Ok(books),
            Reply::Failed(e) => Err(e),
            other => mismatch("find", &other),
        }
    }

    async fn create(&self, draft: &BookDraft) -> Result<Book, ApiError> {
        match self.answer(ApiCall::Create(draft.clone())).await {
            Reply::Book(book) => Ok(book),
            Reply::Failed(e) => Err(e),
            other => mismatch("create", &other),
        }
    }

    async fn update(&self, id: &BookId, draft: &BookDraft) -> Result<Book, ApiError> {
        match self
            .answer(ApiCall::Update(id.clone(), draft.clone()))
            .await
        {
            Reply::Book(book) => Ok(book),
            Reply::Failed(e) => Err(e),
            other => mismatch("update", &other),
        }
    }

    async fn delete(&self, id: &BookId) -> Result<(), ApiError> {
        match self.answer(ApiCall::Delete(id.clone())).await {
            Reply::Done => Ok(()),
            Reply::Failed(e) => Err(e),
            other => mismatch("delete", &other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn matches_expectations_by_field_not_order() {
        let mock = MockBooksApi::new();
        mock.expect_find(SearchField::Price)
            .return_ok(vec![Book::new("3", "C", 3.0)]);
        mock.expect_find(SearchField::Id)
            .return_ok(vec![Book::new("1", "A", 1.0)]);

        let by_id = mock.find(SearchField::Id, "1").await.unwrap();
        assert_eq!(by_id[0].name, "A");
        let by_price = mock.find(SearchField::Price, "3").await.unwrap();
        assert_eq!(by_price[0].name, "C");

        assert_eq!(
            mock.calls(),
            vec![
                ApiCall::Find(SearchField::Id, "1".to_string()),
                ApiCall::Find(SearchField::Price, "3".to_string()),
            ]
        );
        mock.verify();
    }

    #[tokio::test]
    async fn clones_share_the_script() {
        let mock = MockBooksApi::new();
        let clone = mock.clone();
        mock.expect_delete("9").return_ok();

        clone.delete(&BookId::from("9")).await.unwrap();
        mock.verify();
        assert_eq!(mock.calls(), vec![ApiCall::Delete(BookId::from("9"))]);
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected call")]
    async fn unexpected_call_panics() {
        let mock = MockBooksApi::new();
        let _ = mock.list().await;
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn verify_reports_pending_expectations() {
        let mock = MockBooksApi::new();
        mock.expect_list().return_ok(Vec::new());
        mock.verify();
    }
}
