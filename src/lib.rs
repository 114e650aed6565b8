//! # Book Desk
//!
//! > **Keep a list of books in step with a REST backend.**
//!
//! This crate manages books (`id`, `name`, `price`) through CRUD calls
//! against a json-server style backend. The interesting part is on the
//! client side: merging asynchronous server responses into the displayed
//! list, deduplicating multi-field search results, flipping the inline form
//! between create and edit mode, and showing banners that clear themselves.
//!
//! ## 🏗️ Design
//!
//! ### One owner for UI state
//!
//! All UI state lives in a single Tokio task, the [`DeskActor`](desk::DeskActor).
//! Callers talk to it through a cloneable [`DeskHandle`](desk::DeskHandle).
//! Network calls run in spawned tasks and post their results back to the
//! actor's mailbox, so state is only ever mutated inside the actor loop,
//! one message at a time.
//!
//! ### A trait at the REST seam
//!
//! The desk depends on [`BooksApi`](api::BooksApi), not on HTTP. Production
//! uses [`HttpBooksApi`](api::HttpBooksApi); demos and integration tests use
//! the in-process [`MemoryBackend`](api::MemoryBackend); unit tests script a
//! [`MockBooksApi`](api::MockBooksApi).
//!
//! ### Failures are visible
//!
//! Every failed fetch, save or delete sets the error banner and is returned
//! to the caller. Nothing is only logged.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`] - wire types ([`Book`](model::Book), [`BookId`](model::BookId), [`BookDraft`](model::BookDraft))
//! - [`api`] - the `BooksApi` trait and its three implementations
//! - [`search`] - three-way search fan-out and dedup by id
//! - [`desk`] - the controller actor, form state machine and banners
//! - [`view`] - renders a desk snapshot as a table
//! - [`repl`] - terminal commands
//! - [`config`] - CLI flags and defaults
//! - [`lifecycle`] - wiring, shutdown and tracing setup
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Against json-server on localhost:4000
//! cargo run
//!
//! # Without a backend
//! RUST_LOG=info cargo run -- --memory
//! ```

pub mod api;
pub mod config;
pub mod desk;
pub mod lifecycle;
pub mod model;
pub mod repl;
pub mod search;
pub mod view;
