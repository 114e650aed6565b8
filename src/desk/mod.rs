//! # Desk
//!
//! The UI controller. It keeps the displayed book list in step with the
//! backend, runs the create/edit form and shows timed banners.
//!
//! ## Structure
//!
//! - [`actor`] - [`DeskActor`], the event loop that owns the state
//! - [`handle`] - [`DeskHandle`], the cloneable interface to it
//! - [`state`] - [`DeskState`], what the view renders
//! - [`form`] - [`FormState`] and the Idle/Editing state machine
//! - [`banner`] - success and error banners with auto-clear tickets
//! - [`error`] - [`DeskError`]
//!
//! ## Usage
//!
//! ```rust
//! use book_desk::api::{MemoryBackend};
//! use book_desk::config::DeskConfig;
//! use book_desk::desk::DeskActor;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (backend, api) = MemoryBackend::new(16);
//!     tokio::spawn(backend.run());
//!
//!     let (desk, handle) = DeskActor::new(Arc::new(api), &DeskConfig::default());
//!     tokio::spawn(desk.run());
//!
//!     handle.set_name("Dune").await?;
//!     handle.set_price("12").await?;
//!     let book = handle.submit().await?;
//!
//!     let state = handle.snapshot().await?;
//!     assert_eq!(state.books, vec![book]);
//!     assert_eq!(state.banners.message(), Some("Book created successfully."));
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod banner;
pub mod error;
pub mod form;
pub mod handle;
mod message;
pub mod state;

pub use actor::DeskActor;
pub use banner::{Banner, BannerKind, Banners};
pub use error::DeskError;
pub use form::{FormField, FormMode, FormState, ValidationError};
pub use handle::DeskHandle;
pub use state::{CachePatch, DeskState};
