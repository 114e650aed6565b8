use crate::api::{ApiError, BooksApi, HttpBooksApi, MemoryBackend};
use crate::config::{BackendKind, DeskConfig};
use crate::desk::{DeskActor, DeskHandle};
use crate::model::Book;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// A background task of the system panicked or was cancelled.
#[derive(Debug, Error)]
#[error("{task} task failed: {source}")]
pub struct ShutdownError {
    pub task: &'static str,
    #[source]
    pub source: JoinError,
}

/// The running book desk and whatever backend it was wired to.
///
/// `DeskSystem` is responsible for:
/// - **Wiring**: choosing the [`BooksApi`] implementation from the config and
///   handing it to the desk
/// - **Lifecycle**: spawning the desk (and the in-process backend, if any)
///   and stopping them in dependency order
///
/// # Example
///
/// ```rust
/// use book_desk::config::DeskConfig;
/// use book_desk::lifecycle::{sample_books, DeskSystem};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = DeskSystem::memory(sample_books(), &DeskConfig::default());
///     let books = system.desk.refresh().await?;
///     assert_eq!(books.len(), sample_books().len());
///
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct DeskSystem {
    /// Handle to the desk actor.
    pub desk: DeskHandle,

    /// Running tasks, in the order they must be awaited on shutdown.
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl DeskSystem {
    /// Starts a desk over an existing API implementation.
    pub fn with_api(api: Arc<dyn BooksApi>, config: &DeskConfig) -> Self {
        let (actor, desk) = DeskActor::new(api, config);
        let handle = tokio::spawn(actor.run());
        Self {
            desk,
            handles: vec![("desk", handle)],
        }
    }

    /// Starts an in-process backend holding `books`, and a desk over it.
    pub fn memory(books: Vec<Book>, config: &DeskConfig) -> Self {
        let (backend, api) = MemoryBackend::with_books(config.mailbox_size, books);
        let backend_handle = tokio::spawn(backend.run());

        let mut system = Self::with_api(Arc::new(api), config);
        // The backend stops once the desk has dropped its client.
        system.handles.push(("backend", backend_handle));
        system
    }

    /// Starts a desk talking HTTP to [`DeskConfig::base_url`].
    pub fn http(config: &DeskConfig) -> Result<Self, ApiError> {
        let api = HttpBooksApi::new(&config.base_url, config.request_timeout)?;
        info!(base_url = %config.base_url, "Using HTTP backend");
        Ok(Self::with_api(Arc::new(api), config))
    }

    /// Starts whichever backend `config` selects.
    pub fn from_config(config: &DeskConfig) -> Result<Self, ApiError> {
        match config.backend {
            BackendKind::Http => Self::http(config),
            BackendKind::Memory => {
                info!("Using in-process backend");
                Ok(Self::memory(sample_books(), config))
            }
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the desk handle closes the desk's mailbox once in-flight
    /// requests have reported back; the desk then drops its API client, which
    /// in turn stops the in-process backend.
    ///
    /// Other clones of the desk handle keep the desk alive, so they must be
    /// dropped before calling this.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down desk...");
        drop(self.desk);

        for (task, handle) in self.handles {
            if let Err(source) = handle.await {
                error!(task, error = %source, "Task failed");
                return Err(ShutdownError { task, source });
            }
        }

        info!("Desk shutdown complete.");
        Ok(())
    }
}

/// Books the in-process backend starts with.
pub fn sample_books() -> Vec<Book> {
    vec![
        Book::new("1", "The Pragmatic Programmer", 39.99),
        Book::new("2", "Dune", 12.5),
        Book::new("3", "Pride and Prejudice", 8.0),
        Book::new("4", "The Rust Programming Language", 39.99),
    ]
}
