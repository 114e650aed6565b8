//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a `tracing-subscriber` formatter driven by
//! `RUST_LOG`.
//!
//! Logs go to **stderr** so they never interleave with the rendered view on
//! stdout, and the compact format hides module paths.
//!
//! ```bash
//! # Quiet (default): warnings only, e.g. failed requests
//! cargo run -- --memory
//!
//! # Every desk event and backend request
//! RUST_LOG=debug cargo run -- --memory 2>desk.log
//!
//! # Only the HTTP client
//! RUST_LOG=book_desk::api=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a create looks like:
//!
//! ```text
//! INFO create: Created id=5 size=5
//! INFO Created id=5 size=5
//! ```
//!
//! The first line comes from the in-process backend inside the API call's
//! span, the second from the desk applying the response.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

pub fn setup_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
