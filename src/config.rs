//! Runtime configuration.
//!
//! Settings come from the command line, with `BOOKS_API_URL` as the
//! environment fallback for the backend address. [`DeskConfig`] is the
//! library-side view that the lifecycle and the desk consume.

use crate::api::DEFAULT_BASE_URL;
use clap::Parser;
use std::time::Duration;

/// Which books backend the desk talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// REST backend at [`DeskConfig::base_url`].
    Http,
    /// In-process backend seeded with sample books.
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeskConfig {
    pub backend: BackendKind,
    pub base_url: String,
    /// How long success and error banners stay up.
    pub banner_duration: Duration,
    pub request_timeout: Duration,
    /// Capacity of the desk and backend mailboxes.
    pub mailbox_size: usize,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Http,
            base_url: DEFAULT_BASE_URL.to_string(),
            banner_duration: Duration::from_millis(3000),
            request_timeout: Duration::from_secs(10),
            mailbox_size: 32,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "book-desk",
    version,
    about = "Manage a list of books against a REST backend",
    long_about = "Manage a list of books (id, name, price) against a json-server style REST backend.\n\n\
                  Commands are read from stdin one per line; type `help` for the list."
)]
pub struct Cli {
    /// Backend origin; requests go to <BASE_URL>/books.
    #[arg(long, env = "BOOKS_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Use an in-process backend with sample books instead of HTTP.
    #[arg(long)]
    pub memory: bool,

    /// How long banners stay visible, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 3000)]
    pub banner_ms: u64,

    /// Per-request timeout, in seconds.
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

impl Cli {
    pub fn into_config(self) -> DeskConfig {
        DeskConfig {
            backend: if self.memory {
                BackendKind::Memory
            } else {
                BackendKind::Http
            },
            base_url: self.base_url,
            banner_duration: Duration::from_millis(self.banner_ms),
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..DeskConfig::default()
        }
    }
}
