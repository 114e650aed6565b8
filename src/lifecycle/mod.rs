//! # System Lifecycle & Orchestration
//!
//! Starting the desk means picking a backend, spawning its actor (for the
//! in-process one), spawning the desk actor on top of it and handing out the
//! [`DeskHandle`](crate::desk::DeskHandle). [`DeskSystem`] does this wiring and
//! undoes it in order on shutdown.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the desk handle** - the desk's mailbox closes once in-flight
//!    requests have posted their completions
//! 2. **Desk exits** - its loop ends and the API client it owned is dropped
//! 3. **Backend exits** - the in-process backend sees its last client gone
//! 4. **Await completion** - every task is joined in that order
//!
//! ## Observability
//!
//! [`setup_tracing`] initializes structured logging; see the [`tracing`](self::tracing)
//! module for filters and sample output.

pub mod desk_system;
pub mod tracing;

pub use desk_system::*;
pub use self::tracing::*;
