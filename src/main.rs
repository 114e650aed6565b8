//! # book-desk
//!
//! Terminal front end for the book desk.
//!
//! 1. Parse [`Cli`] flags into a [`DeskConfig`](book_desk::config::DeskConfig).
//! 2. Start a [`DeskSystem`] over the selected backend.
//! 3. Load the list once, then hand stdin/stdout to the [`repl`].
//! 4. Shut down gracefully on `quit` or end of input.

use anyhow::Context;
use book_desk::config::Cli;
use book_desk::lifecycle::{setup_tracing, DeskSystem};
use book_desk::{repl, view};
use clap::Parser;
use tokio::io::{stdin, stdout, BufReader};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = Cli::parse().into_config();
    info!(?config, "Starting book desk");

    let system = DeskSystem::from_config(&config).context("failed to start the desk")?;

    // First load; a failure is already on the error banner.
    if let Err(e) = system.desk.refresh().await {
        warn!(error = %e, "Initial load failed");
    }
    let state = system.desk.snapshot().await?;
    println!("{}\ntype `help` for commands", view::render(&state));

    repl::run(&system.desk, BufReader::new(stdin()), stdout())
        .await
        .context("terminal session failed")?;

    system.shutdown().await?;
    Ok(())
}
