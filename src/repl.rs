//! Line-oriented terminal front end.
//!
//! Each input line is one [`Command`]. After every command the desk is
//! re-rendered with [`view::render`](crate::view::render). Operation failures
//! are already shown as error banners, so the loop only stops on `quit`, end
//! of input, or a desk that has gone away.

use crate::desk::{DeskError, DeskHandle};
use crate::model::BookId;
use crate::view;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

pub const HELP: &str = "\
commands:
  search [TEXT]   show books whose id, name or price equals TEXT (all when empty)
  name TEXT       set the form's book name
  price TEXT      set the form's book price
  save            create the book, or update it when editing
  edit ID         load a listed book into the form
  cancel          leave edit mode and clear the form
  delete ID       delete a listed book
  show            print the current view
  help            print this list
  quit            leave
";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    Name(String),
    Price(String),
    Save,
    Edit(BookId),
    Cancel,
    Delete(BookId),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help` for the list")]
    Unknown(String),

    #[error("`{0}` needs a book id")]
    MissingId(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        let id = |command: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingId(command))
            } else {
                Ok(BookId::from(rest))
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "" | "show" => Ok(Command::Show),
            "search" => Ok(Command::Search(rest.to_string())),
            "name" => Ok(Command::Name(rest.to_string())),
            "price" => Ok(Command::Price(rest.to_string())),
            "save" => Ok(Command::Save),
            "edit" => id("edit").map(Command::Edit),
            "cancel" => Ok(Command::Cancel),
            "delete" => id("delete").map(Command::Delete),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReplError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Desk(#[from] DeskError),
}

/// Reads commands from `input` until `quit` or end of input, writing the
/// rendered desk to `output` after each one.
pub async fn run<R, W>(desk: &DeskHandle, input: R, mut output: W) -> Result<(), ReplError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                output.write_all(format!("{e}\n").as_bytes()).await?;
                output.flush().await?;
                continue;
            }
        };
        debug!(?command, "Command");

        match command {
            Command::Quit => break,
            Command::Help => {
                output.write_all(HELP.as_bytes()).await?;
                output.flush().await?;
                continue;
            }
            command => execute(desk, command).await?,
        }

        let state = desk.snapshot().await?;
        output
            .write_all(format!("{}\n", view::render(&state)).as_bytes())
            .await?;
        output.flush().await?;
    }
    Ok(())
}

/// Runs one command. Failures the desk already shows as a banner are not
/// errors here; only a desk that stopped answering is.
async fn execute(desk: &DeskHandle, command: Command) -> Result<(), DeskError> {
    let result = match command {
        Command::Search(query) => desk.search(query).await.map(drop),
        Command::Name(name) => desk.set_name(name).await,
        Command::Price(price) => desk.set_price(price).await,
        Command::Save => desk.submit().await.map(drop),
        Command::Edit(id) => desk.select(id).await.map(drop),
        Command::Cancel => desk.cancel().await,
        Command::Delete(id) => desk.delete(id).await,
        Command::Show | Command::Help | Command::Quit => Ok(()),
    };
    match result {
        Err(e @ (DeskError::Closed | DeskError::Dropped)) => Err(e),
        Err(e) => {
            debug!(error = %e, "Command failed");
            Ok(())
        }
        Ok(()) => Ok(()),
    }
}
