//! Shell commands
//!
//! Line-oriented stand-in for the grid and detail widgets: each command
//! maps to one gallery callback (select, close, page, reload).

mod operations;

pub use operations::{execute, render_status, Outcome};

use std::str::FromStr;

/// A parsed shell command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print the grid tiles
    List,
    /// Print the selected image and dialog state
    Show,
    /// Select an image and open the detail dialog
    Open(usize),
    /// Select an image without touching the dialog (grid hover)
    Hover(usize),
    Next,
    Previous,
    Close,
    Reload,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{0}' needs an image index")]
    MissingIndex(&'static str),

    #[error("'{0}' is not a valid image index")]
    BadIndex(String),
}

pub const HELP: &str = "\
Commands:
  list          show the image grid
  show          show the selected image
  open <n>      select image n and open the detail view
  hover <n>     select image n, leave the detail view as it is
  next, prev    page through images in the detail view
  close         close the detail view
  reload        load the library again
  help          this text
  quit          exit";

fn parse_index(name: &'static str, arg: Option<&str>) -> Result<usize, CommandError> {
    let arg = arg.ok_or(CommandError::MissingIndex(name))?;
    arg.parse()
        .map_err(|_| CommandError::BadIndex(arg.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or("").to_lowercase();
        let arg = parts.next();

        match name.as_str() {
            "list" | "ls" => Ok(Command::List),
            "show" => Ok(Command::Show),
            "open" => parse_index("open", arg).map(Command::Open),
            "hover" => parse_index("hover", arg).map(Command::Hover),
            "next" | "n" => Ok(Command::Next),
            "prev" | "previous" | "p" => Ok(Command::Previous),
            "close" => Ok(Command::Close),
            "reload" => Ok(Command::Reload),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
