//! Command execution
//!
//! Runs shell commands against a [`GallerySession`] and renders the
//! resulting gallery state as text.

use std::fmt::Write;

use crate::error::GalleryError;
use crate::gallery::{Gallery, GallerySession, LoadState};
use crate::repository::ImageSource;
use crate::{log_debug, log_info, log_warn};

use super::{Command, HELP};

const MODULE: &str = "commands::operations";

/// What the shell should do after a command
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

/// Execute one command
pub async fn execute<S: ImageSource>(session: &mut GallerySession<S>, command: Command) -> Outcome {
    log_debug!(MODULE, "Executing {:?}", command);

    let output = match command {
        Command::Quit => return Outcome::Quit,
        Command::Help => HELP.to_string(),
        Command::Reload => {
            log_info!(MODULE, "Reload requested");
            match session.reload().await {
                Some(Err(e)) => describe_error(&e),
                _ => render_status(&*session.gallery().await),
            }
        }
        Command::List => render_tiles(&*session.gallery().await),
        Command::Show => render_detail(&*session.gallery().await),
        Command::Close => {
            let mut gallery = session.gallery().await;
            gallery.close();
            render_detail(&gallery)
        }
        Command::Open(index) | Command::Hover(index) => {
            let open_detail = matches!(command, Command::Open(_));
            let mut gallery = session.gallery().await;
            match gallery.select(index, open_detail).map(|_| ()) {
                Ok(()) => render_detail(&gallery),
                Err(e) => describe_error(&e),
            }
        }
        Command::Next | Command::Previous => {
            let mut gallery = session.gallery().await;
            let result = if command == Command::Next {
                gallery.step_next().map(|_| ())
            } else {
                gallery.step_previous().map(|_| ())
            };
            match result {
                Ok(()) => render_detail(&gallery),
                Err(e) => describe_error(&e),
            }
        }
    };

    Outcome::Continue(output)
}

fn describe_error(error: &GalleryError) -> String {
    match error {
        GalleryError::Fetch(_) => {
            log_warn!(MODULE, "{}", error);
            format!("{}\nType 'reload' to try again.", error)
        }
        _ => error.to_string(),
    }
}

/// Load status line, including the empty-state message
pub fn render_status(gallery: &Gallery) -> String {
    match gallery.load_state() {
        LoadState::Idle => "Nothing loaded yet.".to_string(),
        LoadState::Loading => "Loading images...".to_string(),
        LoadState::Failed(message) => format!(
            "Could not load images: {}\nType 'reload' to try again.",
            message
        ),
        LoadState::Loaded if gallery.is_empty() => "The image library is empty.".to_string(),
        LoadState::Loaded => format!("{} images loaded. Type 'list' to see them.", gallery.len()),
    }
}

/// The grid, one tile per line
pub fn render_tiles(gallery: &Gallery) -> String {
    if gallery.is_empty() {
        return render_status(gallery);
    }

    let mut out = String::new();
    for tile in gallery.tiles() {
        let marker = if gallery.selected_index() == Some(tile.index) {
            '*'
        } else {
            ' '
        };
        let title = if tile.title.is_empty() {
            "(untitled)"
        } else {
            &tile.title
        };
        let _ = writeln!(
            out,
            "{}{:>4}  {}  {}x{}  {}",
            marker, tile.index, title, tile.width, tile.height, tile.image_path
        );
    }
    out.trim_end().to_string()
}

/// The detail dialog, or a hint when it is closed
pub fn render_detail(gallery: &Gallery) -> String {
    let view = gallery.selected();

    if !gallery.is_detail_open() {
        return match gallery.selected_index() {
            Some(index) => format!("Detail view closed (image {} selected).", index),
            None => "Detail view closed.".to_string(),
        };
    }

    let mut out = String::new();
    let _ = writeln!(out, "[{}/{}] {}", view.index + 1, gallery.len(), view.title);
    if !view.description.is_empty() {
        let _ = writeln!(out, "  {}", view.description);
    }
    let _ = writeln!(out, "  Author:   {}", view.author);
    if !view.author_avatar.is_empty() {
        let _ = writeln!(out, "  Avatar:   {}", view.author_avatar);
    }
    let _ = writeln!(out, "  Created:  {}", view.creation_date);
    let _ = writeln!(out, "  Modified: {}", view.modification_date);
    let _ = writeln!(out, "  Size:     {} ({}x{})", view.size, view.width, view.height);
    let _ = writeln!(out, "  Image:    {}", view.image_path);
    let _ = writeln!(out, "  Download: {}", view.download_url);
    out.trim_end().to_string()
}
