//! Error types
//!
//! Every failure here is local and recoverable: the gallery keeps running
//! and the shell decides how to present it.

use crate::repository::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    /// The collection query failed (network, auth, server error, bad body).
    #[error("Failed to load images: {0}")]
    Fetch(#[from] FetchError),

    /// A selection referenced an index the current collection does not have.
    #[error("Image index {index} is out of range ({len} images loaded)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Paging past the first or last image.
    #[error("No more images in that direction")]
    EndOfCollection,

    /// A load finished after a newer one started; its result was dropped.
    #[error("Discarded stale load result (ticket {ticket}, current {current})")]
    StaleResult { ticket: u64, current: u64 },

    /// The view was torn down before the operation completed.
    #[error("Gallery view is not mounted")]
    Unmounted,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
