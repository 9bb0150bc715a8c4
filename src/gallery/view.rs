//! View-model projections
//!
//! Flattened, display-ready structures derived from [`ImageRecord`]s.
//! Optional fields degrade to empty strings or zero, never to a marker.

use crate::repository::ImageRecord;
use crate::utils::{format_megabytes, format_timestamp, join_url};

/// Detail view of the selected image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedImageView {
    pub index: usize,
    /// Absolute URL of the image itself
    pub image_path: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub author_avatar: String,
    /// `YYYY-MM-DD HH:mm:ss`, UTC
    pub creation_date: String,
    pub modification_date: String,
    /// e.g. "2.00 MB"
    pub size: String,
    pub download_url: String,
    pub width: u32,
    pub height: u32,
}

impl SelectedImageView {
    /// Project `record`, which sits at `index` in the collection
    pub fn project(index: usize, record: &ImageRecord, repository_url: &str) -> Self {
        Self {
            index,
            image_path: join_url(repository_url, &record.path),
            title: record.display_name.clone().unwrap_or_default(),
            description: record.description.clone().unwrap_or_default(),
            author: record.author_name().unwrap_or_default().to_string(),
            author_avatar: record.author_avatar_url().unwrap_or_default().to_string(),
            creation_date: format_timestamp(record.creation_date.as_deref()),
            modification_date: format_timestamp(record.modification_date.as_deref()),
            size: format_megabytes(record.size),
            download_url: record
                .media_src()
                .map(|src| join_url(repository_url, src))
                .unwrap_or_default(),
            width: record.width.unwrap_or(0),
            height: record.height.unwrap_or(0),
        }
    }
}

/// One cell of the thumbnail grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTile {
    pub index: usize,
    pub image_path: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl GridTile {
    pub fn project(index: usize, record: &ImageRecord, repository_url: &str) -> Self {
        Self {
            index,
            image_path: join_url(repository_url, &record.path),
            title: record.display_name.clone().unwrap_or_default(),
            width: record.width.unwrap_or(0),
            height: record.height.unwrap_or(0),
        }
    }
}
