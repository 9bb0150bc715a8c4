//! Gallery state module
//!
//! [`Gallery`] is the view-model the UI shell owns: the loaded image
//! collection, the selected image's detail view and whether the detail
//! dialog is open. All transitions are plain methods so they can be
//! driven and tested without any UI.

mod session;
mod view;

pub use session::GallerySession;
pub use view::{GridTile, SelectedImageView};

use crate::error::{GalleryError, Result};
use crate::repository::{FetchError, ImageRecord};
use crate::{log_debug, log_info, log_warn};

const MODULE: &str = "gallery";

/// Where the collection load stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    /// Last load failed; the message is meant for the empty-state screen
    Failed(String),
}

/// Identifies one load; only the newest ticket may deliver results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Gallery view-model
#[derive(Debug)]
pub struct Gallery {
    repository_url: String,
    images: Vec<ImageRecord>,
    selected: SelectedImageView,
    selected_index: Option<usize>,
    detail_open: bool,
    load_state: LoadState,
    generation: u64,
    mounted: bool,
}

impl Gallery {
    /// Create a mounted, empty gallery
    pub fn new(repository_url: &str) -> Self {
        Self {
            repository_url: repository_url.trim_end_matches('/').to_string(),
            images: Vec::new(),
            selected: SelectedImageView::default(),
            selected_index: None,
            detail_open: false,
            load_state: LoadState::Idle,
            generation: 0,
            mounted: true,
        }
    }

    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn selected(&self) -> &SelectedImageView {
        &self.selected
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn is_detail_open(&self) -> bool {
        self.detail_open
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Grid cells for the whole collection, in collection order
    pub fn tiles(&self) -> Vec<GridTile> {
        self.images
            .iter()
            .enumerate()
            .map(|(i, record)| GridTile::project(i, record, &self.repository_url))
            .collect()
    }

    /// Start a load; any ticket handed out earlier becomes stale
    pub fn begin_load(&mut self) -> Result<LoadTicket> {
        if !self.mounted {
            return Err(GalleryError::Unmounted);
        }
        self.generation += 1;
        self.load_state = LoadState::Loading;
        log_debug!(MODULE, "Load {} started", self.generation);
        Ok(LoadTicket(self.generation))
    }

    /// Deliver the outcome of the load identified by `ticket`
    ///
    /// Results for an old ticket or an unmounted view are discarded. On
    /// failure the previous collection stays in place. Returns the new
    /// collection size.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: std::result::Result<Vec<ImageRecord>, FetchError>,
    ) -> Result<usize> {
        if !self.mounted {
            log_debug!(MODULE, "Dropping load {} result: view unmounted", ticket.0);
            return Err(GalleryError::Unmounted);
        }
        if ticket.0 != self.generation {
            log_debug!(
                MODULE,
                "Dropping stale load {} result (current {})",
                ticket.0,
                self.generation
            );
            return Err(GalleryError::StaleResult {
                ticket: ticket.0,
                current: self.generation,
            });
        }

        match result {
            Ok(images) => {
                let count = images.len();
                self.replace_images(images);
                self.load_state = LoadState::Loaded;
                log_info!(MODULE, "Loaded {} images", count);
                Ok(count)
            }
            Err(e) => {
                log_warn!(MODULE, "Load {} failed: {}", ticket.0, e);
                self.load_state = LoadState::Failed(e.to_string());
                Err(GalleryError::Fetch(e))
            }
        }
    }

    /// Swap in a new collection and re-resolve the selection against it
    fn replace_images(&mut self, images: Vec<ImageRecord>) {
        self.images = images;

        let Some(index) = self.selected_index else {
            return;
        };

        match self.images.get(index) {
            Some(record) => {
                self.selected = SelectedImageView::project(index, record, &self.repository_url);
            }
            None => {
                log_debug!(
                    MODULE,
                    "Selection {} no longer exists after reload, clearing",
                    index
                );
                self.selected = SelectedImageView::default();
                self.selected_index = None;
                self.detail_open = false;
            }
        }
    }

    /// Select the image at `index`
    ///
    /// With `open_detail` the detail dialog opens; without it the dialog
    /// keeps whatever state it had. An invalid index leaves everything
    /// untouched.
    pub fn select(&mut self, index: usize, open_detail: bool) -> Result<&SelectedImageView> {
        if !self.mounted {
            return Err(GalleryError::Unmounted);
        }

        let record = self
            .images
            .get(index)
            .ok_or(GalleryError::IndexOutOfRange {
                index,
                len: self.images.len(),
            })?;

        self.selected = SelectedImageView::project(index, record, &self.repository_url);
        self.selected_index = Some(index);
        if open_detail {
            self.detail_open = true;
        }

        log_debug!(
            MODULE,
            "Selected {} (detail open: {})",
            index,
            self.detail_open
        );
        Ok(&self.selected)
    }

    /// Close the detail dialog; the selected view is kept
    pub fn close(&mut self) {
        self.detail_open = false;
    }

    /// Page to the next image in the detail view
    pub fn step_next(&mut self) -> Result<&SelectedImageView> {
        let next = self.selected_index.map_or(0, |i| i + 1);
        if next >= self.images.len() {
            return Err(GalleryError::EndOfCollection);
        }
        self.select(next, true)
    }

    /// Page to the previous image in the detail view
    pub fn step_previous(&mut self) -> Result<&SelectedImageView> {
        match self.selected_index.and_then(|i| i.checked_sub(1)) {
            Some(previous) if previous < self.images.len() => self.select(previous, true),
            _ => Err(GalleryError::EndOfCollection),
        }
    }

    /// Tear down the view; pending loads can no longer deliver
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.generation += 1;
        self.images.clear();
        self.detail_open = false;
        log_debug!(MODULE, "Gallery unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPO: &str = "https://example.com";

    fn record(name: &str, size: Option<u64>) -> ImageRecord {
        ImageRecord {
            path: format!("/Root/Content/IT/ImageLibrary/{}", name),
            display_name: Some(name.to_string()),
            size,
            ..ImageRecord::default()
        }
    }

    fn loaded(names: &[&str]) -> Gallery {
        let mut gallery = Gallery::new(REPO);
        let ticket = gallery.begin_load().unwrap();
        let images = names.iter().map(|n| record(n, Some(1024))).collect();
        gallery.finish_load(ticket, Ok(images)).unwrap();
        gallery
    }

    #[test]
    fn test_initial_state() {
        let gallery = Gallery::new(REPO);
        assert!(gallery.is_empty());
        assert!(!gallery.is_detail_open());
        assert_eq!(gallery.selected(), &SelectedImageView::default());
        assert_eq!(gallery.selected_index(), None);
        assert_eq!(gallery.load_state(), &LoadState::Idle);
    }

    #[test]
    fn test_load_preserves_order() {
        let gallery = loaded(&["c.jpg", "a.jpg", "b.jpg"]);
        assert_eq!(gallery.load_state(), &LoadState::Loaded);
        let titles: Vec<String> = gallery.tiles().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["c.jpg", "a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_select_with_and_without_detail() {
        let mut gallery = loaded(&["a.jpg", "b.jpg", "c.jpg"]);

        gallery.select(1, false).unwrap();
        assert!(!gallery.is_detail_open());
        assert_eq!(gallery.selected().title, "b.jpg");

        gallery.select(0, true).unwrap();
        assert!(gallery.is_detail_open());

        // Quiet selection keeps the dialog open
        gallery.select(2, false).unwrap();
        assert!(gallery.is_detail_open());
        assert_eq!(gallery.selected().index, 2);

        gallery.select(2, true).unwrap();
        assert!(gallery.is_detail_open());
    }

    #[test]
    fn test_close_keeps_selection() {
        let mut gallery = loaded(&["a.jpg", "b.jpg"]);
        gallery.select(1, true).unwrap();
        let before = gallery.selected().clone();

        gallery.close();
        assert!(!gallery.is_detail_open());
        assert_eq!(gallery.selected(), &before);

        gallery.close();
        assert!(!gallery.is_detail_open());
        assert_eq!(gallery.selected(), &before);
    }

    #[test]
    fn test_out_of_range_selection_is_ignored() {
        let mut gallery = loaded(&["a.jpg", "b.jpg"]);
        gallery.select(0, true).unwrap();
        let before = gallery.selected().clone();

        let err = gallery.select(2, false).unwrap_err();
        assert!(matches!(err, GalleryError::IndexOutOfRange { index: 2, len: 2 }));
        assert!(matches!(
            gallery.select(usize::MAX, true),
            Err(GalleryError::IndexOutOfRange { .. })
        ));

        assert_eq!(gallery.selected(), &before);
        assert_eq!(gallery.selected_index(), Some(0));
        assert!(gallery.is_detail_open());
    }

    #[test]
    fn test_select_on_empty_gallery() {
        let mut gallery = Gallery::new(REPO);
        assert!(gallery.select(0, true).is_err());
        assert!(!gallery.is_detail_open());
        assert_eq!(gallery.selected(), &SelectedImageView::default());
    }

    #[test]
    fn test_reload_replaces_wholesale() {
        let mut gallery = loaded(&["a.jpg", "b.jpg", "c.jpg"]);

        let ticket = gallery.begin_load().unwrap();
        assert_eq!(gallery.load_state(), &LoadState::Loading);
        gallery
            .finish_load(ticket, Ok(vec![record("x.jpg", None)]))
            .unwrap();

        assert_eq!(gallery.len(), 1);
        assert_eq!(gallery.images()[0].display_name.as_deref(), Some("x.jpg"));
        assert!(gallery
            .images()
            .iter()
            .all(|r| r.display_name.as_deref() == Some("x.jpg")));
    }

    #[test]
    fn test_reload_shrinking_clears_invalid_selection() {
        let mut gallery = loaded(&["a.jpg", "b.jpg", "c.jpg"]);
        gallery.select(2, true).unwrap();

        let ticket = gallery.begin_load().unwrap();
        gallery
            .finish_load(ticket, Ok(vec![record("x.jpg", None)]))
            .unwrap();

        assert_eq!(gallery.selected_index(), None);
        assert_eq!(gallery.selected(), &SelectedImageView::default());
        assert!(!gallery.is_detail_open());
    }

    #[test]
    fn test_reload_refreshes_valid_selection() {
        let mut gallery = loaded(&["a.jpg", "b.jpg"]);
        gallery.select(1, true).unwrap();

        let ticket = gallery.begin_load().unwrap();
        gallery
            .finish_load(
                ticket,
                Ok(vec![record("x.jpg", None), record("y.jpg", Some(2_097_152))]),
            )
            .unwrap();

        assert!(gallery.is_detail_open());
        assert_eq!(gallery.selected().title, "y.jpg");
        assert_eq!(gallery.selected().size, "2.00 MB");
    }

    #[test]
    fn test_failed_load_keeps_previous_collection() {
        let mut gallery = loaded(&["a.jpg"]);
        let ticket = gallery.begin_load().unwrap();
        let err = gallery
            .finish_load(
                ticket,
                Err(FetchError::Status {
                    status: 503,
                    body: "unavailable".to_string(),
                }),
            )
            .unwrap_err();

        assert!(matches!(err, GalleryError::Fetch(_)));
        assert!(matches!(gallery.load_state(), LoadState::Failed(msg) if msg.contains("503")));
        assert_eq!(gallery.len(), 1);
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut gallery = Gallery::new(REPO);
        let old = gallery.begin_load().unwrap();
        let new = gallery.begin_load().unwrap();

        gallery.finish_load(new, Ok(vec![record("new.jpg", None)])).unwrap();
        let err = gallery
            .finish_load(old, Ok(vec![record("old.jpg", None), record("old2.jpg", None)]))
            .unwrap_err();

        assert!(matches!(err, GalleryError::StaleResult { .. }));
        assert_eq!(gallery.len(), 1);
        assert_eq!(gallery.images()[0].display_name.as_deref(), Some("new.jpg"));
    }

    #[test]
    fn test_result_after_unmount_is_discarded() {
        let mut gallery = Gallery::new(REPO);
        let ticket = gallery.begin_load().unwrap();
        gallery.unmount();

        let err = gallery
            .finish_load(ticket, Ok(vec![record("late.jpg", None)]))
            .unwrap_err();
        assert!(matches!(err, GalleryError::Unmounted));
        assert!(gallery.is_empty());
        assert!(matches!(gallery.begin_load(), Err(GalleryError::Unmounted)));
    }

    #[test]
    fn test_paging_stops_at_edges() {
        let mut gallery = loaded(&["a.jpg", "b.jpg", "c.jpg"]);
        gallery.select(1, false).unwrap();
        assert!(!gallery.is_detail_open());

        assert_eq!(gallery.step_next().unwrap().index, 2);
        assert!(gallery.is_detail_open());
        assert!(matches!(gallery.step_next(), Err(GalleryError::EndOfCollection)));
        assert_eq!(gallery.selected_index(), Some(2));

        assert_eq!(gallery.step_previous().unwrap().index, 1);
        assert_eq!(gallery.step_previous().unwrap().index, 0);
        assert!(matches!(
            gallery.step_previous(),
            Err(GalleryError::EndOfCollection)
        ));
        assert_eq!(gallery.selected().title, "a.jpg");
    }

    #[test]
    fn test_paging_without_selection() {
        let mut gallery = loaded(&["a.jpg", "b.jpg"]);
        assert!(gallery.step_previous().is_err());
        assert_eq!(gallery.step_next().unwrap().index, 0);

        let mut empty = Gallery::new(REPO);
        assert!(empty.step_next().is_err());
        assert!(!empty.is_detail_open());
    }
}
