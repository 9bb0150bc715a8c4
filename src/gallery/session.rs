//! Gallery session
//!
//! Binds collection loads to the lifetime of a mounted [`Gallery`]. Each
//! load runs as a tokio task; starting a new one or unmounting aborts the
//! previous task, and load tickets drop anything that still arrives late.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::repository::{ImageSource, ODataOptions};
use crate::{log_debug, log_error, log_info};

use super::{Gallery, LoadTicket};

const MODULE: &str = "gallery::session";

pub struct GallerySession<S: ImageSource> {
    source: Arc<S>,
    gallery: Arc<Mutex<Gallery>>,
    library_path: String,
    options: ODataOptions,
    task: Option<JoinHandle<Result<usize>>>,
}

impl<S: ImageSource> GallerySession<S> {
    /// Create the view and start its initial load
    pub async fn mount(source: S, library_path: &str) -> Result<Self> {
        let gallery = Gallery::new(source.repository_url());
        let mut session = Self {
            source: Arc::new(source),
            gallery: Arc::new(Mutex::new(gallery)),
            library_path: library_path.to_string(),
            options: ODataOptions::images(),
            task: None,
        };

        log_info!(MODULE, "Mounting gallery for {}", session.library_path);
        session.spawn_load().await?;
        Ok(session)
    }

    /// Lock the gallery state
    pub async fn gallery(&self) -> MutexGuard<'_, Gallery> {
        self.gallery.lock().await
    }

    /// Start a new load in the background, aborting any load in flight
    pub async fn spawn_load(&mut self) -> Result<()> {
        if let Some(previous) = self.task.take() {
            if !previous.is_finished() {
                log_debug!(MODULE, "Aborting load in flight");
            }
            previous.abort();
        }

        let ticket = self.gallery.lock().await.begin_load()?;

        let source = Arc::clone(&self.source);
        let gallery = Arc::clone(&self.gallery);
        let path = self.library_path.clone();
        let options = self.options.clone();

        self.task = Some(tokio::spawn(async move {
            run_load(source, gallery, ticket, path, options).await
        }));
        Ok(())
    }

    /// Wait for the load in flight, if any
    ///
    /// Returns `None` when nothing was loading or the load was aborted.
    pub async fn wait(&mut self) -> Option<Result<usize>> {
        let handle = self.task.take()?;
        match handle.await {
            Ok(result) => Some(result),
            Err(e) if e.is_cancelled() => None,
            Err(e) => {
                log_error!(MODULE, "Load task failed: {}", e);
                None
            }
        }
    }

    /// Replace the collection with a fresh load and wait for it
    pub async fn reload(&mut self) -> Option<Result<usize>> {
        if let Err(e) = self.spawn_load().await {
            return Some(Err(e));
        }
        self.wait().await
    }

    /// Tear the view down; a load in flight is aborted and its result lost
    pub async fn unmount(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.gallery.lock().await.unmount();
        log_info!(MODULE, "Gallery unmounted");
    }
}

impl<S: ImageSource> Drop for GallerySession<S> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run_load<S: ImageSource>(
    source: Arc<S>,
    gallery: Arc<Mutex<Gallery>>,
    ticket: LoadTicket,
    path: String,
    options: ODataOptions,
) -> Result<usize> {
    let result = source
        .load_collection(&path, &options)
        .await
        .map(|collection| collection.d.results);

    gallery.lock().await.finish_load(ticket, result)
}
