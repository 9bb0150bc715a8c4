//! Application configuration
//!
//! Compile-time constants plus the runtime [`Settings`] that pick which
//! repository and image library the gallery shows.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{GalleryError, Result};
use crate::{log_debug, log_info};

const MODULE: &str = "config";

pub mod app {
    /// Application name, also the settings directory name
    pub const NAME: &str = "gallery-viewer";
    pub const USER_AGENT: &str = concat!("Gallery-Viewer/", env!("CARGO_PKG_VERSION"));
    pub const SETTINGS_FILE: &str = "settings.toml";
}

pub mod repository {
    /// Repository used when nothing else is configured
    pub const DEFAULT_URL: &str = "https://dev.demo.sensenet.com";
    pub const PORTAL_ROOT: &str = "/Root";
    /// Image library shown by the gallery, relative to the portal root
    pub const IMAGE_LIBRARY: &str = "/Content/IT/ImageLibrary";

    pub const ENV_URL: &str = "GALLERY_REPOSITORY_URL";
    pub const ENV_LIBRARY: &str = "GALLERY_LIBRARY_PATH";
}

pub mod odata {
    pub const SERVICE_TOKEN: &str = "odata.svc";

    /// Fields the gallery asks for
    pub const IMAGE_FIELDS: &[&str] = &[
        "Binary",
        "DisplayName",
        "Description",
        "CreationDate",
        "CreatedBy",
        "Height",
        "ModificationDate",
        "Size",
        "Width",
    ];

    /// Reference fields returned inline instead of as deferred links
    pub const EXPAND_FIELDS: &[&str] = &["CreatedBy"];

    /// Fields the repository client always adds to a projection
    pub const REQUIRED_FIELDS: &[&str] = &["Id", "Path", "Name", "Type"];
}

/// Runtime settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub repository_url: String,
    pub library_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repository_url: repository::DEFAULT_URL.to_string(),
            library_path: format!("{}{}", repository::PORTAL_ROOT, repository::IMAGE_LIBRARY),
        }
    }
}

impl Settings {
    /// Default location of the settings file
    pub fn default_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(app::NAME).join(app::SETTINGS_FILE))
    }

    /// Parse settings from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| GalleryError::Config(format!("{}", e)))
    }

    /// Load settings from a file, falling back to defaults if it doesn't exist
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            log_debug!(MODULE, "No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        log_info!(MODULE, "Loading settings from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            GalleryError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(repository::ENV_URL) {
            log_debug!(MODULE, "{} overrides repository URL", repository::ENV_URL);
            self.repository_url = url;
        }
        if let Some(path) = lookup(repository::ENV_LIBRARY) {
            log_debug!(MODULE, "{} overrides library path", repository::ENV_LIBRARY);
            self.library_path = path;
        }
    }

    /// Apply command line overrides
    pub fn apply_overrides(&mut self, repository_url: Option<String>, library_path: Option<String>) {
        if let Some(url) = repository_url {
            self.repository_url = url;
        }
        if let Some(path) = library_path {
            self.library_path = path;
        }
    }

    /// Validate and normalize
    ///
    /// The repository URL must be http(s) and loses any trailing slash;
    /// the library path must be absolute and loses trailing slashes too,
    /// except for the root path `/`.
    pub fn validate(mut self) -> Result<Self> {
        let url = reqwest::Url::parse(self.repository_url.trim()).map_err(|e| {
            GalleryError::Config(format!("Invalid repository URL '{}': {}", self.repository_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(GalleryError::Config(format!(
                "Repository URL must use http or https: {}",
                self.repository_url
            )));
        }

        self.repository_url = url.as_str().trim_end_matches('/').to_string();

        let library = self.library_path.trim();
        if !library.starts_with('/') {
            return Err(GalleryError::Config(format!(
                "Library path must start with '/': {}",
                self.library_path
            )));
        }
        // "/" is the repository root and stays as is
        let trimmed = library.trim_end_matches('/');
        self.library_path = if trimmed.is_empty() { "/" } else { trimmed }.to_string();

        Ok(self)
    }
}
