//! Repository access module
//!
//! Loads content collections from a sensenet-style OData service.

mod models;

pub use models::{Avatar, BinaryField, CollectionData, CollectionResponse, ImageRecord, MediaResource, UserRef};

use std::future::Future;

use reqwest::Client;

use crate::config;
use crate::{log_debug, log_error, log_info};

const MODULE: &str = "repository";

/// Errors from the repository layer
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The repository answered with a non-2xx status
    #[error("Repository returned error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse collection response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// OData query options for a collection request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ODataOptions {
    pub select: Vec<String>,
    pub expand: Vec<String>,
}

impl ODataOptions {
    /// Projection used by the gallery: image fields with the author expanded
    pub fn images() -> Self {
        Self {
            select: config::odata::IMAGE_FIELDS.iter().map(|f| f.to_string()).collect(),
            expand: config::odata::EXPAND_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Query string pairs
    ///
    /// The required fields are merged into a non-empty projection, keeping
    /// the caller's order and dropping duplicates.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if !self.select.is_empty() {
            let mut fields: Vec<&str> = Vec::new();
            for field in config::odata::REQUIRED_FIELDS
                .iter()
                .copied()
                .chain(self.select.iter().map(String::as_str))
            {
                if !fields.contains(&field) {
                    fields.push(field);
                }
            }
            pairs.push(("$select", fields.join(",")));
        }

        if !self.expand.is_empty() {
            pairs.push(("$expand", self.expand.join(",")));
        }

        pairs
    }
}

/// Source of image collections
///
/// The gallery only depends on this shape; [`RepositoryClient`] is the
/// HTTP implementation.
pub trait ImageSource: Send + Sync + 'static {
    /// Base URL that relative paths returned by the source resolve against
    fn repository_url(&self) -> &str;

    fn load_collection(
        &self,
        path: &str,
        options: &ODataOptions,
    ) -> impl Future<Output = Result<CollectionResponse<ImageRecord>, FetchError>> + Send;
}

/// HTTP client for a single repository
pub struct RepositoryClient {
    client: Client,
    repository_url: String,
}

impl RepositoryClient {
    pub fn new(repository_url: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config::app::USER_AGENT)
            .build()?;

        Ok(Self::with_client(client, repository_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    pub fn with_client(client: Client, repository_url: &str) -> Self {
        Self {
            client,
            repository_url: repository_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the collection request for `path` without sending it
    pub fn collection_request(
        &self,
        path: &str,
        options: &ODataOptions,
    ) -> Result<reqwest::Request, FetchError> {
        let path = path.trim_start_matches('/');
        let url = format!(
            "{}/{}/{}",
            self.repository_url,
            config::odata::SERVICE_TOKEN,
            path
        );

        let request = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .query(&options.query_pairs())
            .build()?;

        Ok(request)
    }
}

impl ImageSource for RepositoryClient {
    fn repository_url(&self) -> &str {
        &self.repository_url
    }

    async fn load_collection(
        &self,
        path: &str,
        options: &ODataOptions,
    ) -> Result<CollectionResponse<ImageRecord>, FetchError> {
        let request = self.collection_request(path, options)?;
        log_info!(MODULE, "Loading collection from {}", request.url());

        let response = self.client.execute(request).await.map_err(|e| {
            log_error!(MODULE, "Failed to load collection {}: {}", path, e);
            FetchError::Request(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            log_error!(MODULE, "Repository returned {} for {}", status, path);
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let collection: CollectionResponse<ImageRecord> =
            serde_json::from_slice(&bytes).map_err(|e| {
                log_error!(MODULE, "Failed to parse collection {}: {}", path, e);
                FetchError::Decode(e)
            })?;

        log_debug!(
            MODULE,
            "Collection {} returned {} items",
            path,
            collection.d.results.len()
        );
        Ok(collection)
    }
}
