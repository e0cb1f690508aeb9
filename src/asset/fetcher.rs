//! Asset fetcher
//!
//! Single-shot retrieval of a binary module asset over HTTP. Each call
//! performs exactly one outbound request: no retries, no caching.

use bytes::Bytes;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::asset::reference::AssetRef;
use crate::config::FetchConfig;

/// Opaque binary payload produced by a successful fetch
///
/// Holds the resource's exact bytes with no transformation applied. Owned
/// by the orchestrator until transferred into the initializer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPayload(Bytes);

impl BinaryPayload {
    /// Wrap raw bytes as a payload
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Payload size in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the payload, yielding its buffer
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl AsRef<[u8]> for BinaryPayload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for BinaryPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl From<Bytes> for BinaryPayload {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

/// Asset retrieval errors
///
/// `NotFound` is kept distinct from `TransportFailure` so the embedder can
/// tell a missing deployment artifact from a broken network path.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Invalid asset reference: {0}")]
    InvalidReference(String),

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Unexpected response status {status} for {reference}")]
    UnexpectedStatus { reference: String, status: u16 },

    #[error("Incomplete response body: {0}")]
    IncompleteBody(String),
}

impl RetrievalError {
    /// Whether the failure means the resource is absent (as opposed to the
    /// transport failing)
    pub fn is_not_found(&self) -> bool {
        matches!(self, RetrievalError::NotFound(_))
    }
}

/// Asset fetcher for retrieving module binaries
///
/// Reusable across fetches; carries only the HTTP client and an optional
/// base URL for resolving relative references.
#[derive(Debug, Clone)]
pub struct AssetFetcher {
    client: Client,
    base_url: Option<String>,
}

impl AssetFetcher {
    /// Create a fetcher with default fetch settings
    pub fn new() -> Self {
        Self::with_config(&FetchConfig::default())
    }

    /// Create a fetcher from fetch configuration
    pub fn with_config(config: &FetchConfig) -> Self {
        let mut builder = Client::builder().timeout(Duration::from_secs(config.timeout_secs));
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let client = builder.build().unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: None,
        }
    }

    /// Set the base URL that relative asset references resolve against
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Fetch the asset's bytes
    ///
    /// Performs exactly one outbound retrieval. Returns the complete
    /// response body on success; a 2xx status with a failed body read is
    /// reported as `IncompleteBody`, never as a short payload.
    pub async fn fetch(&self, asset: &AssetRef) -> Result<BinaryPayload, RetrievalError> {
        let url = asset.resolve(self.base_url.as_deref())?;
        debug!("Fetching module asset from {}", url);

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!("Transport failure fetching {}: {}", url, e);
            RetrievalError::TransportFailure(format!("{}: {}", url, e))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!("Module asset not found: {}", url);
            return Err(RetrievalError::NotFound(asset.as_str().to_string()));
        }
        if !status.is_success() {
            warn!("Unexpected status {} fetching {}", status, url);
            return Err(RetrievalError::UnexpectedStatus {
                reference: asset.as_str().to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RetrievalError::IncompleteBody(format!("{}: {}", url, e)))?;

        info!("Fetched module asset {} ({} bytes)", asset, bytes.len());
        Ok(BinaryPayload::new(bytes))
    }
}

impl Default for AssetFetcher {
    fn default() -> Self {
        Self::new()
    }
}
