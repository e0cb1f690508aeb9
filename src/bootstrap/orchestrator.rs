//! Bootstrap orchestrator
//!
//! Runs the two-stage pipeline: fetch the module asset, then hand the
//! payload to the initializer. Stage ordering is strict: the initializer
//! never runs after a failed fetch, and failures at either stage propagate
//! to the caller without retry or fallback.

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::asset::{AssetFetcher, AssetRef, RetrievalError};
use crate::bootstrap::initializer::{InitializeError, Initializer};
use crate::config::BootstrapConfig;

/// Bootstrap pipeline errors
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Asset retrieval failed; the initializer was never invoked
    #[error("Asset retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    /// The initializer rejected the fetched payload
    #[error("Module initialization failed: {0}")]
    Initialization(#[from] InitializeError),
}

impl BootstrapError {
    /// Pipeline stage the failure originated from
    pub fn stage(&self) -> &'static str {
        match self {
            BootstrapError::Retrieval(_) => "retrieval",
            BootstrapError::Initialization(_) => "initialization",
        }
    }
}

/// Bootstrap orchestrator
///
/// Holds no state across invocations; each [`bootstrap`](Self::bootstrap)
/// call is an independent pipeline instance, so concurrent bootstraps of
/// different assets through one orchestrator do not interfere.
#[derive(Debug, Clone)]
pub struct Bootstrapper {
    fetcher: AssetFetcher,
}

impl Bootstrapper {
    /// Create an orchestrator around an asset fetcher
    pub fn new(fetcher: AssetFetcher) -> Self {
        Self { fetcher }
    }

    /// Create an orchestrator from loader configuration
    pub fn from_config(config: &BootstrapConfig) -> Self {
        let mut fetcher = AssetFetcher::with_config(&config.fetch);
        if let Some(base_url) = &config.asset.base_url {
            fetcher = fetcher.with_base_url(base_url.clone());
        }
        Self { fetcher }
    }

    /// The fetcher this orchestrator retrieves assets with
    pub fn fetcher(&self) -> &AssetFetcher {
        &self.fetcher
    }

    /// Run the bootstrap pipeline for `asset`
    ///
    /// Fetches the asset's bytes, then invokes `initializer` with the
    /// complete payload. The initializer is invoked at most once, and only
    /// after a successful fetch.
    pub async fn bootstrap<I: Initializer>(
        &self,
        asset: &AssetRef,
        initializer: &I,
    ) -> Result<I::Handle, BootstrapError> {
        let pipeline_id = Uuid::new_v4();
        info!("Bootstrapping module {} (pipeline {})", asset, pipeline_id);

        let payload = self.fetcher.fetch(asset).await.map_err(|e| {
            warn!("Pipeline {} failed during retrieval: {}", pipeline_id, e);
            e
        })?;

        debug!(
            "Pipeline {}: handing {} byte payload to initializer",
            pipeline_id,
            payload.len()
        );

        let handle = initializer.initialize(payload).await.map_err(|e| {
            warn!("Pipeline {} failed during initialization: {}", pipeline_id, e);
            e
        })?;

        info!("Pipeline {}: module {} initialized", pipeline_id, asset);
        Ok(handle)
    }
}

/// Bootstrap using the asset reference named in `config`
///
/// Convenience for embedders that bake the asset location into their
/// deployment configuration.
pub async fn bootstrap_from_config<I: Initializer>(
    config: &BootstrapConfig,
    initializer: &I,
) -> Result<I::Handle, BootstrapError> {
    let asset = AssetRef::new(config.asset.reference.clone())?;
    Bootstrapper::from_config(config)
        .bootstrap(&asset, initializer)
        .await
}
