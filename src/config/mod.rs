//! Configuration for the bootstrap loader
//!
//! Handles configuration loading, validation, and defaults. The loader has
//! no command-line surface of its own: the embedding code supplies a
//! `BootstrapConfig` directly, loads one from a TOML file, or reads it from
//! `BOOTSTRAP_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use crate::utils::{env_bool, env_int, env_opt};

/// Asset location configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Location of the module binary (absolute URL, or a path relative to `base_url`)
    pub reference: String,

    /// Base URL that relative references resolve against
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Fetch behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with the retrieval request
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter (e.g. "info", "module_bootstrap=debug")
    #[serde(default)]
    pub filter: Option<String>,

    /// Emit JSON-formatted logs (requires the `json-logging` feature)
    #[serde(default)]
    pub json_format: bool,
}

/// Loader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Asset to bootstrap
    pub asset: AssetConfig,

    /// Fetch behavior
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Logging setup (None leaves logging to the embedder)
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

impl BootstrapConfig {
    /// Create a configuration for a single asset reference, with defaults
    /// for everything else
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            asset: AssetConfig {
                reference: reference.into(),
                base_url: None,
            },
            fetch: FetchConfig::default(),
            logging: None,
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow::anyhow!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            )
        })?;

        let config: BootstrapConfig = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `BOOTSTRAP_*` environment variables
    ///
    /// `BOOTSTRAP_ASSET_URL` is required; `BOOTSTRAP_BASE_URL`,
    /// `BOOTSTRAP_FETCH_TIMEOUT_SECS`, `BOOTSTRAP_USER_AGENT`,
    /// `BOOTSTRAP_LOG_FILTER`, and `BOOTSTRAP_LOG_JSON` are optional.
    pub fn from_env() -> anyhow::Result<Self> {
        let reference = env_opt("BOOTSTRAP_ASSET_URL")
            .ok_or_else(|| anyhow::anyhow!("BOOTSTRAP_ASSET_URL must be set"))?;

        let logging = env_opt("BOOTSTRAP_LOG_FILTER").map(|filter| LoggingConfig {
            filter: Some(filter),
            json_format: env_bool("BOOTSTRAP_LOG_JSON"),
        });

        let config = Self {
            asset: AssetConfig {
                reference,
                base_url: env_opt("BOOTSTRAP_BASE_URL"),
            },
            fetch: FetchConfig {
                timeout_secs: env_int("BOOTSTRAP_FETCH_TIMEOUT_SECS")
                    .unwrap_or_else(default_timeout_secs),
                user_agent: env_opt("BOOTSTRAP_USER_AGENT"),
            },
            logging,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.asset.reference.is_empty() {
            return Err(anyhow::anyhow!("Asset reference cannot be empty"));
        }

        if let Some(base_url) = &self.asset.base_url {
            Url::parse(base_url)
                .map_err(|e| anyhow::anyhow!("Invalid base URL '{}': {}", base_url, e))?;
        }

        if self.fetch.timeout_secs == 0 {
            return Err(anyhow::anyhow!("Fetch timeout must be greater than 0"));
        }

        Ok(())
    }
}
