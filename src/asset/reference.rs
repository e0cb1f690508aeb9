//! Asset references
//!
//! Parsing, validation, and resolution of module asset locations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::asset::fetcher::RetrievalError;
use crate::utils::{ensure, ensure_fmt};

/// Reference to a binary module asset
///
/// Either an absolute `http(s)` URL or a path relative to a base URL
/// supplied at resolution time. Validated at construction so malformed
/// references are rejected before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    /// Create a validated asset reference
    pub fn new(reference: impl Into<String>) -> Result<Self, RetrievalError> {
        let reference = reference.into();

        ensure(!reference.is_empty(), "Asset reference cannot be empty")
            .map_err(RetrievalError::InvalidReference)?;
        ensure_fmt(!reference.chars().any(char::is_whitespace), || {
            format!("Asset reference '{}' contains whitespace", reference)
        })
        .map_err(RetrievalError::InvalidReference)?;

        Ok(Self(reference))
    }

    /// The reference as originally supplied
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve the reference to a fetchable URL
    ///
    /// Absolute `http(s)` references pass through unchanged. Relative
    /// references are joined against `base_url`; without a base they are
    /// rejected. Any other scheme is rejected: assets must be reachable by
    /// the same mechanism that serves the loader itself.
    pub fn resolve(&self, base_url: Option<&str>) -> Result<Url, RetrievalError> {
        if let Ok(url) = Url::parse(&self.0) {
            ensure_fmt(matches!(url.scheme(), "http" | "https"), || {
                format!(
                    "Asset reference '{}' has unsupported scheme '{}'",
                    self.0,
                    url.scheme()
                )
            })
            .map_err(RetrievalError::InvalidReference)?;
            return Ok(url);
        }

        let base = base_url.ok_or_else(|| {
            RetrievalError::InvalidReference(format!(
                "Relative asset reference '{}' requires a base URL",
                self.0
            ))
        })?;

        let base = Url::parse(base).map_err(|e| {
            RetrievalError::InvalidReference(format!("Invalid base URL '{}': {}", base, e))
        })?;

        base.join(&self.0).map_err(|e| {
            RetrievalError::InvalidReference(format!(
                "Cannot resolve '{}' against '{}': {}",
                self.0, base, e
            ))
        })
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AssetRef {
    type Err = RetrievalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
