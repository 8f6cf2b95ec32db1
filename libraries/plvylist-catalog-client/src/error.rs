//! Error types for the catalog client.

use plvylist_core::CatalogLoadError;
use thiserror::Error;

/// Errors that can occur while fetching a catalog.
#[derive(Error, Debug)]
pub enum CatalogClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server error ({status})")]
    Status { status: u16 },

    /// Catalog URI is not an absolute http(s) URL
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Document arrived but is not a usable catalog
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),

    /// A later load replaced this one before it finished
    #[error("Catalog load superseded")]
    Superseded,
}

impl CatalogClientError {
    /// Convert to the error the playback session understands
    ///
    /// `Superseded` has no counterpart: a replaced load must not reach the
    /// session at all.
    pub fn into_load_error(self) -> Option<CatalogLoadError> {
        match self {
            Self::Request(err) => Some(CatalogLoadError::network(err.to_string())),
            Self::Status { status } => Some(CatalogLoadError::Status { status }),
            Self::InvalidUrl(msg) => Some(CatalogLoadError::network(format!("invalid URL: {msg}"))),
            Self::Catalog(err) => Some(err),
            Self::Superseded => None,
        }
    }

    /// Whether this load was replaced by a newer one
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}

/// Result type for catalog client operations.
pub type Result<T> = std::result::Result<T, CatalogClientError>;
