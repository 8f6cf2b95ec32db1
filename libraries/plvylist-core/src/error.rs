//! Catalog error types for Plvylist
use thiserror::Error;

/// Result type alias using `CatalogLoadError`
pub type Result<T> = std::result::Result<T, CatalogLoadError>;

/// Why a catalog could not be produced
///
/// Cloneable so the playback session can keep the last failure around for
/// the error view while the host still holds its own copy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogLoadError {
    /// Transport failure while fetching the catalog document
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("Catalog request failed with status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// Document was not the expected `{ "tracks": [...] }` shape
    #[error("Malformed catalog: {0}")]
    Malformed(String),

    /// Source produced zero playable tracks
    #[error("Catalog contains no tracks")]
    Empty,

    /// Neither inline data, a URI nor markup was supplied
    #[error("No catalog source configured")]
    NoSource,
}

impl CatalogLoadError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a malformed-document error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

impl From<serde_json::Error> for CatalogLoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
