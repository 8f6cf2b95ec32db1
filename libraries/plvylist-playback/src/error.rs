//! Error types for the playback session

use thiserror::Error;

/// Playback errors
///
/// Most variants are sentinels for operations that had nothing to act on.
/// UI handlers can drop them with `.ok()`; none of them leave the session in
/// a different state than before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// Operation needs a selected track and none has been chosen yet
    #[error("No track selected")]
    NoSelection,

    /// No catalog has been loaded
    #[error("No catalog loaded")]
    NoCatalog,

    /// Index outside the catalog; a caller bug rather than a user action
    #[error("Invalid selection: index {index} with {count} tracks")]
    InvalidSelection { index: usize, count: usize },

    /// Seek by ratio before the adapter reported a duration
    #[error("Track duration not known yet")]
    DurationUnknown,

    /// Seek target was NaN or infinite
    #[error("Invalid seek target: {0}")]
    InvalidSeekTarget(f64),

    /// Player configuration could not be read
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<config::ConfigError> for PlaybackError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
