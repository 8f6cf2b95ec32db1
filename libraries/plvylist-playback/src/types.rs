//! Core types for the playback session

use plvylist_core::{TrackField, TrackRecord};
use serde::{Deserialize, Serialize};

/// Identity of one `load` issued to the media adapter
///
/// Every track load gets a fresh id. Adapter events that refer to a source
/// carry the id they were produced for, so events from a superseded load can
/// be told apart from events for the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceId(pub u64);

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "source#{}", self.0)
    }
}

/// Conceptual session state, derived from the session's fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Nothing selected
    Empty,

    /// A track is selected and handed to the adapter, duration pending
    Loaded,

    /// Adapter reported the duration; playing or paused
    Ready { playing: bool },
}

/// Target of a seek gesture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SeekTarget {
    /// Fraction of the track duration, clamped to `[0, 1]`
    Ratio(f64),

    /// Absolute position in seconds, clamped to `[0, duration]` when known
    Seconds(f64),
}

impl SeekTarget {
    /// Convert to seconds against an optional duration
    ///
    /// Ratios need a known duration. Absolute times are only clamped when the
    /// duration is known.
    pub fn resolve(self, duration: Option<f64>) -> Option<f64> {
        match self {
            Self::Ratio(ratio) => duration.map(|d| ratio.clamp(0.0, 1.0) * d),
            Self::Seconds(seconds) => {
                let seconds = seconds.max(0.0);
                Some(duration.map_or(seconds, |d| seconds.min(d)))
            }
        }
    }

    pub(crate) fn raw(self) -> f64 {
        match self {
            Self::Ratio(v) | Self::Seconds(v) => v,
        }
    }
}

/// Metadata pushed to "now playing" surfaces outside the component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub album: String,

    /// Track artwork, or the configured placeholder
    pub artwork: String,

    /// Whether `artwork` is the placeholder
    pub placeholder_artwork: bool,
}

impl NowPlaying {
    /// Build display metadata, falling back to the placeholder artwork
    pub fn from_track(track: &TrackRecord, placeholder_artwork: &str) -> Self {
        let artwork = track.field(TrackField::Artwork);

        Self {
            title: track.display_title().to_string(),
            artist: track.display_artist().to_string(),
            album: track.display_album().to_string(),
            artwork: artwork.unwrap_or(placeholder_artwork).to_string(),
            placeholder_artwork: artwork.is_none(),
        }
    }
}
