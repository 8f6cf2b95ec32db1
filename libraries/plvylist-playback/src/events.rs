//! Session Events
//!
//! Notifications for the host UI and "now playing" integrations. Events are
//! queued by the session as state changes and drained by the host after each
//! command or adapter event:
//! - Track changes (selection moved)
//! - Play state and volume changes (mirrored from the adapter)
//! - Catalog outcomes
//! - Commands that had nothing to act on

use crate::types::NowPlaying;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    /// Selection moved to a new track
    ///
    /// Hosts push `now_playing` to the platform media session.
    TrackChanged {
        /// Index in the catalog
        index: usize,
        /// Display metadata for the new track
        now_playing: NowPlaying,
    },

    /// The adapter started or stopped playing
    PlayStateChanged {
        /// Whether audio is playing now
        playing: bool,
    },

    /// Duration of the current track became known
    DurationKnown {
        /// Seconds
        duration: f64,
    },

    /// Volume level or mute flag changed
    VolumeChanged {
        /// Level in `[0, 1]`, independent of mute
        level: f64,
        /// Mute flag
        muted: bool,
    },

    /// Repeat flag toggled
    LoopChanged {
        /// Whether the current track repeats
        looping: bool,
    },

    /// The previously highlighted row lost its highlight
    RowDeactivated {
        /// Index of the row
        index: usize,
    },

    /// A new catalog replaced the old one
    CatalogLoaded {
        /// Number of tracks
        count: usize,
    },

    /// Catalog acquisition failed
    CatalogFailed {
        /// Human-readable reason
        message: String,
    },

    /// A command had nothing to act on and was dropped
    CommandIgnored {
        /// Why it was dropped
        reason: String,
    },
}
