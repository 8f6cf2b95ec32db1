//! Platform-agnostic media adapter trait
//!
//! Abstracts the host media element (HTML `<audio>` in the browser, a fake in
//! tests). Commands flow from the session into the adapter; observations flow
//! back as [`MediaEvent`]s fed to `PlaybackSession::handle_event`.

use crate::types::SourceId;
use serde::{Deserialize, Serialize};

/// Host media element
///
/// Implementors forward commands to the real element and report what it
/// does through [`MediaEvent`]s. Playback requests are asynchronous: `play`
/// only asks, and the element answers with `PlayStateChanged` or
/// `PlayRejected` later.
pub trait MediaAdapter {
    /// Replace the current source
    ///
    /// The adapter tags every source-scoped event it produces for this load
    /// with `source`. When the previous source is torn down it reports
    /// `SourceCleared` with the previous id, preceded by
    /// `PlayStateChanged { playing: false }` if it was playing.
    fn load(&mut self, source: SourceId, uri: &str);

    /// Drop the current source without loading another one
    fn unload(&mut self);

    /// Request playback to start
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Current position in seconds
    fn current_time(&self) -> f64;

    /// Move the playback position
    fn set_current_time(&mut self, seconds: f64);

    /// Volume level in `[0, 1]`
    fn volume(&self) -> f64;

    /// Set the volume level
    fn set_volume(&mut self, level: f64);

    /// Mute flag
    fn muted(&self) -> bool;

    /// Set the mute flag without touching the level
    fn set_muted(&mut self, muted: bool);

    /// Whether the element repeats the current track
    fn looping(&self) -> bool;

    /// Set the repeat flag
    fn set_looping(&mut self, looping: bool);
}

/// Observations reported by the media adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Metadata for `source` is available
    Ready { source: SourceId, duration: f64 },

    /// Playback position moved
    TimeAdvanced { source: SourceId, position: f64 },

    /// `source` reached its end
    Ended { source: SourceId },

    /// `source` was torn down by a later load or an unload
    SourceCleared { source: SourceId },

    /// Element volume or mute flag changed
    VolumeChanged { level: f64, muted: bool },

    /// Element started or stopped playing
    PlayStateChanged { playing: bool },

    /// A play request for `source` was refused (autoplay policy, decode
    /// failure, or the source being replaced before playback began)
    PlayRejected { source: SourceId, reason: String },
}

impl MediaEvent {
    /// Source this event is scoped to, if any
    pub fn source(&self) -> Option<SourceId> {
        match self {
            Self::Ready { source, .. }
            | Self::TimeAdvanced { source, .. }
            | Self::Ended { source }
            | Self::SourceCleared { source }
            | Self::PlayRejected { source, .. } => Some(*source),
            Self::VolumeChanged { .. } | Self::PlayStateChanged { .. } => None,
        }
    }
}
