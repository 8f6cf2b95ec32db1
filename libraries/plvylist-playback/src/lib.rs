//! Plvylist - Playback Session
//!
//! Platform-agnostic playback state for the Plvylist player.
//!
//! This crate provides:
//! - Track selection with previous/next wrap-around rules
//! - Play/pause intent tracking reconciled with media element events
//! - Two-phase seeking (preview while dragging, commit on release)
//! - Volume with mute that preserves the level
//! - Track repeat and confirm-then-shuffle
//! - A pure view projection for rendering
//!
//! # Architecture
//!
//! `plvylist-playback` never touches the DOM. The media element sits behind
//! the [`MediaAdapter`] trait; its observations come back as
//! [`MediaEvent`]s and are the only source of truth for "is it playing".
//! The browser adapter and `wasm-bindgen` wrapper live behind the `wasm`
//! feature.
//!
//! # Example
//!
//! ```rust
//! use plvylist_core::{Catalog, TrackRecord};
//! use plvylist_playback::{MediaAdapter, PlaybackSession, PlayerConfig, SourceId};
//!
//! #[derive(Default)]
//! struct Silent {
//!     time: f64,
//!     volume: f64,
//!     muted: bool,
//!     looping: bool,
//! }
//!
//! impl MediaAdapter for Silent {
//!     fn load(&mut self, _source: SourceId, _uri: &str) {}
//!     fn unload(&mut self) {}
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn current_time(&self) -> f64 { self.time }
//!     fn set_current_time(&mut self, seconds: f64) { self.time = seconds; }
//!     fn volume(&self) -> f64 { self.volume }
//!     fn set_volume(&mut self, level: f64) { self.volume = level; }
//!     fn muted(&self) -> bool { self.muted }
//!     fn set_muted(&mut self, muted: bool) { self.muted = muted; }
//!     fn looping(&self) -> bool { self.looping }
//!     fn set_looping(&mut self, looping: bool) { self.looping = looping; }
//! }
//!
//! let catalog = Catalog::new(vec![
//!     TrackRecord::new("one.mp3"),
//!     TrackRecord::new("two.mp3"),
//! ])?;
//!
//! let mut session = PlaybackSession::with_catalog(Silent::default(), PlayerConfig::default(), catalog);
//!
//! session.next()?;
//! assert_eq!(session.selected_index(), Some(0));
//!
//! session.toggle_mute();
//! assert_eq!(session.volume().display_level(), 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod adapter;
mod config;
mod confirm;
mod error;
mod events;
mod session;
pub mod types;
pub mod view;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use adapter::{MediaAdapter, MediaEvent};
pub use config::{PlayerConfig, DEFAULT_PLACEHOLDER_ARTWORK};
pub use confirm::{AlwaysConfirm, ShuffleConfirmation};
pub use error::{PlaybackError, Result};
pub use events::SessionEvent;
pub use session::PlaybackSession;
pub use types::{NowPlaying, SeekTarget, SessionPhase, SourceId};
pub use view::{format_time, project, PlayerView};
pub use volume::{Volume, VolumeTier, LOW_VOLUME_THRESHOLD};
