//! View projection
//!
//! Pure function from session state to a renderable description. The host
//! renders whatever [`project`] returns; it never reads the media element to
//! decide what to show.

use crate::adapter::MediaAdapter;
use crate::session::PlaybackSession;
use crate::types::NowPlaying;
use crate::volume::VolumeTier;
use plvylist_core::{TrackField, EMPTY_METADATA};
use serde::{Deserialize, Serialize};

/// Icon on the primary action button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionIcon {
    Play,
    Pause,
}

/// One row of the track list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRow {
    pub index: usize,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub active: bool,
}

/// Everything the player shows once a catalog is available
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPanel {
    pub action_icon: ActionIcon,
    pub volume_icon: VolumeTier,

    /// Volume slider position, 0 while muted
    pub volume_slider: f64,

    /// Seek bar position in `[0, 1]`
    pub seek_ratio: f64,

    pub elapsed_text: String,
    pub duration_text: String,

    /// Previous/next/seek stay disabled until playback has started once
    pub transport_disabled: bool,

    pub loop_active: bool,
    pub show_artist: bool,
    pub show_album: bool,
    pub now_playing: NowPlaying,
    pub rows: Vec<TrackRow>,
}

/// What to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PlayerView {
    /// Catalog still pending
    Loading,

    /// Catalog failed to load
    Error { message: String },

    /// Normal player
    Player(PlayerPanel),
}

/// Format seconds as `MM:SS`, flooring both parts
///
/// Minutes are zero-padded to two digits and grow past 99 if needed.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }

    let total = seconds.floor() as u64;

    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Project session state into a view
pub fn project<A: MediaAdapter>(session: &PlaybackSession<A>) -> PlayerView {
    if let Some(err) = session.catalog_error() {
        return PlayerView::Error {
            message: err.to_string(),
        };
    }

    let Some(catalog) = session.catalog() else {
        return PlayerView::Loading;
    };

    let selected = session.selected_index();
    let placeholder = &session.config().placeholder_artwork;

    let now_playing = session.current_track().map_or_else(
        || NowPlaying {
            title: EMPTY_METADATA.to_string(),
            artist: EMPTY_METADATA.to_string(),
            album: EMPTY_METADATA.to_string(),
            artwork: placeholder.clone(),
            placeholder_artwork: true,
        },
        |track| NowPlaying::from_track(track, placeholder),
    );

    let rows = catalog
        .iter()
        .enumerate()
        .map(|(index, track)| TrackRow {
            index,
            title: track.display_title().to_string(),
            artist: track.display_artist().to_string(),
            album: track.display_album().to_string(),
            active: selected == Some(index),
        })
        .collect();

    let elapsed = session.elapsed_seconds();
    let duration = session.duration_seconds();

    let seek_ratio = match duration {
        Some(d) if d > 0.0 => (elapsed / d).clamp(0.0, 1.0),
        _ => 0.0,
    };

    let elapsed_text = if selected.is_some() {
        format_time(elapsed)
    } else {
        EMPTY_METADATA.to_string()
    };

    let duration_text = duration.map_or_else(|| EMPTY_METADATA.to_string(), format_time);

    PlayerView::Player(PlayerPanel {
        action_icon: if session.play_intent() {
            ActionIcon::Pause
        } else {
            ActionIcon::Play
        },
        volume_icon: session.volume().tier(),
        volume_slider: session.volume().display_level(),
        seek_ratio,
        elapsed_text,
        duration_text,
        transport_disabled: !session.has_played(),
        loop_active: session.is_looping(),
        show_artist: catalog.has_field(TrackField::Artist),
        show_album: catalog.has_field(TrackField::Album),
        now_playing,
        rows,
    })
}
