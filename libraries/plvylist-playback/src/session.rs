//! Playback session - the player's state machine
//!
//! Owns the catalog, the selection and the media adapter. User commands
//! arrive as method calls and turn into adapter commands; adapter
//! observations arrive through [`PlaybackSession::handle_event`] and are the
//! only thing that changes `is_playing`.

use crate::adapter::{MediaAdapter, MediaEvent};
use crate::config::PlayerConfig;
use crate::confirm::ShuffleConfirmation;
use crate::error::{PlaybackError, Result};
use crate::events::SessionEvent;
use crate::types::{NowPlaying, SeekTarget, SessionPhase, SourceId};
use crate::volume::Volume;
use plvylist_core::{Catalog, CatalogLoadError, TrackRecord};
use rand::Rng;
use tracing::{debug, error, info, warn};

/// Seek gesture in progress
#[derive(Debug, Clone, Copy, PartialEq)]
struct SeekDrag {
    /// Play intent when the drag started
    resume: bool,
}

/// Playback session
///
/// One per player instance. Single-threaded: every mutation goes through
/// `&mut self`, and the session owns its adapter outright.
pub struct PlaybackSession<A: MediaAdapter> {
    adapter: A,
    config: PlayerConfig,

    // Catalog
    catalog: Option<Catalog>,
    catalog_error: Option<CatalogLoadError>,

    // Selection
    selected: Option<usize>,
    current_source: Option<SourceId>,
    next_source_id: u64,
    first_load_done: bool,

    // Sources that were replaced but not yet reported as cleared
    outgoing: Vec<(SourceId, usize)>,
    last_played: Option<usize>,

    // Transport, mirrored from adapter events
    is_playing: bool,
    play_intent: bool,
    has_played: bool,
    looping: bool,
    volume: Volume,
    elapsed: f64,
    duration: Option<f64>,
    seek_drag: Option<SeekDrag>,

    // Event queue for the host
    pending_events: Vec<SessionEvent>,
}

impl<A: MediaAdapter> PlaybackSession<A> {
    /// Create a session around `adapter`
    ///
    /// Pushes the configured starting volume to the adapter and turns
    /// looping off. No catalog is installed yet.
    pub fn new(mut adapter: A, config: PlayerConfig) -> Self {
        let volume = Volume::new(config.starting_volume);

        adapter.set_volume(volume.level());
        adapter.set_muted(false);
        adapter.set_looping(false);

        Self {
            adapter,
            config,
            catalog: None,
            catalog_error: None,
            selected: None,
            current_source: None,
            next_source_id: 0,
            first_load_done: false,
            outgoing: Vec::new(),
            last_played: None,
            is_playing: false,
            play_intent: false,
            has_played: false,
            looping: false,
            volume,
            elapsed: 0.0,
            duration: None,
            seek_drag: None,
            pending_events: Vec::new(),
        }
    }

    /// Create a session with a catalog already installed
    pub fn with_catalog(adapter: A, config: PlayerConfig, catalog: Catalog) -> Self {
        let mut session = Self::new(adapter, config);
        session.set_catalog(catalog);
        session.pending_events.clear();
        session
    }

    // ===== Catalog =====

    /// Install a freshly loaded catalog
    ///
    /// Any active selection is reset first, since indices into the old
    /// catalog mean nothing in the new one.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        if self.selected.is_some() {
            self.reset();
        }

        info!(tracks = catalog.len(), "Catalog loaded");

        let count = catalog.len();
        self.catalog = Some(catalog);
        self.catalog_error = None;
        self.pending_events.push(SessionEvent::CatalogLoaded { count });
    }

    /// Record a failed catalog load
    ///
    /// The current catalog, if any, is kept.
    pub fn catalog_failed(&mut self, err: CatalogLoadError) {
        warn!(error = %err, "Catalog load failed");

        self.pending_events.push(SessionEvent::CatalogFailed {
            message: err.to_string(),
        });
        self.catalog_error = Some(err);
    }

    /// Current catalog
    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    /// Last catalog load failure, cleared by the next successful load
    pub fn catalog_error(&self) -> Option<&CatalogLoadError> {
        self.catalog_error.as_ref()
    }

    // ===== Selection =====

    /// Select the track at `index` and hand it to the adapter
    ///
    /// Resets elapsed time and duration. The very first load of the session
    /// starts at the configured starting time; later loads start at 0.
    /// Does not start playback.
    pub fn select_track(&mut self, index: usize) -> Result<()> {
        let catalog = self.catalog.as_ref().ok_or(PlaybackError::NoCatalog)?;

        let Some(track) = catalog.get(index) else {
            let count = catalog.len();
            error!(index, count, "Track selection out of range");
            return Err(PlaybackError::InvalidSelection { index, count });
        };

        let uri = track.file.clone();
        let now_playing = NowPlaying::from_track(track, &self.config.placeholder_artwork);

        if let (Some(previous), Some(source)) = (self.selected, self.current_source) {
            self.outgoing.push((source, previous));
        }

        let source = SourceId(self.next_source_id);
        self.next_source_id += 1;

        let offset = if self.first_load_done {
            0.0
        } else {
            self.config.starting_time
        };
        self.first_load_done = true;

        self.selected = Some(index);
        self.current_source = Some(source);
        self.duration = None;
        self.seek_drag = None;
        self.elapsed = offset;

        self.adapter.load(source, &uri);
        self.adapter.set_current_time(offset);

        debug!(index, %source, uri = %uri, "Track loaded");

        self.pending_events
            .push(SessionEvent::TrackChanged { index, now_playing });

        Ok(())
    }

    // ===== Transport =====

    /// Toggle between play and pause
    ///
    /// With nothing selected this selects the first track and starts it.
    /// Otherwise it flips the play intent: two calls without an adapter event
    /// in between come back to where they started.
    pub fn play_or_pause(&mut self) -> Result<()> {
        if self.selected.is_none() {
            self.select_track(0)?;
            self.request_play();
            return Ok(());
        }

        if self.play_intent {
            self.request_pause();
        } else {
            self.request_play();
        }

        Ok(())
    }

    /// Step back one track
    ///
    /// From the first track this pauses and restarts it instead.
    pub fn previous(&mut self) -> Result<()> {
        let index = self.selected.ok_or(PlaybackError::NoSelection)?;

        if index == 0 {
            self.request_pause();
            self.select_track(0)?;
            return Ok(());
        }

        let was_playing = self.is_playing;
        self.select_track(index - 1)?;
        if was_playing {
            self.request_play();
        }

        Ok(())
    }

    /// Step forward one track
    ///
    /// From the last track this pauses and wraps to the first without
    /// playing. With nothing selected it selects the first track.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        let Some(index) = self.selected else {
            return self.select_track(0);
        };

        let last = self.catalog_len()?.saturating_sub(1);

        if index >= last {
            self.request_pause();
            self.select_track(0)?;
            return Ok(());
        }

        let was_playing = self.is_playing;
        self.select_track(index + 1)?;
        if was_playing {
            self.request_play();
        }

        Ok(())
    }

    /// React to the current track reaching its end
    ///
    /// Looping tracks are restarted by the adapter itself, so nothing
    /// happens. The last track wraps like [`next`](Self::next) and stays
    /// paused; any other track advances and keeps playing.
    pub fn handle_track_ended(&mut self) -> Result<()> {
        let index = self.selected.ok_or(PlaybackError::NoSelection)?;

        if self.looping {
            debug!("Track ended while looping, adapter restarts it");
            return Ok(());
        }

        let last = self.catalog_len()?.saturating_sub(1);

        if index >= last {
            return self.next();
        }

        self.select_track(index + 1)?;
        self.request_play();
        Ok(())
    }

    /// Track-list row clicked
    ///
    /// Nothing selected: select and play. Playing: switch and keep playing.
    /// Paused: switch only.
    pub fn activate_row(&mut self, index: usize) -> Result<()> {
        let resume = self.selected.is_none() || self.is_playing;

        self.select_track(index)?;
        if resume {
            self.request_play();
        }

        Ok(())
    }

    /// Back to `Empty`: pause, drop the source, forget the selection
    ///
    /// The catalog, volume and loop settings are kept.
    pub fn reset(&mut self) {
        self.adapter.pause();
        self.adapter.unload();

        if let (Some(index), Some(source)) = (self.selected, self.current_source) {
            self.outgoing.push((source, index));
        }

        if self.is_playing {
            self.pending_events
                .push(SessionEvent::PlayStateChanged { playing: false });
        }

        self.selected = None;
        self.current_source = None;
        self.is_playing = false;
        self.play_intent = false;
        self.has_played = false;
        self.elapsed = 0.0;
        self.duration = None;
        self.seek_drag = None;

        info!("Session reset");
    }

    // ===== Seeking =====

    /// Seek bar dragged
    ///
    /// The first preview of a gesture pauses playback and remembers whether
    /// to resume on commit. Only the displayed elapsed time moves; the
    /// adapter position is untouched until [`seek_commit`](Self::seek_commit).
    pub fn seek_preview(&mut self, target: SeekTarget) -> Result<()> {
        let seconds = self.resolve_seek(target)?;

        if self.seek_drag.is_none() {
            self.seek_drag = Some(SeekDrag {
                resume: self.play_intent,
            });

            if self.play_intent || self.is_playing {
                self.request_pause();
            }
        }

        self.elapsed = seconds;
        Ok(())
    }

    /// Seek bar released
    ///
    /// Moves the adapter position. Playback resumes only if it was wanted
    /// when the drag began.
    pub fn seek_commit(&mut self, target: SeekTarget) -> Result<()> {
        let seconds = self.resolve_seek(target)?;

        self.adapter.set_current_time(seconds);
        self.elapsed = seconds;

        if let Some(drag) = self.seek_drag.take() {
            if drag.resume {
                self.request_play();
            }
        }

        debug!(seconds, "Seek committed");
        Ok(())
    }

    /// Jump forward by the configured skip step
    pub fn skip_forward(&mut self) -> Result<()> {
        self.skip_by(self.config.skip_forward_seconds)
    }

    /// Jump backward by the configured skip step
    pub fn skip_backward(&mut self) -> Result<()> {
        self.skip_by(-self.config.skip_backward_seconds)
    }

    fn skip_by(&mut self, delta: f64) -> Result<()> {
        if self.selected.is_none() {
            return Err(PlaybackError::NoSelection);
        }

        let target = SeekTarget::Seconds(self.adapter.current_time() + delta);
        self.seek_commit(target)
    }

    fn resolve_seek(&self, target: SeekTarget) -> Result<f64> {
        if self.selected.is_none() {
            return Err(PlaybackError::NoSelection);
        }

        if !target.raw().is_finite() {
            return Err(PlaybackError::InvalidSeekTarget(target.raw()));
        }

        target
            .resolve(self.duration)
            .ok_or(PlaybackError::DurationUnknown)
    }

    // ===== Volume / loop =====

    /// Set the volume level, clamped to `[0, 1]`
    ///
    /// The mute flag is left alone.
    pub fn set_volume(&mut self, level: f64) {
        self.volume.set_level(level);
        self.adapter.set_volume(self.volume.level());
        self.emit_volume_changed();
    }

    /// Mute or unmute, keeping the level
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.adapter.set_muted(self.volume.is_muted());
        self.emit_volume_changed();
    }

    /// Flip track repeat
    pub fn toggle_loop(&mut self) {
        self.looping = !self.looping;
        self.adapter.set_looping(self.looping);

        debug!(looping = self.looping, "Loop toggled");
        self.pending_events.push(SessionEvent::LoopChanged {
            looping: self.looping,
        });
    }

    // ===== Shuffle =====

    /// Shuffle the catalog and start over at the first track
    ///
    /// Asks `confirm` first; declining leaves everything as it was and
    /// returns `Ok(false)`. Playback resumes only if it was playing.
    pub fn shuffle_and_restart<C>(&mut self, confirm: &mut C) -> Result<bool>
    where
        C: ShuffleConfirmation + ?Sized,
    {
        self.shuffle_and_restart_with(confirm, &mut rand::thread_rng())
    }

    /// [`shuffle_and_restart`](Self::shuffle_and_restart) with a caller-supplied RNG
    pub fn shuffle_and_restart_with<C, R>(&mut self, confirm: &mut C, rng: &mut R) -> Result<bool>
    where
        C: ShuffleConfirmation + ?Sized,
        R: Rng + ?Sized,
    {
        let catalog = self.catalog.as_ref().ok_or(PlaybackError::NoCatalog)?;

        if !confirm.confirm_shuffle() {
            debug!("Shuffle declined");
            return Ok(false);
        }

        let shuffled = catalog.shuffled_with(rng);
        let was_playing = self.is_playing;

        self.catalog = Some(shuffled);
        self.select_track(0)?;

        if was_playing {
            self.request_play();
        } else {
            self.play_intent = false;
        }

        info!(was_playing, "Catalog shuffled");
        Ok(true)
    }

    // ===== Adapter events =====

    /// Apply an adapter observation
    ///
    /// Returns `false` when the event was discarded: source-scoped events
    /// for a superseded source, position updates during a seek drag, or a
    /// play report with nothing selected.
    pub fn handle_event(&mut self, event: MediaEvent) -> bool {
        match event {
            MediaEvent::Ready { source, duration } => {
                if !self.is_current(source) {
                    debug!(%source, "Discarding stale ready event");
                    return false;
                }

                if duration.is_finite() && duration >= 0.0 {
                    self.duration = Some(duration);
                    self.pending_events
                        .push(SessionEvent::DurationKnown { duration });
                } else {
                    debug!(duration, "Adapter reported no usable duration");
                }
                true
            }

            MediaEvent::TimeAdvanced { source, position } => {
                if !self.is_current(source) || self.seek_drag.is_some() {
                    return false;
                }

                self.elapsed = if position.is_finite() {
                    position.max(0.0)
                } else {
                    0.0
                };
                true
            }

            MediaEvent::Ended { source } => {
                if !self.is_current(source) {
                    debug!(%source, "Discarding stale ended event");
                    return false;
                }

                if let Some(duration) = self.duration {
                    self.elapsed = duration;
                }

                if let Err(err) = self.handle_track_ended() {
                    warn!(error = %err, "Could not advance after track end");
                }
                true
            }

            MediaEvent::SourceCleared { source } => {
                let Some(position) = self.outgoing.iter().position(|(id, _)| *id == source)
                else {
                    debug!(%source, "Source cleared with no pending record");
                    return false;
                };

                let (_, index) = self.outgoing.remove(position);
                self.last_played = Some(index);

                if self.selected != Some(index) {
                    self.pending_events
                        .push(SessionEvent::RowDeactivated { index });
                }
                true
            }

            MediaEvent::VolumeChanged { level, muted } => {
                let before = self.volume.clone();

                self.volume.set_level(level);
                self.volume.set_muted(muted);

                if self.volume != before {
                    self.emit_volume_changed();
                }
                true
            }

            MediaEvent::PlayStateChanged { playing } => {
                if playing && self.selected.is_none() {
                    warn!("Adapter reports playing with nothing selected");
                    return false;
                }

                if playing {
                    self.has_played = true;
                    if self.seek_drag.is_none() {
                        self.play_intent = true;
                    }
                } else if self.seek_drag.is_none() {
                    self.play_intent = false;
                }

                if self.is_playing != playing {
                    self.is_playing = playing;
                    debug!(playing, "Play state changed");
                    self.pending_events
                        .push(SessionEvent::PlayStateChanged { playing });
                }
                true
            }

            MediaEvent::PlayRejected { source, reason } => {
                if !self.is_current(source) {
                    debug!(%source, reason = %reason, "Discarding stale play rejection");
                    return false;
                }

                warn!(reason = %reason, "Play request rejected");

                self.play_intent = false;
                if self.is_playing {
                    self.is_playing = false;
                    self.pending_events
                        .push(SessionEvent::PlayStateChanged { playing: false });
                }

                self.pending_events
                    .push(SessionEvent::CommandIgnored { reason });
                true
            }
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// The host calls this after each command or adapter event and forwards
    /// the events to its UI.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check whether events are waiting
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Queries =====

    /// Selected catalog index, `None` when nothing is selected
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Selected track record
    pub fn current_track(&self) -> Option<&TrackRecord> {
        let index = self.selected?;
        self.catalog.as_ref()?.get(index)
    }

    /// Source id of the current load
    pub fn current_source(&self) -> Option<SourceId> {
        self.current_source
    }

    /// Index of the track whose source was most recently torn down
    pub fn last_played_index(&self) -> Option<usize> {
        self.last_played
    }

    /// Whether the adapter last reported playing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether the user last asked for playback
    pub fn play_intent(&self) -> bool {
        self.play_intent
    }

    /// Whether playback has started at least once since the last reset
    pub fn has_played(&self) -> bool {
        self.has_played
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// Displayed elapsed time in seconds
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }

    /// Track duration, `None` until the adapter reports it
    pub fn duration_seconds(&self) -> Option<f64> {
        self.duration
    }

    /// Whether a seek drag is in progress
    pub fn is_seeking(&self) -> bool {
        self.seek_drag.is_some()
    }

    /// Conceptual state
    pub fn phase(&self) -> SessionPhase {
        match (self.selected, self.duration) {
            (None, _) => SessionPhase::Empty,
            (Some(_), None) => SessionPhase::Loaded,
            (Some(_), Some(_)) => SessionPhase::Ready {
                playing: self.is_playing,
            },
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    // ===== Helpers =====

    fn is_current(&self, source: SourceId) -> bool {
        self.current_source == Some(source)
    }

    fn catalog_len(&self) -> Result<usize> {
        self.catalog
            .as_ref()
            .map(Catalog::len)
            .ok_or(PlaybackError::NoCatalog)
    }

    fn request_play(&mut self) {
        self.play_intent = true;
        self.adapter.play();
    }

    fn request_pause(&mut self) {
        self.play_intent = false;
        self.adapter.pause();
    }

    fn emit_volume_changed(&mut self) {
        self.pending_events.push(SessionEvent::VolumeChanged {
            level: self.volume.level(),
            muted: self.volume.is_muted(),
        });
    }
}

impl<A: MediaAdapter + std::fmt::Debug> std::fmt::Debug for PlaybackSession<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("adapter", &self.adapter)
            .field("selected", &self.selected)
            .field("current_source", &self.current_source)
            .field("is_playing", &self.is_playing)
            .field("play_intent", &self.play_intent)
            .field("looping", &self.looping)
            .field("volume", &self.volume)
            .field("elapsed", &self.elapsed)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::MockShuffleConfirmation;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Adapter that only remembers the last command state
    #[derive(Debug, Default)]
    struct NullAdapter {
        loads: Vec<(SourceId, String)>,
        plays: usize,
        pauses: usize,
        time: f64,
        volume: f64,
        muted: bool,
        looping: bool,
    }

    impl MediaAdapter for NullAdapter {
        fn load(&mut self, source: SourceId, uri: &str) {
            self.loads.push((source, uri.to_string()));
        }
        fn unload(&mut self) {}
        fn play(&mut self) {
            self.plays += 1;
        }
        fn pause(&mut self) {
            self.pauses += 1;
        }
        fn current_time(&self) -> f64 {
            self.time
        }
        fn set_current_time(&mut self, seconds: f64) {
            self.time = seconds;
        }
        fn volume(&self) -> f64 {
            self.volume
        }
        fn set_volume(&mut self, level: f64) {
            self.volume = level;
        }
        fn muted(&self) -> bool {
            self.muted
        }
        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }
        fn looping(&self) -> bool {
            self.looping
        }
        fn set_looping(&mut self, looping: bool) {
            self.looping = looping;
        }
    }

    fn catalog(n: usize) -> Catalog {
        Catalog::new(
            (0..n)
                .map(|i| TrackRecord::new(format!("t{i}.mp3")).with_title(format!("Track {i}")))
                .collect(),
        )
        .unwrap()
    }

    fn session(n: usize) -> PlaybackSession<NullAdapter> {
        PlaybackSession::with_catalog(NullAdapter::default(), PlayerConfig::default(), catalog(n))
    }

    #[test]
    fn initial_state() {
        let s = session(3);
        assert_eq!(s.selected_index(), None);
        assert!(!s.is_playing());
        assert!(!s.is_looping());
        assert_eq!(s.volume().level(), 0.5);
        assert_eq!(s.adapter().volume, 0.5);
        assert_eq!(s.phase(), SessionPhase::Empty);
        assert!(!s.has_pending_events());
    }

    #[test]
    fn select_out_of_range_leaves_state() {
        let mut s = session(2);
        s.select_track(1).unwrap();

        let err = s.select_track(5).unwrap_err();
        assert_eq!(err, PlaybackError::InvalidSelection { index: 5, count: 2 });
        assert_eq!(s.selected_index(), Some(1));
        assert_eq!(s.adapter().loads.len(), 1);
    }

    #[test]
    fn select_without_catalog() {
        let mut s = PlaybackSession::new(NullAdapter::default(), PlayerConfig::default());
        assert_eq!(s.select_track(0), Err(PlaybackError::NoCatalog));
        assert_eq!(s.play_or_pause(), Err(PlaybackError::NoCatalog));
        assert_eq!(s.next(), Err(PlaybackError::NoCatalog));
    }

    #[test]
    fn starting_time_applies_to_first_load_only() {
        let config = PlayerConfig {
            starting_time: 12.0,
            ..Default::default()
        };
        let mut s = PlaybackSession::with_catalog(NullAdapter::default(), config, catalog(3));

        s.select_track(0).unwrap();
        assert_eq!(s.adapter().time, 12.0);
        assert_eq!(s.elapsed_seconds(), 12.0);

        s.select_track(1).unwrap();
        assert_eq!(s.adapter().time, 0.0);
        assert_eq!(s.elapsed_seconds(), 0.0);
    }

    #[test]
    fn previous_without_selection_is_sentinel() {
        let mut s = session(3);
        assert_eq!(s.previous(), Err(PlaybackError::NoSelection));
        assert!(s.adapter().loads.is_empty());
    }

    #[test]
    fn declined_shuffle_changes_nothing() {
        let mut s = session(4);
        s.select_track(2).unwrap();
        let before: Vec<_> = s.catalog().unwrap().tracks().to_vec();

        let mut confirm = MockShuffleConfirmation::new();
        confirm.expect_confirm_shuffle().times(1).return_const(false);

        assert_eq!(s.shuffle_and_restart(&mut confirm), Ok(false));
        assert_eq!(s.catalog().unwrap().tracks(), before.as_slice());
        assert_eq!(s.selected_index(), Some(2));
    }

    #[test]
    fn accepted_shuffle_restarts_at_zero() {
        let mut s = session(6);
        s.select_track(4).unwrap();

        let mut confirm = MockShuffleConfirmation::new();
        confirm.expect_confirm_shuffle().times(1).return_const(true);

        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(s.shuffle_and_restart_with(&mut confirm, &mut rng), Ok(true));
        assert_eq!(s.selected_index(), Some(0));
        assert_eq!(s.catalog().unwrap().len(), 6);
        assert_eq!(s.adapter().plays, 0);
    }

    #[test]
    fn shuffle_without_catalog_does_not_ask() {
        let mut s = PlaybackSession::new(NullAdapter::default(), PlayerConfig::default());

        let mut confirm = MockShuffleConfirmation::new();
        confirm.expect_confirm_shuffle().times(0);

        assert_eq!(s.shuffle_and_restart(&mut confirm), Err(PlaybackError::NoCatalog));
    }

    #[test]
    fn ratio_seek_needs_duration() {
        let mut s = session(1);
        s.select_track(0).unwrap();

        assert_eq!(
            s.seek_commit(SeekTarget::Ratio(0.5)),
            Err(PlaybackError::DurationUnknown)
        );
        assert!(s.seek_commit(SeekTarget::Seconds(3.0)).is_ok());
        assert_eq!(s.adapter().time, 3.0);
    }

    #[test]
    fn nan_seek_rejected() {
        let mut s = session(1);
        s.select_track(0).unwrap();
        assert!(matches!(
            s.seek_preview(SeekTarget::Seconds(f64::NAN)),
            Err(PlaybackError::InvalidSeekTarget(_))
        ));
        assert!(!s.is_seeking());
    }

    #[test]
    fn phase_follows_events() {
        let mut s = session(2);
        s.select_track(0).unwrap();
        assert_eq!(s.phase(), SessionPhase::Loaded);

        let source = s.current_source().unwrap();
        assert!(s.handle_event(MediaEvent::Ready { source, duration: 90.0 }));
        assert_eq!(s.phase(), SessionPhase::Ready { playing: false });

        assert!(s.handle_event(MediaEvent::PlayStateChanged { playing: true }));
        assert_eq!(s.phase(), SessionPhase::Ready { playing: true });
    }

    #[test]
    fn play_report_without_selection_is_ignored() {
        let mut s = session(2);
        assert!(!s.handle_event(MediaEvent::PlayStateChanged { playing: true }));
        assert!(!s.is_playing());
    }

    #[test]
    fn set_catalog_resets_selection() {
        let mut s = session(3);
        s.select_track(2).unwrap();
        s.drain_events();

        s.set_catalog(catalog(5));
        assert_eq!(s.selected_index(), None);
        assert!(s
            .drain_events()
            .contains(&SessionEvent::CatalogLoaded { count: 5 }));
    }

    #[test]
    fn catalog_failure_keeps_catalog() {
        let mut s = session(3);
        s.catalog_failed(CatalogLoadError::Status { status: 404 });

        assert_eq!(s.catalog().unwrap().len(), 3);
        assert_eq!(
            s.catalog_error(),
            Some(&CatalogLoadError::Status { status: 404 })
        );

        s.set_catalog(catalog(2));
        assert_eq!(s.catalog_error(), None);
    }
}
