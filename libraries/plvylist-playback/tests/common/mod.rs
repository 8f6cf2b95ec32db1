//! Shared helpers for playback session tests

#![allow(dead_code)]

use plvylist_core::{Catalog, TrackRecord};
use plvylist_playback::{MediaAdapter, MediaEvent, PlaybackSession, PlayerConfig, SourceId};
use std::collections::VecDeque;
use std::sync::Once;

static INIT: Once = Once::new();

/// Install a test subscriber once per binary
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Command received by the fake adapter
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(String),
    Unload,
    Play,
    Pause,
    Seek(f64),
    Volume(f64),
    Muted(bool),
    Loop(bool),
}

/// Deterministic stand-in for a media element
///
/// Records every command and queues the events a well-behaved element would
/// fire in response. Nothing is delivered until the test calls [`settle`].
#[derive(Debug, Default)]
pub struct FakeAdapter {
    pub commands: Vec<Command>,
    pub events: VecDeque<MediaEvent>,
    pub current: Option<SourceId>,
    pub playing: bool,
    pub reject_play: bool,
    pub time: f64,
    pub volume: f64,
    pub muted: bool,
    pub looping: bool,
}

impl FakeAdapter {
    pub fn loads(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Load(uri) => Some(uri.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, command: &Command) -> usize {
        self.commands.iter().filter(|c| *c == command).count()
    }

    pub fn play_count(&self) -> usize {
        self.count(&Command::Play)
    }

    fn stop(&mut self) {
        if self.playing {
            self.playing = false;
            self.events
                .push_back(MediaEvent::PlayStateChanged { playing: false });
        }
    }

    fn echo_volume(&mut self) {
        self.events.push_back(MediaEvent::VolumeChanged {
            level: self.volume,
            muted: self.muted,
        });
    }
}

impl MediaAdapter for FakeAdapter {
    fn load(&mut self, source: SourceId, uri: &str) {
        self.commands.push(Command::Load(uri.to_string()));
        self.stop();

        if let Some(previous) = self.current.replace(source) {
            self.events
                .push_back(MediaEvent::SourceCleared { source: previous });
        }
        self.time = 0.0;
    }

    fn unload(&mut self) {
        self.commands.push(Command::Unload);
        self.stop();

        if let Some(previous) = self.current.take() {
            self.events
                .push_back(MediaEvent::SourceCleared { source: previous });
        }
    }

    fn play(&mut self) {
        self.commands.push(Command::Play);

        if self.reject_play {
            if let Some(source) = self.current {
                self.events.push_back(MediaEvent::PlayRejected {
                    source,
                    reason: "NotAllowedError".to_string(),
                });
            }
        } else if !self.playing {
            self.playing = true;
            self.events
                .push_back(MediaEvent::PlayStateChanged { playing: true });
        }
    }

    fn pause(&mut self) {
        self.commands.push(Command::Pause);
        self.stop();
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.commands.push(Command::Seek(seconds));
        self.time = seconds;
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, level: f64) {
        self.commands.push(Command::Volume(level));
        self.volume = level;
        self.echo_volume();
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.commands.push(Command::Muted(muted));
        self.muted = muted;
        self.echo_volume();
    }

    fn looping(&self) -> bool {
        self.looping
    }

    fn set_looping(&mut self, looping: bool) {
        self.commands.push(Command::Loop(looping));
        self.looping = looping;
    }
}

pub type Session = PlaybackSession<FakeAdapter>;

/// Catalog of `n` titled tracks, `t0.mp3` ...
pub fn catalog(n: usize) -> Catalog {
    Catalog::new(
        (0..n)
            .map(|i| {
                TrackRecord::new(format!("t{i}.mp3"))
                    .with_title(format!("Track {i}"))
                    .with_artist("Artist")
            })
            .collect(),
    )
    .unwrap()
}

/// Session over `catalog(n)` with construction noise cleared
pub fn session(n: usize) -> Session {
    session_with(n, PlayerConfig::default())
}

pub fn session_with(n: usize, config: PlayerConfig) -> Session {
    init_tracing();

    let mut session = PlaybackSession::with_catalog(FakeAdapter::default(), config, catalog(n));
    settle(&mut session);
    session.drain_events();
    session.adapter_mut().commands.clear();
    session
}

/// Deliver every queued adapter event; returns how many were applied
pub fn settle(session: &mut Session) -> usize {
    let mut applied = 0;

    while let Some(event) = session.adapter_mut().events.pop_front() {
        if session.handle_event(event) {
            applied += 1;
        }
    }

    applied
}

/// Report the current source's metadata
pub fn ready(session: &mut Session, duration: f64) {
    let source = session.current_source().unwrap();
    assert!(session.handle_event(MediaEvent::Ready { source, duration }));
}

/// Start playback and let the adapter confirm it
pub fn start_playing(session: &mut Session) {
    if !session.play_intent() {
        session.play_or_pause().unwrap();
    }
    settle(session);
    assert!(session.is_playing());
}

/// Run the current track to its end the way an element does
pub fn finish_track(session: &mut Session) {
    let source = session.current_source().unwrap();

    session.adapter_mut().playing = false;
    session.handle_event(MediaEvent::PlayStateChanged { playing: false });
    session.handle_event(MediaEvent::Ended { source });
}
