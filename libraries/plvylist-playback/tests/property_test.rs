//! Property-based tests for the playback session
//!
//! Drives the session with random command and adapter-event sequences and
//! checks the invariants after every step.

mod common;

use common::{session, settle, Session};
use plvylist_playback::view::PlayerPanel;
use plvylist_playback::{project, AlwaysConfirm, MediaEvent, PlayerView, SeekTarget, SourceId};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ===== Helpers =====

#[derive(Debug, Clone)]
enum Op {
    PlayOrPause,
    Previous,
    Next,
    Select(usize),
    ActivateRow(usize),
    Ended,
    StaleEnded,
    Ready(f64),
    Time(f64),
    SeekPreview(f64),
    SeekCommit(f64),
    SkipForward,
    Volume(f64),
    ToggleMute,
    ToggleLoop,
    Shuffle(u64),
    Reset,
    Settle,
    ExternalPause,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::PlayOrPause),
        Just(Op::Previous),
        Just(Op::Next),
        (0usize..12).prop_map(Op::Select),
        (0usize..12).prop_map(Op::ActivateRow),
        Just(Op::Ended),
        Just(Op::StaleEnded),
        (0.0f64..600.0).prop_map(Op::Ready),
        (0.0f64..600.0).prop_map(Op::Time),
        (-0.5f64..1.5).prop_map(Op::SeekPreview),
        (-0.5f64..1.5).prop_map(Op::SeekCommit),
        Just(Op::SkipForward),
        (-1.0f64..2.0).prop_map(Op::Volume),
        Just(Op::ToggleMute),
        Just(Op::ToggleLoop),
        any::<u64>().prop_map(Op::Shuffle),
        Just(Op::Reset),
        Just(Op::Settle),
        Just(Op::Settle),
        Just(Op::ExternalPause),
    ]
}

fn apply(s: &mut Session, op: Op) {
    let current = s.current_source();

    // Sentinel errors are part of normal operation
    let _ = match op {
        Op::PlayOrPause => s.play_or_pause(),
        Op::Previous => s.previous(),
        Op::Next => s.next(),
        Op::Select(i) => s.select_track(i),
        Op::ActivateRow(i) => s.activate_row(i),
        Op::Ended => {
            if let Some(source) = current {
                s.handle_event(MediaEvent::Ended { source });
            }
            Ok(())
        }
        Op::StaleEnded => {
            s.handle_event(MediaEvent::Ended {
                source: SourceId(u64::MAX),
            });
            Ok(())
        }
        Op::Ready(duration) => {
            if let Some(source) = current {
                s.handle_event(MediaEvent::Ready { source, duration });
            }
            Ok(())
        }
        Op::Time(position) => {
            if let Some(source) = current {
                s.handle_event(MediaEvent::TimeAdvanced { source, position });
            }
            Ok(())
        }
        Op::SeekPreview(ratio) => s.seek_preview(SeekTarget::Ratio(ratio)),
        Op::SeekCommit(ratio) => s.seek_commit(SeekTarget::Ratio(ratio)),
        Op::SkipForward => s.skip_forward(),
        Op::Volume(level) => {
            s.set_volume(level);
            Ok(())
        }
        Op::ToggleMute => {
            s.toggle_mute();
            Ok(())
        }
        Op::ToggleLoop => {
            s.toggle_loop();
            Ok(())
        }
        Op::Shuffle(seed) => s
            .shuffle_and_restart_with(&mut AlwaysConfirm, &mut StdRng::seed_from_u64(seed))
            .map(|_| ()),
        Op::Reset => {
            s.reset();
            Ok(())
        }
        Op::Settle => {
            settle(s);
            Ok(())
        }
        Op::ExternalPause => {
            s.adapter_mut().playing = false;
            s.handle_event(MediaEvent::PlayStateChanged { playing: false });
            Ok(())
        }
    };
}

fn panel(s: &Session) -> PlayerPanel {
    match project(s) {
        PlayerView::Player(panel) => panel,
        other => panic!("unexpected view {other:?}"),
    }
}

// ===== Property Tests =====

proptest! {
    /// Property: selection stays in range, at most one row is active and
    /// playing implies a selection
    #[test]
    fn session_invariants_hold(
        len in 1usize..8,
        ops in prop::collection::vec(arbitrary_op(), 0..80),
    ) {
        let mut s = session(len);

        for op in ops {
            apply(&mut s, op);

            let count = s.catalog().unwrap().len();
            prop_assert_eq!(count, len);

            if let Some(index) = s.selected_index() {
                prop_assert!(index < count);
            }
            if s.is_playing() {
                prop_assert!(s.selected_index().is_some());
            }

            let view = panel(&s);
            let active = view.rows.iter().filter(|r| r.active).count();
            prop_assert!(active <= 1);
            prop_assert_eq!(active == 1, s.selected_index().is_some());

            prop_assert!((0.0..=1.0).contains(&s.volume().level()));
            prop_assert!((0.0..=1.0).contains(&view.seek_ratio));
        }
    }

    /// Property: toggling play intent twice without adapter events is a no-op
    #[test]
    fn play_intent_round_trips(len in 1usize..6, start in 0usize..6, playing in any::<bool>()) {
        let mut s = session(len);
        s.select_track(start % len).unwrap();
        if playing {
            s.play_or_pause().unwrap();
            settle(&mut s);
        }

        let before = s.play_intent();
        s.play_or_pause().unwrap();
        prop_assert_eq!(s.play_intent(), !before);
        s.play_or_pause().unwrap();
        prop_assert_eq!(s.play_intent(), before);
    }

    /// Property: next and previous never leave the catalog
    #[test]
    fn stepping_stays_in_bounds(len in 1usize..10, steps in prop::collection::vec(any::<bool>(), 1..40)) {
        let mut s = session(len);
        s.next().unwrap();

        for forward in steps {
            if forward {
                s.next().unwrap();
            } else {
                s.previous().unwrap();
            }
            settle(&mut s);
            prop_assert!(s.selected_index().unwrap() < len);
        }
    }
}
