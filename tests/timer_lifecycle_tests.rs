//! Integration tests for the interval lifecycle.
//!
//! These tests drive the timer through full sessions:
//! - Start, countdown to `00:00`, completion on the following tick
//! - Cancel part-way through
//! - Sessions with sound disabled
//! - Tick source arming and disarming across repeated sessions
//! - The same flows fed through the event channel and `App`

use std::time::Duration;

use crossbeam_channel::{unbounded, Sender};

use tomatobar::app::{App, ChannelPump};
use tomatobar::preferences::{MemoryPreferenceStore, PreferenceStore};
use tomatobar::presenter::{MockPresenter, PresenterCall, COMPLETION_BODY, COMPLETION_TITLE};
use tomatobar::timer::{IntervalTimer, ManualTickSource, TickOutcome};
use tomatobar::types::{AppEvent, Generation, Preferences, TimerPhase};

// ============================================================================
// Test Helpers
// ============================================================================

type TestTimer = IntervalTimer<MockPresenter, ManualTickSource, MemoryPreferenceStore>;

/// Creates a timer with the given interval length and sound setting.
fn create_timer(minutes: u32, sound: bool) -> (TestTimer, ManualTickSource) {
    let ticks = ManualTickSource::new();
    let prefs = Preferences::default()
        .with_interval_length(minutes)
        .with_sound_enabled(sound);
    let timer = IntervalTimer::new(
        MockPresenter::new(),
        ticks.clone(),
        MemoryPreferenceStore::new(prefs),
    );
    (timer, ticks)
}

/// Delivers `n` ticks from the currently armed source.
fn tick_n(timer: &mut TestTimer, n: usize) -> Vec<TickOutcome> {
    let generation = timer
        .current_generation()
        .expect("timer should be running");
    (0..n).map(|_| timer.tick(generation)).collect()
}

// ============================================================================
// Full Cycle Tests
// ============================================================================

mod full_cycle_tests {
    use super::*;

    #[test]
    fn test_one_minute_cycle_with_sound() {
        let (mut timer, ticks) = create_timer(1, true);

        assert_eq!(timer.request_toggle(), TimerPhase::Running);
        assert_eq!(timer.remaining_seconds(), Some(60));
        assert_eq!(timer.presenter().sound_count(), 1);

        let outcomes = tick_n(&mut timer, 60);
        assert_eq!(outcomes.last(), Some(&TickOutcome::Remaining(0)));
        assert_eq!(timer.phase(), TimerPhase::Running);
        assert_eq!(timer.presenter().last_remaining(), Some("00:00"));
        assert_eq!(timer.presenter().completion_count(), 0);

        let outcomes = tick_n(&mut timer, 1);
        assert_eq!(outcomes, vec![TickOutcome::Completed]);
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.presenter().completion_count(), 1);
        assert_eq!(timer.presenter().sound_count(), 2);
        assert_eq!(ticks.live_count(), 0);
    }

    #[test]
    fn test_every_tick_renders_countdown() {
        let (mut timer, _ticks) = create_timer(1, false);
        timer.request_toggle();

        let outcomes = tick_n(&mut timer, 60);

        let expected: Vec<_> = (0..60u64).rev().map(TickOutcome::Remaining).collect();
        assert_eq!(outcomes, expected);

        let rendered: Vec<_> = timer
            .presenter()
            .calls()
            .iter()
            .filter_map(|call| match call {
                PresenterCall::RenderRemaining(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(rendered.len(), 60);
        assert_eq!(rendered[0], "00:59");
        assert_eq!(rendered[59], "00:00");
    }

    #[test]
    fn test_completion_order() {
        let (mut timer, _ticks) = create_timer(1, true);
        timer.request_toggle();
        tick_n(&mut timer, 60);
        let before = timer.presenter().calls().len();

        tick_n(&mut timer, 1);

        let tail = &timer.presenter().calls()[before..];
        assert_eq!(
            tail,
            &[
                PresenterCall::NotifyCompletion {
                    title: COMPLETION_TITLE.to_string(),
                    body: COMPLETION_BODY.to_string(),
                },
                PresenterCall::RenderIdle,
                PresenterCall::PlayFeedbackSound,
            ]
        );
    }

    #[test]
    fn test_default_interval_length() {
        let (mut timer, _ticks) = create_timer(25, true);
        timer.request_toggle();

        assert_eq!(timer.remaining_seconds(), Some(1500));
        tick_n(&mut timer, 1);
        assert_eq!(timer.presenter().last_remaining(), Some("24:59"));
    }

    #[test]
    fn test_zero_interval_uses_default() {
        let (mut timer, _ticks) = create_timer(0, true);
        timer.request_toggle();

        assert_eq!(timer.remaining_seconds(), Some(1500));
    }
}

// ============================================================================
// Cancel Tests
// ============================================================================

mod cancel_tests {
    use super::*;

    #[test]
    fn test_cancel_at_45_seconds() {
        let (mut timer, ticks) = create_timer(1, true);
        timer.request_toggle();
        tick_n(&mut timer, 15);
        assert_eq!(timer.remaining_seconds(), Some(45));
        let sounds_before = timer.presenter().sound_count();

        assert_eq!(timer.request_toggle(), TimerPhase::Idle);

        assert_eq!(ticks.live_count(), 0);
        assert_eq!(timer.presenter().completion_count(), 0);
        assert_eq!(timer.presenter().sound_count(), sounds_before + 1);
        assert_eq!(timer.presenter().calls().last(), Some(&PresenterCall::PlayFeedbackSound));
    }

    #[test]
    fn test_ticks_after_cancel_are_stale() {
        let (mut timer, _ticks) = create_timer(1, true);
        timer.request_toggle();
        let generation = timer.current_generation().unwrap();
        timer.request_toggle();

        assert_eq!(timer.tick(generation), TickOutcome::Stale);
        assert_eq!(timer.phase(), TimerPhase::Idle);
    }

    #[test]
    fn test_restart_resets_countdown() {
        let (mut timer, _ticks) = create_timer(1, false);
        timer.request_toggle();
        tick_n(&mut timer, 30);
        timer.request_toggle();

        timer.request_toggle();

        assert_eq!(timer.remaining_seconds(), Some(60));
    }
}

// ============================================================================
// Sound Tests
// ============================================================================

mod sound_tests {
    use super::*;

    #[test]
    fn test_sound_disabled_full_cycle() {
        let (mut timer, _ticks) = create_timer(1, false);

        timer.request_toggle();
        tick_n(&mut timer, 61);

        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.presenter().completion_count(), 1);
        assert_eq!(timer.presenter().sound_count(), 0);
    }

    #[test]
    fn test_sound_preference_read_at_point_of_use() {
        let (mut timer, _ticks) = create_timer(1, true);
        timer.request_toggle();
        assert_eq!(timer.presenter().sound_count(), 1);

        timer.toggle_sound();
        tick_n(&mut timer, 61);

        assert_eq!(timer.presenter().sound_count(), 1);
        assert!(!timer.preferences().is_sound_enabled());
    }
}

// ============================================================================
// Tick Source Tests
// ============================================================================

mod tick_source_tests {
    use super::*;

    #[test]
    fn test_never_two_live_sources() {
        let (mut timer, ticks) = create_timer(1, false);

        for _ in 0..5 {
            timer.request_toggle();
            assert_eq!(ticks.live_count(), 1);
            timer.request_toggle();
            assert_eq!(ticks.live_count(), 0);
        }
        assert_eq!(ticks.armed_count(), 5);
    }

    #[test]
    fn test_completion_disarms_source() {
        let (mut timer, ticks) = create_timer(1, false);
        timer.request_toggle();
        tick_n(&mut timer, 61);

        assert_eq!(ticks.live_count(), 0);
        assert_eq!(ticks.armed_count(), 1);
    }

    #[test]
    fn test_old_generation_ignored_after_restart() {
        let (mut timer, _ticks) = create_timer(1, false);
        timer.request_toggle();
        let old = timer.current_generation().unwrap();
        timer.request_toggle();
        timer.request_toggle();

        assert_eq!(timer.tick(old), TickOutcome::Stale);
        assert_eq!(timer.remaining_seconds(), Some(60));
    }
}

// ============================================================================
// App Tests
// ============================================================================

mod app_tests {
    use super::*;

    type TestApp = App<MockPresenter, ManualTickSource, MemoryPreferenceStore>;

    fn create_app(minutes: u32, sound: bool) -> (TestApp, Sender<AppEvent>) {
        let (timer, _ticks) = create_timer(minutes, sound);
        let (tx, rx) = unbounded();
        (App::new(timer, rx), tx)
    }

    #[test]
    fn test_full_cycle_over_channel() {
        let (mut app, tx) = create_app(1, true);
        tx.send(AppEvent::Toggle).unwrap();
        for _ in 0..61 {
            tx.send(AppEvent::Tick(Generation::new(1))).unwrap();
        }
        tx.send(AppEvent::Quit).unwrap();

        app.run(&mut ChannelPump::new(Duration::from_millis(10)))
            .unwrap();

        assert_eq!(app.timer().phase(), TimerPhase::Idle);
        assert_eq!(app.timer().presenter().completion_count(), 1);
        assert_eq!(app.timer().presenter().sound_count(), 2);
    }

    #[test]
    fn test_quit_while_running_is_silent() {
        let (mut app, tx) = create_app(1, true);
        tx.send(AppEvent::Toggle).unwrap();
        tx.send(AppEvent::Tick(Generation::new(1))).unwrap();
        tx.send(AppEvent::Quit).unwrap();

        app.run(&mut ChannelPump::new(Duration::from_millis(10)))
            .unwrap();

        assert_eq!(app.timer().phase(), TimerPhase::Idle);
        assert_eq!(app.timer().presenter().sound_count(), 1);
        assert_eq!(app.timer().presenter().completion_count(), 0);
    }

    #[test]
    fn test_events_after_quit_are_not_processed() {
        let (mut app, tx) = create_app(1, true);
        tx.send(AppEvent::Quit).unwrap();
        tx.send(AppEvent::Toggle).unwrap();

        app.run(&mut ChannelPump::new(Duration::from_millis(10)))
            .unwrap();

        assert_eq!(app.timer().phase(), TimerPhase::Idle);
        assert!(app.timer().presenter().calls().is_empty());
    }
}
