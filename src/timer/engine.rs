//! Interval timer state machine.
//!
//! ```text
//!            toggle (start)
//!   Idle ─────────────────────▶ Running ──┐
//!    ▲                            │  ▲    │ tick, remaining >= 0
//!    │  toggle (cancel)           │  └────┘
//!    ├────────────────────────────┤
//!    │  tick, remaining < 0       │
//!    └──── (completion) ──────────┘
//! ```
//!
//! The countdown decrements first and inspects the result afterwards. With
//! the first tick firing immediately on start, an interval of `L` seconds
//! takes `L + 1` ticks: `00:00` stays on screen for one full tick and the
//! completion fires on the tick after it.

use tracing::{debug, info, warn};

use super::ticker::{TickHandle, TickSource};
use crate::preferences::PreferenceStore;
use crate::presenter::{Presenter, COMPLETION_BODY, COMPLETION_TITLE};
use crate::types::{format_remaining, Generation, TimerPhase};

// ============================================================================
// TimerState
// ============================================================================

/// Internal timer state.
///
/// The tick handle lives inside `Running`, so a live tick source exists
/// exactly while the timer is running.
#[derive(Debug)]
enum TimerState {
    Idle,
    Running {
        remaining_seconds: i64,
        ticks: TickHandle,
    },
}

/// Result of delivering a tick to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick belonged to a disarmed source and was ignored
    Stale,
    /// The countdown advanced; the value is what is now displayed
    Remaining(u64),
    /// The interval completed and the timer is idle again
    Completed,
}

// ============================================================================
// IntervalTimer
// ============================================================================

/// Owns the countdown state and drives the presenter.
///
/// All methods run on the presentation thread.
pub struct IntervalTimer<P, T, S> {
    presenter: P,
    tick_source: T,
    preferences: S,
    state: TimerState,
    last_generation: Generation,
}

impl<P, T, S> IntervalTimer<P, T, S>
where
    P: Presenter,
    T: TickSource,
    S: PreferenceStore,
{
    /// Creates an idle timer.
    pub fn new(presenter: P, tick_source: T, preferences: S) -> Self {
        Self {
            presenter,
            tick_source,
            preferences,
            state: TimerState::Idle,
            last_generation: Generation::ZERO,
        }
    }

    /// Starts an interval when idle, cancels it when running.
    ///
    /// Returns the phase after the transition.
    pub fn request_toggle(&mut self) -> TimerPhase {
        match self.state {
            TimerState::Idle => self.start(),
            TimerState::Running { .. } => self.cancel(),
        }
        self.phase()
    }

    /// Handles one tick from the source armed with `generation`.
    pub fn tick(&mut self, generation: Generation) -> TickOutcome {
        let remaining = match &mut self.state {
            TimerState::Running {
                remaining_seconds,
                ticks,
            } if ticks.generation() == generation => {
                *remaining_seconds -= 1;
                *remaining_seconds
            }
            _ => {
                debug!(generation = %generation, "ignoring stale tick");
                return TickOutcome::Stale;
            }
        };

        if remaining < 0 {
            self.finish();
            return TickOutcome::Completed;
        }

        let seconds = remaining.unsigned_abs();
        self.presenter.render_remaining(&format_remaining(seconds));
        TickOutcome::Remaining(seconds)
    }

    /// Flips the sound preference and shows the stored value.
    ///
    /// Returns the setting in effect afterwards, which is unchanged when the
    /// new value could not be saved.
    pub fn toggle_sound(&mut self) -> bool {
        let requested = !self.preferences.is_sound_enabled();
        if let Err(e) = self.preferences.set_sound_enabled(requested) {
            warn!("Failed to save sound preference: {} ({})", e, e.suggestion());
        }
        let enabled = self.preferences.is_sound_enabled();
        info!(enabled, "sound preference changed");
        self.presenter.render_sound_enabled(enabled);
        enabled
    }

    /// Tears down a running interval without sound or notification.
    ///
    /// Used when the application exits.
    pub fn shutdown(&mut self) {
        if matches!(self.state, TimerState::Running { .. }) {
            info!("discarding running interval on shutdown");
            self.reset();
        }
    }

    /// Returns the current phase.
    pub fn phase(&self) -> TimerPhase {
        match self.state {
            TimerState::Idle => TimerPhase::Idle,
            TimerState::Running { .. } => TimerPhase::Running,
        }
    }

    /// Returns the remaining seconds while running.
    pub fn remaining_seconds(&self) -> Option<i64> {
        match self.state {
            TimerState::Idle => None,
            TimerState::Running {
                remaining_seconds, ..
            } => Some(remaining_seconds),
        }
    }

    /// Returns the generation of the armed tick source while running.
    pub fn current_generation(&self) -> Option<Generation> {
        match &self.state {
            TimerState::Idle => None,
            TimerState::Running { ticks, .. } => Some(ticks.generation()),
        }
    }

    /// Returns a reference to the presenter.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Returns a reference to the preference store.
    pub fn preferences(&self) -> &S {
        &self.preferences
    }

    /// Idle → Running.
    fn start(&mut self) {
        let prefs = self.preferences.load();
        let remaining_seconds = prefs.interval_length_seconds();

        self.presenter.render_active();

        self.last_generation = self.last_generation.next();
        let ticks = self.tick_source.arm(self.last_generation);
        self.state = TimerState::Running {
            remaining_seconds,
            ticks,
        };

        info!(
            minutes = prefs.interval_length,
            generation = %self.last_generation,
            "interval started"
        );
        self.play_sound();
    }

    /// Running → Idle on user request.
    fn cancel(&mut self) {
        info!(remaining = ?self.remaining_seconds(), "interval cancelled");
        self.reset();
        self.play_sound();
    }

    /// Running → Idle on exhaustion.
    fn finish(&mut self) {
        info!("interval completed");
        self.presenter
            .notify_completion(COMPLETION_TITLE, COMPLETION_BODY);
        self.reset();
        self.play_sound();
    }

    /// Disarms the tick source and restores the idle appearance.
    fn reset(&mut self) {
        // Dropping the handle disarms the source
        self.state = TimerState::Idle;
        self.presenter.render_idle();
    }

    fn play_sound(&mut self) {
        if self.preferences.is_sound_enabled() {
            self.presenter.play_feedback_sound();
        }
    }
}

impl<P, T, S> std::fmt::Debug for IntervalTimer<P, T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntervalTimer")
            .field("state", &self.state)
            .field("last_generation", &self.last_generation)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
