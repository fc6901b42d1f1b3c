//! Core data types for TomatoBar.
//!
//! This module defines the data structures shared across the crate:
//! - Timer phase and tick generations
//! - Persisted preferences with defaults
//! - Events handed to the presentation thread

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Interval length used when no valid preference is stored.
pub const DEFAULT_INTERVAL_MINUTES: u32 = 25;

/// Sound setting used when no preference is stored.
pub const DEFAULT_SOUND_ENABLED: bool = true;

// ============================================================================
// TimerPhase
// ============================================================================

/// Represents the observable phase of the interval timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// No interval is running
    #[default]
    Idle,
    /// An interval is counting down
    Running,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
        }
    }

    /// Returns true if an interval is counting down.
    pub fn is_running(&self) -> bool {
        matches!(self, TimerPhase::Running)
    }
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Identifies one armed tick source.
///
/// Every Idle→Running transition arms a source with a fresh generation, so a
/// tick that was already queued when its source was disarmed can be told
/// apart from a live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    /// The generation before any source has been armed.
    pub const ZERO: Generation = Generation(0);

    /// Creates a generation from a raw counter value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the following generation.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Returns the raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Preferences
// ============================================================================

fn default_interval_length() -> u32 {
    DEFAULT_INTERVAL_MINUTES
}

fn default_sound_enabled() -> bool {
    DEFAULT_SOUND_ENABLED
}

fn interval_length_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(value_or_none(deserializer, "intervalLength")?.unwrap_or_else(default_interval_length))
}

fn sound_enabled_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(value_or_none(deserializer, "isSoundEnabled")?.unwrap_or_else(default_sound_enabled))
}

/// Reads one preference value, yielding `None` when it has the wrong type.
///
/// Each key falls back on its own, so one bad value does not reset the rest.
fn value_or_none<'de, D, T>(deserializer: D, key: &str) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match T::deserialize(&value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            tracing::warn!("Ignoring invalid {} value {}: {}", key, value, e);
            Ok(None)
        }
    }
}

/// The two persisted user preferences.
///
/// Keys are serialized with the names used by the preferences file
/// (`intervalLength`, `isSoundEnabled`). Missing keys and values of the
/// wrong type take their defaults independently of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Interval length in minutes
    #[serde(
        rename = "intervalLength",
        default = "default_interval_length",
        deserialize_with = "interval_length_or_default"
    )]
    pub interval_length: u32,
    /// Whether start/cancel/completion sounds are played
    #[serde(
        rename = "isSoundEnabled",
        default = "default_sound_enabled",
        deserialize_with = "sound_enabled_or_default"
    )]
    pub is_sound_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            interval_length: DEFAULT_INTERVAL_MINUTES,
            is_sound_enabled: DEFAULT_SOUND_ENABLED,
        }
    }
}

impl Preferences {
    /// Returns a copy with the given interval length.
    #[must_use]
    pub fn with_interval_length(mut self, minutes: u32) -> Self {
        self.interval_length = minutes;
        self
    }

    /// Returns a copy with the given sound setting.
    #[must_use]
    pub fn with_sound_enabled(mut self, enabled: bool) -> Self {
        self.is_sound_enabled = enabled;
        self
    }

    /// Interval length converted to seconds.
    pub fn interval_length_seconds(&self) -> i64 {
        i64::from(self.interval_length) * 60
    }

    /// Replaces invalid values with their defaults.
    ///
    /// A zero-minute interval would complete on its first tick, so it is
    /// treated like a missing value.
    #[must_use]
    pub fn sanitized(self) -> Self {
        if self.interval_length == 0 {
            tracing::warn!(
                "intervalLength is 0, using default of {} minutes",
                DEFAULT_INTERVAL_MINUTES
            );
            return Self {
                interval_length: DEFAULT_INTERVAL_MINUTES,
                ..self
            };
        }
        self
    }
}

// ============================================================================
// AppEvent
// ============================================================================

/// Events delivered to the presentation thread.
///
/// Every entry point (menu items, terminal input, the tick task, the signal
/// handler) holds a `crossbeam_channel::Sender<AppEvent>`; only the
/// presentation thread receives them, so all timer mutation is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Start an interval when idle, cancel it when running
    Toggle,
    /// One second elapsed on the tick source armed with this generation
    Tick(Generation),
    /// Flip and persist the sound preference
    ToggleSound,
    /// Leave the presentation loop
    Quit,
}

// ============================================================================
// Formatting
// ============================================================================

/// Formats remaining seconds as `MM:SS`, each part zero-padded to two digits.
///
/// Minutes are not wrapped into hours, so intervals longer than 99 minutes
/// render with three minute digits.
pub fn format_remaining(remaining_seconds: u64) -> String {
    let minutes = remaining_seconds / 60;
    let seconds = remaining_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

// ============================================================================
// Tests
// ============================================================================
