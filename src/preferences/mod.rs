//! Persisted user preferences.
//!
//! Two values are stored: the interval length in minutes and whether
//! feedback sounds are enabled. Both are read at the point of use, so a
//! change takes effect the next time it is needed without any reload signal.
//! Reads never fail; anything unreadable falls back to the defaults.

mod error;
mod store;

pub use error::PreferencesError;
pub use store::JsonPreferenceStore;

use crate::types::Preferences;

/// Trait for preference storage implementations.
pub trait PreferenceStore {
    /// Returns the current preferences, falling back to defaults.
    fn load(&self) -> Preferences;

    /// Persists the sound setting.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be stored.
    fn set_sound_enabled(&mut self, enabled: bool) -> Result<(), PreferencesError>;

    /// Persists the interval length.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero-minute interval or if the value could not
    /// be stored.
    fn set_interval_length(&mut self, minutes: u32) -> Result<(), PreferencesError>;

    /// Interval length in minutes.
    fn interval_length(&self) -> u32 {
        self.load().interval_length
    }

    /// Whether feedback sounds are enabled.
    fn is_sound_enabled(&self) -> bool {
        self.load().is_sound_enabled
    }
}

/// In-memory preference store.
///
/// Used when no configuration directory is available, and by tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    prefs: Preferences,
}

impl MemoryPreferenceStore {
    /// Creates a store holding the given preferences.
    #[must_use]
    pub fn new(prefs: Preferences) -> Self {
        Self {
            prefs: prefs.sanitized(),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Preferences {
        self.prefs
    }

    fn set_sound_enabled(&mut self, enabled: bool) -> Result<(), PreferencesError> {
        self.prefs.is_sound_enabled = enabled;
        Ok(())
    }

    fn set_interval_length(&mut self, minutes: u32) -> Result<(), PreferencesError> {
        if minutes == 0 {
            return Err(PreferencesError::InvalidIntervalLength(minutes));
        }
        self.prefs.interval_length = minutes;
        Ok(())
    }
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn load(&self) -> Preferences {
        (**self).load()
    }

    fn set_sound_enabled(&mut self, enabled: bool) -> Result<(), PreferencesError> {
        (**self).set_sound_enabled(enabled)
    }

    fn set_interval_length(&mut self, minutes: u32) -> Result<(), PreferencesError> {
        (**self).set_interval_length(minutes)
    }
}
