//! JSON file backed preference store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::error::PreferencesError;
use super::PreferenceStore;
use crate::types::Preferences;

/// Directory created under the user configuration directory.
const APP_DIR_NAME: &str = "tomatobar";

/// File name of the preferences document.
const FILE_NAME: &str = "preferences.json";

/// Preference store persisted as a small JSON document.
///
/// The file is re-read on every access so edits made while the timer is
/// running apply to the next interval.
#[derive(Debug, Clone)]
pub struct JsonPreferenceStore {
    path: PathBuf,
}

impl JsonPreferenceStore {
    /// Creates a store backed by the given file.
    ///
    /// The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the platform default location.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError::NoConfigDir` if no configuration directory
    /// is known for the current user.
    pub fn open_default() -> Result<Self, PreferencesError> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Returns `<config_dir>/tomatobar/preferences.json`.
    pub fn default_path() -> Result<PathBuf, PreferencesError> {
        let base = dirs::config_dir().ok_or(PreferencesError::NoConfigDir)?;
        Ok(base.join(APP_DIR_NAME).join(FILE_NAME))
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored preferences.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read(&self) -> Result<Preferences, PreferencesError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no preferences file, using defaults");
                return Ok(Preferences::default());
            }
            Err(source) => {
                return Err(PreferencesError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let prefs: Preferences =
            serde_json::from_str(&contents).map_err(|source| PreferencesError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(prefs.sanitized())
    }

    /// Writes the preferences, replacing the file atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn write(&self, prefs: &Preferences) -> Result<(), PreferencesError> {
        let io_err = |source| PreferencesError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(prefs).map_err(|source| PreferencesError::Parse {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;

        debug!(path = %self.path.display(), "preferences written");
        Ok(())
    }

    /// Reads the preferences, falling back to defaults on any error.
    fn read_or_default(&self) -> Preferences {
        self.read().unwrap_or_else(|e| {
            warn!("{}, using defaults ({})", e, e.suggestion());
            Preferences::default()
        })
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn load(&self) -> Preferences {
        self.read_or_default()
    }

    fn set_sound_enabled(&mut self, enabled: bool) -> Result<(), PreferencesError> {
        let prefs = self.read_or_default().with_sound_enabled(enabled);
        self.write(&prefs)
    }

    fn set_interval_length(&mut self, minutes: u32) -> Result<(), PreferencesError> {
        if minutes == 0 {
            return Err(PreferencesError::InvalidIntervalLength(minutes));
        }
        let prefs = self.read_or_default().with_interval_length(minutes);
        self.write(&prefs)
    }
}
