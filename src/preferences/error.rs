//! Preference store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing preferences.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// No per-user configuration directory could be determined.
    #[error("could not determine the user configuration directory")]
    NoConfigDir,

    /// The preferences file could not be read or written.
    #[error("preferences file I/O failed for {path}: {source}")]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The preferences file does not contain valid JSON.
    #[error("preferences file {path} is malformed: {source}")]
    Parse {
        /// File that was being parsed
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The requested interval length is out of range.
    #[error("interval length must be at least 1 minute, got {0}")]
    InvalidIntervalLength(u32),
}

impl PreferencesError {
    /// Returns true if the error comes from the file system.
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::NoConfigDir)
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::NoConfigDir => "set HOME so a configuration directory can be found",
            Self::Io { .. } => "check the permissions of the configuration directory",
            Self::Parse { .. } => "delete the preferences file to restore defaults",
            Self::InvalidIntervalLength(_) => "choose an interval of one minute or more",
        }
    }
}
