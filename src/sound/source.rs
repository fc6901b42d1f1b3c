//! Feedback sound selection.
//!
//! The feedback sound mimics the system alert beep: a macOS system sound
//! file when one can be found, otherwise a short synthesized tone.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Represents what the player plays for feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// A sound file from one of the system sound directories.
    System {
        /// The name of the sound (e.g., "Tink").
        name: String,
        /// The full path to the sound file.
        path: PathBuf,
    },
    /// A short sine tone generated at playback time.
    Beep,
}

impl SoundSource {
    /// Creates a new system sound source.
    #[must_use]
    pub fn system(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::System {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::System { name, .. } => name,
            Self::Beep => "beep",
        }
    }

    /// Returns the file path if this is a system sound.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::System { path, .. } => Some(path),
            Self::Beep => None,
        }
    }
}

/// Directories to search for system sounds, in order of priority.
const SYSTEM_SOUND_DIRS: &[&str] = &["/System/Library/Sounds", "/Library/Sounds"];

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["aiff", "aif", "wav"];

/// Sound names closest to the default alert beep, in order of preference.
const ALERT_SOUND_NAMES: &[&str] = &["Tink", "Pop", "Glass"];

/// Lists the sound files in `dirs`, sorted by name.
#[must_use]
pub fn discover_sounds_in(dirs: &[&Path]) -> Vec<SoundSource> {
    let mut sounds: Vec<SoundSource> = dirs
        .iter()
        .filter_map(|dir| std::fs::read_dir(dir).ok())
        .flat_map(|entries| entries.flatten())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
                .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        })
        .filter_map(|path| {
            let name = path.file_stem()?.to_string_lossy().into_owned();
            Some(SoundSource::System { name, path })
        })
        .collect();

    sounds.sort_by(|a, b| a.name().cmp(b.name()));
    sounds
}

/// Lists the installed system sounds.
#[must_use]
pub fn discover_system_sounds() -> Vec<SoundSource> {
    let dirs: Vec<&Path> = SYSTEM_SOUND_DIRS.iter().map(Path::new).collect();
    discover_sounds_in(&dirs)
}

/// Picks the alert sound from a list of candidates.
///
/// Preferred names win, then the first candidate, then the synthesized beep.
#[must_use]
pub fn choose_alert_sound(candidates: Vec<SoundSource>) -> SoundSource {
    let preferred = ALERT_SOUND_NAMES
        .iter()
        .find_map(|wanted| candidates.iter().find(|s| s.name() == *wanted).cloned());

    let source = preferred
        .or_else(|| candidates.into_iter().next())
        .unwrap_or(SoundSource::Beep);
    debug!(sound = %source.name(), "alert sound selected");
    source
}

/// Returns the feedback sound for this machine.
#[must_use]
pub fn default_alert_sound() -> SoundSource {
    choose_alert_sound(discover_system_sounds())
}
