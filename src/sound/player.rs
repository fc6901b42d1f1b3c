//! Sound player implementation using rodio.
//!
//! Playback is non-blocking: the sink is detached and keeps playing after
//! `play` returns.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::SoundSource;

/// Frequency of the synthesized beep.
const BEEP_FREQUENCY_HZ: f32 = 880.0;

/// Length of the synthesized beep.
const BEEP_DURATION: Duration = Duration::from_millis(150);

/// Amplitude of the synthesized beep.
const BEEP_VOLUME: f32 = 0.2;

/// A sound player that uses rodio for audio playback.
///
/// The output stream is not `Send`, so the player lives on the thread that
/// created it (the presentation thread).
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// What to play.
    source: SoundSource,
}

impl RodioSoundPlayer {
    /// Opens the default audio output.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(source: SoundSource) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!(sound = %source.name(), "Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            source,
        })
    }

    /// Returns the configured sound.
    #[must_use]
    pub fn source(&self) -> &SoundSource {
        &self.source
    }

    /// Plays the configured sound.
    ///
    /// A system sound that cannot be opened or decoded falls back to the
    /// synthesized beep.
    ///
    /// # Errors
    ///
    /// Returns an error if no sink can be created.
    pub fn play(&self) -> Result<(), SoundError> {
        match &self.source {
            SoundSource::System { name, path } => match self.play_file(path) {
                Ok(()) => Ok(()),
                Err(e) if e.should_fallback_to_beep() => {
                    warn!("Failed to play system sound '{}': {}, falling back to beep", name, e);
                    self.play_beep()
                }
                Err(e) => Err(e),
            },
            SoundSource::Beep => self.play_beep(),
        }
    }

    /// Plays a sound file from the filesystem.
    fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(e.to_string()))?;

        let sink = self.new_sink()?;
        sink.append(decoder);
        sink.detach();

        debug!(path = %path.display(), "Sound playback started (detached)");
        Ok(())
    }

    /// Plays the synthesized beep.
    fn play_beep(&self) -> Result<(), SoundError> {
        let beep = SineWave::new(BEEP_FREQUENCY_HZ)
            .take_duration(BEEP_DURATION)
            .amplify(BEEP_VOLUME);

        let sink = self.new_sink()?;
        sink.append(beep);
        sink.detach();

        debug!("Beep playback started (detached)");
        Ok(())
    }

    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.stream_handle).map_err(|e| SoundError::StreamError(e.to_string()))
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_player(source: SoundSource) -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new(source) {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, sound disabled: {} ({})", e, e.suggestion());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: these tests return early in environments without audio hardware
    // (e.g., CI containers).

    #[test]
    fn test_play_beep() {
        let player = match RodioSoundPlayer::new(SoundSource::Beep) {
            Ok(p) => p,
            Err(_) => return,
        };
        assert!(player.play().is_ok());
    }

    #[test]
    fn test_missing_file_falls_back_to_beep() {
        let source = SoundSource::system("Missing", "/nonexistent/path/to/Missing.aiff");
        let player = match RodioSoundPlayer::new(source) {
            Ok(p) => p,
            Err(_) => return,
        };
        assert!(player.play().is_ok());
    }

    #[test]
    fn test_try_create_player_no_panic() {
        let _ = try_create_player(SoundSource::Beep);
    }

    #[test]
    fn test_debug_impl() {
        let player = match RodioSoundPlayer::new(SoundSource::Beep) {
            Ok(p) => p,
            Err(_) => return,
        };
        let debug_str = format!("{:?}", player);
        assert!(debug_str.contains("RodioSoundPlayer"));
        assert!(debug_str.contains("Beep"));
    }
}
