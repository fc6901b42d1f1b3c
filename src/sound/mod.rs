//! Feedback sound playback for TomatoBar.
//!
//! One short sound is played when an interval starts, is cancelled, or
//! completes. This module provides:
//!
//! - Selection of the alert sound (system sound file or synthesized beep)
//! - Non-blocking playback through rodio
//! - A null player used when no audio device is available
//!
//! ```text
//! ┌──────────────────┐
//! │   SoundPlayer    │ ← Main interface
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   SoundSource    │────▶│  System Sounds   │
//! │                  │     │  (/System/...)   │
//! │                  │     ├──────────────────┤
//! │                  │────▶│  Sine beep       │
//! └──────────────────┘     │  (fallback)      │
//!                          └──────────────────┘
//! ```

mod error;
mod player;
mod source;

pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{
    choose_alert_sound, default_alert_sound, discover_sounds_in, discover_system_sounds,
    SoundSource,
};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Trait for sound playback implementations.
pub trait SoundPlayer {
    /// Plays the feedback sound without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self) -> Result<(), SoundError>;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self)
    }
}

impl<T: SoundPlayer + ?Sized> SoundPlayer for Arc<T> {
    fn play(&self) -> Result<(), SoundError> {
        (**self).play()
    }
}

/// Player used when there is no audio device.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSoundPlayer;

impl SoundPlayer for NullSoundPlayer {
    fn play(&self) -> Result<(), SoundError> {
        Ok(())
    }
}

/// Creates the feedback player for this machine.
///
/// Falls back to [`NullSoundPlayer`] when no audio device can be opened.
#[must_use]
pub fn create_feedback_player() -> Box<dyn SoundPlayer> {
    match try_create_player(default_alert_sound()) {
        Some(player) => Box::new(player),
        None => Box::new(NullSoundPlayer),
    }
}

/// Mock sound player for testing.
#[derive(Debug)]
pub struct MockSoundPlayer {
    play_calls: Mutex<usize>,
    should_fail: AtomicBool,
}

impl Default for MockSoundPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            play_calls: Mutex::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        *self.play_calls.lock().unwrap()
    }

    pub fn clear_calls(&self) {
        *self.play_calls.lock().unwrap() = 0;
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::StreamError("Mock failure".to_string()));
        }
        *self.play_calls.lock().unwrap() += 1;
        Ok(())
    }
}
