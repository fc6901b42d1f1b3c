//! Presentation layer for the interval timer.
//!
//! The timer only talks to a [`Presenter`]. The production presenter,
//! [`PresentationAdapter`], fans each call out to:
//!
//! ```text
//! ┌─────────────────────┐
//! │ PresentationAdapter │
//! └──────────┬──────────┘
//!            ├──▶ Surface × N      (status bar item, control strip, ...)
//!            ├──▶ SoundPlayer      (rodio, or NullSoundPlayer)
//!            └──▶ CompletionNotifier (user notification center, or log)
//! ```
//!
//! All presenter calls happen on the presentation thread.

mod surface;

pub use surface::{LogSurface, NullSurface, Surface};

use tracing::warn;

use crate::notification::{CompletionNotifier, LogNotifier};
use crate::sound::{NullSoundPlayer, SoundPlayer};

/// Title of the completion notification.
pub const COMPLETION_TITLE: &str = "Time's up";

/// Body of the completion notification.
pub const COMPLETION_BODY: &str = "Keep up the good work!";

// ============================================================================
// Presenter
// ============================================================================

/// Everything the interval timer asks of the user interface.
pub trait Presenter {
    /// Switches visible chrome to the running state.
    fn render_active(&mut self);

    /// Switches visible chrome to the idle state.
    fn render_idle(&mut self);

    /// Shows the formatted `MM:SS` remaining time on every surface.
    fn render_remaining(&mut self, text: &str);

    /// Plays the feedback sound.
    ///
    /// Callers check the sound preference first.
    fn play_feedback_sound(&mut self);

    /// Fires a user-visible alert. Delivery is fire-and-forget.
    fn notify_completion(&mut self, title: &str, body: &str);

    /// Reflects the sound preference in the interface.
    fn render_sound_enabled(&mut self, _enabled: bool) {}
}

// ============================================================================
// PresentationAdapter
// ============================================================================

/// Presenter composed of surfaces, a sound player and a notifier.
pub struct PresentationAdapter {
    surfaces: Vec<Box<dyn Surface>>,
    sound: Box<dyn SoundPlayer>,
    notifier: Box<dyn CompletionNotifier>,
}

impl PresentationAdapter {
    /// Creates an adapter with no surfaces, no sound and a logging notifier.
    pub fn new() -> Self {
        Self {
            surfaces: Vec::new(),
            sound: Box::new(NullSoundPlayer),
            notifier: Box::new(LogNotifier),
        }
    }

    /// Adds a surface.
    #[must_use]
    pub fn with_surface(mut self, surface: impl Surface + 'static) -> Self {
        self.surfaces.push(Box::new(surface));
        self
    }

    /// Replaces the sound player.
    #[must_use]
    pub fn with_sound_player(mut self, sound: Box<dyn SoundPlayer>) -> Self {
        self.sound = sound;
        self
    }

    /// Replaces the notifier.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Box<dyn CompletionNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Names of the attached surfaces, in render order.
    pub fn surface_names(&self) -> Vec<&'static str> {
        self.surfaces.iter().map(|s| s.name()).collect()
    }
}

impl Default for PresentationAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for PresentationAdapter {
    fn render_active(&mut self) {
        for surface in &mut self.surfaces {
            surface.show_active();
        }
    }

    fn render_idle(&mut self) {
        for surface in &mut self.surfaces {
            surface.show_idle();
        }
    }

    fn render_remaining(&mut self, text: &str) {
        for surface in &mut self.surfaces {
            surface.show_remaining(text);
        }
    }

    fn play_feedback_sound(&mut self) {
        if let Err(e) = self.sound.play() {
            warn!("Failed to play feedback sound: {} ({})", e, e.suggestion());
        }
    }

    fn notify_completion(&mut self, title: &str, body: &str) {
        self.notifier.notify(title, body);
    }

    fn render_sound_enabled(&mut self, enabled: bool) {
        for surface in &mut self.surfaces {
            surface.show_sound_enabled(enabled);
        }
    }
}

impl std::fmt::Debug for PresentationAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationAdapter")
            .field("surfaces", &self.surface_names())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Test doubles
// ============================================================================

/// A recorded presenter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterCall {
    RenderActive,
    RenderIdle,
    RenderRemaining(String),
    PlayFeedbackSound,
    NotifyCompletion { title: String, body: String },
    RenderSoundEnabled(bool),
}

/// Presenter that records every call.
#[derive(Debug, Default)]
pub struct MockPresenter {
    calls: Vec<PresenterCall>,
}

impl MockPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> &[PresenterCall] {
        &self.calls
    }

    /// Number of feedback sound requests.
    #[must_use]
    pub fn sound_count(&self) -> usize {
        self.count(|c| matches!(c, PresenterCall::PlayFeedbackSound))
    }

    /// Number of completion notifications.
    #[must_use]
    pub fn completion_count(&self) -> usize {
        self.count(|c| matches!(c, PresenterCall::NotifyCompletion { .. }))
    }

    /// The most recent remaining-time text, if any was rendered.
    #[must_use]
    pub fn last_remaining(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            PresenterCall::RenderRemaining(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn count(&self, pred: impl Fn(&PresenterCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Presenter for MockPresenter {
    fn render_active(&mut self) {
        self.calls.push(PresenterCall::RenderActive);
    }

    fn render_idle(&mut self) {
        self.calls.push(PresenterCall::RenderIdle);
    }

    fn render_remaining(&mut self, text: &str) {
        self.calls.push(PresenterCall::RenderRemaining(text.to_string()));
    }

    fn play_feedback_sound(&mut self) {
        self.calls.push(PresenterCall::PlayFeedbackSound);
    }

    fn notify_completion(&mut self, title: &str, body: &str) {
        self.calls.push(PresenterCall::NotifyCompletion {
            title: title.to_string(),
            body: body.to_string(),
        });
    }

    fn render_sound_enabled(&mut self, enabled: bool) {
        self.calls.push(PresenterCall::RenderSoundEnabled(enabled));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::MockNotifier;
    use crate::sound::MockSoundPlayer;
    use std::sync::{Arc, Mutex};

    /// Surface that records into a shared log so tests can inspect it after
    /// the adapter takes ownership.
    struct RecordingSurface {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Surface for RecordingSurface {
        fn name(&self) -> &'static str {
            self.name
        }

        fn show_active(&mut self) {
            self.log.lock().unwrap().push(format!("{}:active", self.name));
        }

        fn show_idle(&mut self) {
            self.log.lock().unwrap().push(format!("{}:idle", self.name));
        }

        fn show_remaining(&mut self, text: &str) {
            self.log.lock().unwrap().push(format!("{}:{}", self.name, text));
        }

        fn show_sound_enabled(&mut self, enabled: bool) {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:sound={}", self.name, enabled));
        }
    }

    fn recording(name: &'static str, log: &Arc<Mutex<Vec<String>>>) -> RecordingSurface {
        RecordingSurface {
            name,
            log: Arc::clone(log),
        }
    }

    mod adapter_tests {
        use super::*;

        #[test]
        fn test_renders_to_every_surface() {
            let log = Arc::new(Mutex::new(Vec::new()));
            let mut adapter = PresentationAdapter::new()
                .with_surface(recording("status", &log))
                .with_surface(recording("strip", &log));

            adapter.render_active();
            adapter.render_remaining("24:59");
            adapter.render_idle();

            assert_eq!(
                *log.lock().unwrap(),
                vec![
                    "status:active",
                    "strip:active",
                    "status:24:59",
                    "strip:24:59",
                    "status:idle",
                    "strip:idle",
                ]
            );
        }

        #[test]
        fn test_null_surface_is_tolerated() {
            let log = Arc::new(Mutex::new(Vec::new()));
            let mut adapter = PresentationAdapter::new()
                .with_surface(NullSurface::new("control-strip"))
                .with_surface(recording("status", &log));

            adapter.render_remaining("00:00");

            assert_eq!(*log.lock().unwrap(), vec!["status:00:00"]);
            assert_eq!(adapter.surface_names(), vec!["control-strip", "status"]);
        }

        #[test]
        fn test_sound_enabled_forwarded() {
            let log = Arc::new(Mutex::new(Vec::new()));
            let mut adapter = PresentationAdapter::new().with_surface(recording("status", &log));

            adapter.render_sound_enabled(false);

            assert_eq!(*log.lock().unwrap(), vec!["status:sound=false"]);
        }

        #[test]
        fn test_play_feedback_sound_uses_player() {
            let player = Arc::new(MockSoundPlayer::new());
            let mut adapter =
                PresentationAdapter::new().with_sound_player(Box::new(Arc::clone(&player)));

            adapter.play_feedback_sound();
            adapter.play_feedback_sound();

            assert_eq!(player.play_count(), 2);
        }

        #[test]
        fn test_play_failure_is_swallowed() {
            let player = Arc::new(MockSoundPlayer::new());
            player.set_should_fail(true);
            let mut adapter =
                PresentationAdapter::new().with_sound_player(Box::new(Arc::clone(&player)));

            adapter.play_feedback_sound();

            assert_eq!(player.play_count(), 0);
        }

        #[test]
        fn test_notify_completion_uses_notifier() {
            let notifier = Arc::new(MockNotifier::new());
            let mut adapter =
                PresentationAdapter::new().with_notifier(Box::new(Arc::clone(&notifier)));

            adapter.notify_completion(COMPLETION_TITLE, COMPLETION_BODY);

            assert_eq!(
                notifier.get_notifications(),
                vec![(
                    "Time's up".to_string(),
                    "Keep up the good work!".to_string()
                )]
            );
        }

        #[test]
        fn test_default_adapter_has_no_surfaces() {
            let mut adapter = PresentationAdapter::default();
            assert!(adapter.surface_names().is_empty());

            // Null collaborators must not panic
            adapter.render_active();
            adapter.play_feedback_sound();
            adapter.notify_completion("t", "b");
        }

        #[test]
        fn test_debug() {
            let adapter = PresentationAdapter::new().with_surface(NullSurface::new("strip"));
            let debug = format!("{:?}", adapter);
            assert!(debug.contains("PresentationAdapter"));
            assert!(debug.contains("strip"));
        }
    }

    mod mock_presenter_tests {
        use super::*;

        #[test]
        fn test_records_calls_in_order() {
            let mut mock = MockPresenter::new();

            mock.render_active();
            mock.render_remaining("00:59");
            mock.play_feedback_sound();
            mock.notify_completion("a", "b");
            mock.render_idle();

            assert_eq!(
                mock.calls(),
                &[
                    PresenterCall::RenderActive,
                    PresenterCall::RenderRemaining("00:59".to_string()),
                    PresenterCall::PlayFeedbackSound,
                    PresenterCall::NotifyCompletion {
                        title: "a".to_string(),
                        body: "b".to_string()
                    },
                    PresenterCall::RenderIdle,
                ]
            );
            assert_eq!(mock.sound_count(), 1);
            assert_eq!(mock.completion_count(), 1);
            assert_eq!(mock.last_remaining(), Some("00:59"));
        }

        #[test]
        fn test_clear_calls() {
            let mut mock = MockPresenter::new();
            mock.render_active();
            mock.clear_calls();
            assert!(mock.calls().is_empty());
            assert_eq!(mock.last_remaining(), None);
        }
    }
}
