//! TomatoBar Library
//!
//! A minimal menu bar Pomodoro timer. It includes:
//! - Interval timer state machine with a one-second countdown
//! - Tick sources (tokio-backed and manual) guarded by generations
//! - Presenter fan-out to visible surfaces, sound and notifications
//! - Persisted preferences (interval length and sound)
//! - Menu bar status item with tray icon (macOS only)
//! - Native macOS completion notifications (macOS only)
//! - Feedback sound playback
//! - Presentation loop fed by a single event channel

pub mod app;
pub mod menubar;
pub mod notification;
pub mod preferences;
pub mod presenter;
pub mod sound;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{AppEvent, Generation, Preferences, TimerPhase};

pub use app::{App, ChannelPump, EventPump};

#[cfg(target_os = "macos")]
pub use app::CocoaPump;

pub use timer::{
    IntervalTimer, ManualTickSource, TickHandle, TickOutcome, TickRuntime, TickSource,
    TokioTickSource,
};

pub use presenter::{
    MockPresenter, NullSurface, PresentationAdapter, Presenter, PresenterCall, Surface,
};

pub use preferences::{JsonPreferenceStore, MemoryPreferenceStore, PreferenceStore};

// Re-export menubar types
pub use menubar::{IconManager, MenuBuilder, StatusBarSurface};

// Re-export sound types
pub use sound::{create_feedback_player, MockSoundPlayer, NullSoundPlayer, SoundError, SoundPlayer};

// Re-export notification types
pub use notification::{create_notifier, CompletionNotifier, LogNotifier, MockNotifier};
