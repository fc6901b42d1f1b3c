//! TomatoBar - a minimal menu bar Pomodoro timer
//!
//! Click the tomato, choose Start, and a countdown runs in the menu bar.
//! When it reaches zero a notification is shown and the timer goes idle.

use anyhow::Result;
use crossbeam_channel::unbounded;

use tomatobar::app::{spawn_terminal_input, App, EventPump};
use tomatobar::menubar::StatusBarSurface;
use tomatobar::notification::create_notifier;
use tomatobar::preferences::{JsonPreferenceStore, MemoryPreferenceStore, PreferenceStore};
use tomatobar::presenter::{NullSurface, PresentationAdapter};
use tomatobar::sound::create_feedback_player;
use tomatobar::timer::{IntervalTimer, TickRuntime, TokioTickSource};
use tomatobar::types::Preferences;

/// Main entry point
fn main() {
    // Initialize logging
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Wires the collaborators together and runs the presentation loop.
fn run() -> Result<()> {
    let preferences = open_preferences();
    let (events_tx, events_rx) = unbounded();

    // Declared first so it is dropped after the timer disarms its ticks
    let runtime = TickRuntime::start()?;
    runtime.forward_ctrl_c(events_tx.clone());
    let ticks = TokioTickSource::new(runtime.handle(), events_tx.clone());

    // The native application must exist before the status item is created
    let mut pump = create_pump()?;

    let mut status_bar = StatusBarSurface::new(preferences.is_sound_enabled());
    status_bar.initialize(events_tx.clone())?;

    let presenter = PresentationAdapter::new()
        .with_surface(status_bar)
        .with_surface(NullSurface::new("control-strip"))
        .with_sound_player(create_feedback_player())
        .with_notifier(create_notifier());
    let presenter = with_log_surface(presenter);

    let timer = IntervalTimer::new(presenter, ticks, preferences);
    let mut app = App::new(timer, events_rx);

    if spawn_terminal_input(events_tx).is_some() {
        eprintln!("TomatoBar running. Enter: start/stop, s: toggle sound, q: quit");
    }

    app.run(pump.as_mut())
}

/// Opens the preference file, falling back to in-memory defaults.
fn open_preferences() -> Box<dyn PreferenceStore> {
    match JsonPreferenceStore::open_default() {
        Ok(store) => {
            tracing::debug!(path = %store.path().display(), "preferences opened");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!("Preferences will not be saved: {} ({})", e, e.suggestion());
            Box::new(MemoryPreferenceStore::new(Preferences::default()))
        }
    }
}

#[cfg(target_os = "macos")]
fn create_pump() -> Result<Box<dyn EventPump>> {
    Ok(Box::new(tomatobar::app::CocoaPump::new()?))
}

#[cfg(not(target_os = "macos"))]
fn create_pump() -> Result<Box<dyn EventPump>> {
    Ok(Box::new(tomatobar::app::ChannelPump::default()))
}

#[cfg(target_os = "macos")]
fn with_log_surface(presenter: PresentationAdapter) -> PresentationAdapter {
    presenter
}

/// Without a status bar, state changes go to the log.
#[cfg(not(target_os = "macos"))]
fn with_log_surface(presenter: PresentationAdapter) -> PresentationAdapter {
    presenter.with_surface(tomatobar::presenter::LogSurface::new())
}
