//! Visible surfaces the timer state is rendered to.

use tracing::{debug, info};

/// A place where timer state is shown, such as the status bar item.
pub trait Surface {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Switches to the running appearance.
    fn show_active(&mut self);

    /// Switches to the idle appearance.
    fn show_idle(&mut self);

    /// Shows the `MM:SS` remaining time.
    fn show_remaining(&mut self, text: &str);

    /// Shows whether feedback sounds are enabled.
    fn show_sound_enabled(&mut self, _enabled: bool) {}
}

/// Surface that is not wired to anything.
///
/// Stands in for optional outlets such as the Touch Bar control strip,
/// which has no backing on most machines.
#[derive(Debug, Clone, Copy)]
pub struct NullSurface {
    name: &'static str,
}

impl NullSurface {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Surface for NullSurface {
    fn name(&self) -> &'static str {
        self.name
    }

    fn show_active(&mut self) {}

    fn show_idle(&mut self) {}

    fn show_remaining(&mut self, _text: &str) {}
}

/// Surface that writes state changes to the log.
///
/// Used on platforms without a status bar.
#[derive(Debug, Default)]
pub struct LogSurface {
    last_text: Option<String>,
}

impl LogSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last remaining-time text shown.
    pub fn last_text(&self) -> Option<&str> {
        self.last_text.as_deref()
    }
}

impl Surface for LogSurface {
    fn name(&self) -> &'static str {
        "log"
    }

    fn show_active(&mut self) {
        info!("interval started");
    }

    fn show_idle(&mut self) {
        self.last_text = None;
        info!("timer idle");
    }

    fn show_remaining(&mut self, text: &str) {
        debug!(remaining = %text, "tick");
        // Once a minute is enough at info level
        if text.ends_with(":00") {
            info!("{} remaining", text);
        }
        self.last_text = Some(text.to_string());
    }

    fn show_sound_enabled(&mut self, enabled: bool) {
        info!("sound {}", if enabled { "on" } else { "off" });
    }
}
