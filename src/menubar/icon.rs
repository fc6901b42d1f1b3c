//! Title management for the status bar item.
//!
//! The item shows only the tomato while idle and the tomato followed by the
//! remaining time while running (e.g., "🍅 15:30").

use crate::types::TimerPhase;

/// Emoji standing in for the status bar icon
const TOMATO_EMOJI: &str = "🍅";

/// Generates the status bar title.
#[derive(Debug, Default)]
pub struct IconManager {
    /// Last known timer phase
    last_phase: Option<TimerPhase>,
}

impl IconManager {
    /// Creates a new IconManager.
    pub fn new() -> Self {
        Self { last_phase: None }
    }

    /// Generates the title text for the status bar.
    ///
    /// Before the first tick of an interval there is no remaining text yet,
    /// so the running title is just the icon.
    ///
    /// ```
    /// use tomatobar::menubar::IconManager;
    /// use tomatobar::types::TimerPhase;
    ///
    /// let manager = IconManager::new();
    /// assert_eq!(manager.generate_title(TimerPhase::Running, Some("15:30")), "🍅 15:30");
    /// assert_eq!(manager.generate_title(TimerPhase::Idle, Some("15:30")), "🍅");
    /// ```
    pub fn generate_title(&self, phase: TimerPhase, remaining: Option<&str>) -> String {
        match (phase, remaining) {
            (TimerPhase::Running, Some(text)) => format!("{} {}", TOMATO_EMOJI, text),
            (TimerPhase::Running, None) | (TimerPhase::Idle, _) => TOMATO_EMOJI.to_string(),
        }
    }

    /// Checks if the phase has changed since last update.
    pub fn phase_changed(&mut self, phase: TimerPhase) -> bool {
        let changed = self.last_phase != Some(phase);
        if changed {
            self.last_phase = Some(phase);
        }
        changed
    }
}
