//! Menu configuration for the status bar item.
//!
//! Determines which items are enabled for the current phase. The logic is
//! platform-independent; the native menu is built from a [`MenuConfig`] in
//! the platform-specific code.

use crate::types::TimerPhase;

// ============================================================================
// MenuItemConfig
// ============================================================================

/// Configuration for a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemConfig {
    /// Display text for the menu item
    pub text: String,
    /// Whether the menu item is enabled (clickable)
    pub enabled: bool,
    /// Check mark state, for checkbox items
    pub checked: Option<bool>,
}

impl MenuItemConfig {
    /// Creates a plain menu item configuration.
    pub fn new(text: impl Into<String>, enabled: bool) -> Self {
        Self {
            text: text.into(),
            enabled,
            checked: None,
        }
    }

    /// Creates a checkbox item configuration.
    pub fn checkbox(text: impl Into<String>, checked: bool) -> Self {
        Self {
            text: text.into(),
            enabled: true,
            checked: Some(checked),
        }
    }
}

// ============================================================================
// MenuConfig
// ============================================================================

/// Complete menu configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    /// Start item, enabled while idle
    pub start: MenuItemConfig,
    /// Stop item, enabled while running
    pub stop: MenuItemConfig,
    /// Sound checkbox
    pub sound: MenuItemConfig,
    /// Quit item (always enabled)
    pub quit: MenuItemConfig,
}

// ============================================================================
// MenuBuilder
// ============================================================================

/// Builds menu configuration from the timer phase and sound setting.
#[derive(Debug, Default)]
pub struct MenuBuilder;

impl MenuBuilder {
    /// Creates a new MenuBuilder.
    pub fn new() -> Self {
        Self
    }

    /// Builds a complete menu configuration.
    ///
    /// Exactly one of Start and Stop is enabled at a time.
    pub fn build(&self, phase: TimerPhase, sound_enabled: bool) -> MenuConfig {
        MenuConfig {
            start: MenuItemConfig::new("Start", Self::is_start_enabled(phase)),
            stop: MenuItemConfig::new("Stop", Self::is_stop_enabled(phase)),
            sound: MenuItemConfig::checkbox("Sound", sound_enabled),
            quit: MenuItemConfig::new("Quit", true),
        }
    }

    /// Start is available only while idle.
    pub fn is_start_enabled(phase: TimerPhase) -> bool {
        phase == TimerPhase::Idle
    }

    /// Stop is available only while running.
    pub fn is_stop_enabled(phase: TimerPhase) -> bool {
        phase == TimerPhase::Running
    }
}
