//! Event handling for menu bar interactions.
//!
//! Menu clicks are mapped to [`MenuAction`]s and then to the [`AppEvent`]
//! sent to the presentation thread. The mapping is platform-independent.

use std::fmt;

use crate::types::AppEvent;

// ============================================================================
// MenuAction
// ============================================================================

/// Actions that can be triggered from the menu bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Start or stop the interval
    Toggle,
    /// Flip the sound preference
    ToggleSound,
    /// Quit the application
    Quit,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::Toggle => write!(f, "toggle"),
            MenuAction::ToggleSound => write!(f, "toggle_sound"),
            MenuAction::Quit => write!(f, "quit"),
        }
    }
}

impl MenuAction {
    /// Returns the event delivered to the presentation thread.
    pub fn to_app_event(&self) -> AppEvent {
        match self {
            MenuAction::Toggle => AppEvent::Toggle,
            MenuAction::ToggleSound => AppEvent::ToggleSound,
            MenuAction::Quit => AppEvent::Quit,
        }
    }
}

// ============================================================================
// MenuItemId
// ============================================================================

/// Identifiers for menu items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItemId {
    /// Start menu item
    Start,
    /// Stop menu item
    Stop,
    /// Sound checkbox
    Sound,
    /// Quit menu item
    Quit,
    /// Unknown or unhandled menu item
    Unknown,
}

impl MenuItemId {
    /// Converts a menu item ID to the corresponding action.
    ///
    /// Start and Stop are two entry points to the same toggle.
    pub fn to_action(&self) -> Option<MenuAction> {
        match self {
            MenuItemId::Start | MenuItemId::Stop => Some(MenuAction::Toggle),
            MenuItemId::Sound => Some(MenuAction::ToggleSound),
            MenuItemId::Quit => Some(MenuAction::Quit),
            MenuItemId::Unknown => None,
        }
    }
}

// ============================================================================
// EventHandler
// ============================================================================

/// Converts menu clicks into application events.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventHandler;

impl EventHandler {
    /// Creates a new EventHandler.
    pub fn new() -> Self {
        Self
    }

    /// Processes a menu item click and returns the event to send, if any.
    pub fn handle_click(&self, item_id: MenuItemId) -> Option<AppEvent> {
        let action = item_id.to_action()?;
        tracing::debug!(action = %action, item = ?item_id, "menu action received");
        Some(action.to_app_event())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod menu_action_tests {
        use super::*;

        #[test]
        fn test_display() {
            assert_eq!(MenuAction::Toggle.to_string(), "toggle");
            assert_eq!(MenuAction::ToggleSound.to_string(), "toggle_sound");
            assert_eq!(MenuAction::Quit.to_string(), "quit");
        }

        #[test]
        fn test_to_app_event() {
            assert_eq!(MenuAction::Toggle.to_app_event(), AppEvent::Toggle);
            assert_eq!(MenuAction::ToggleSound.to_app_event(), AppEvent::ToggleSound);
            assert_eq!(MenuAction::Quit.to_app_event(), AppEvent::Quit);
        }
    }

    mod menu_item_id_tests {
        use super::*;

        #[test]
        fn test_start_and_stop_share_toggle() {
            assert_eq!(MenuItemId::Start.to_action(), Some(MenuAction::Toggle));
            assert_eq!(MenuItemId::Stop.to_action(), Some(MenuAction::Toggle));
        }

        #[test]
        fn test_other_items() {
            assert_eq!(MenuItemId::Sound.to_action(), Some(MenuAction::ToggleSound));
            assert_eq!(MenuItemId::Quit.to_action(), Some(MenuAction::Quit));
            assert_eq!(MenuItemId::Unknown.to_action(), None);
        }
    }

    mod event_handler_tests {
        use super::*;

        #[test]
        fn test_handle_click() {
            let handler = EventHandler::new();
            assert_eq!(handler.handle_click(MenuItemId::Start), Some(AppEvent::Toggle));
            assert_eq!(handler.handle_click(MenuItemId::Stop), Some(AppEvent::Toggle));
            assert_eq!(
                handler.handle_click(MenuItemId::Sound),
                Some(AppEvent::ToggleSound)
            );
            assert_eq!(handler.handle_click(MenuItemId::Quit), Some(AppEvent::Quit));
        }

        #[test]
        fn test_handle_click_unknown() {
            let handler = EventHandler::new();
            assert_eq!(handler.handle_click(MenuItemId::Unknown), None);
        }
    }
}
