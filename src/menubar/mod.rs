//! Menu bar UI for the interval timer.
//!
//! This module provides:
//! - The status bar item showing "🍅" or "🍅 MM:SS"
//! - A dropdown menu with Start, Stop, Sound and Quit
//! - Mapping of menu clicks to [`AppEvent`]s
//!
//! # Architecture
//!
//! The module is split into platform-independent and platform-specific parts:
//!
//! - `icon.rs`: Title text generation (platform-independent, fully testable)
//! - `menu.rs`: Menu configuration (platform-independent, fully testable)
//! - `event.rs`: Click-to-event mapping (platform-independent, fully testable)
//! - `mod.rs`: [`StatusBarSurface`] (tray-icon on macOS, no-op elsewhere)
//!
//! # Usage
//!
//! The surface lives on the main thread. Menu clicks arrive on whatever
//! thread the menu library uses and are forwarded as events over a
//! crossbeam channel, so the timer only ever runs on the main thread.
//!
//! ```ignore
//! use tomatobar::menubar::StatusBarSurface;
//! use crossbeam_channel::unbounded;
//!
//! let (tx, rx) = unbounded();
//! let mut status_bar = StatusBarSurface::new(true);
//! status_bar.initialize(tx)?;
//! ```

pub mod event;
pub mod icon;
pub mod menu;

pub use event::{EventHandler, MenuAction, MenuItemId};
pub use icon::IconManager;
pub use menu::{MenuBuilder, MenuConfig, MenuItemConfig};

use crossbeam_channel::Sender;

use crate::presenter::Surface;
use crate::types::{AppEvent, TimerPhase};

// ============================================================================
// StatusBarSurface
// ============================================================================

/// The menu bar status item.
///
/// Keeps the phase, remaining text and sound setting it last rendered so the
/// title and menu can be regenerated from them at any time. On macOS it also
/// owns the tray-icon instance; on other platforms it only tracks state.
pub struct StatusBarSurface {
    icon_manager: IconManager,
    menu_builder: MenuBuilder,
    phase: TimerPhase,
    remaining: Option<String>,
    sound_enabled: bool,
    initialized: bool,
    #[cfg(target_os = "macos")]
    native: Option<native::NativeStatusItem>,
}

impl StatusBarSurface {
    /// Creates the surface in the idle appearance.
    ///
    /// On macOS the native item is not created until `initialize()` is
    /// called on the main thread.
    pub fn new(sound_enabled: bool) -> Self {
        Self {
            icon_manager: IconManager::new(),
            menu_builder: MenuBuilder::new(),
            phase: TimerPhase::Idle,
            remaining: None,
            sound_enabled,
            initialized: false,
            #[cfg(target_os = "macos")]
            native: None,
        }
    }

    /// Returns whether the surface is initialized.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Phase currently shown.
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    /// Generates the current title for the menu bar.
    pub fn title(&self) -> String {
        self.icon_manager
            .generate_title(self.phase, self.remaining.as_deref())
    }

    /// Generates the current menu configuration.
    pub fn menu_config(&self) -> MenuConfig {
        self.menu_builder.build(self.phase, self.sound_enabled)
    }

    /// Creates the status item and starts forwarding menu clicks to `events`.
    ///
    /// Must be called from the main thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the tray icon cannot be created.
    #[cfg(target_os = "macos")]
    pub fn initialize(&mut self, events: Sender<AppEvent>) -> anyhow::Result<()> {
        let item = native::NativeStatusItem::create(&self.title(), &self.menu_config())?;
        item.forward_clicks(events);
        self.native = Some(item);
        self.initialized = true;

        tracing::info!("status bar item initialized");
        Ok(())
    }

    /// Initializes the surface (non-macOS, no-op).
    #[cfg(not(target_os = "macos"))]
    pub fn initialize(&mut self, _events: Sender<AppEvent>) -> anyhow::Result<()> {
        tracing::warn!("the status bar is only supported on macOS");
        self.initialized = true;
        Ok(())
    }

    fn refresh_title(&mut self) {
        let title = self.title();
        tracing::trace!(title = %title, "status bar title");
        #[cfg(target_os = "macos")]
        if let Some(ref native) = self.native {
            native.set_title(&title);
        }
    }

    fn refresh_menu(&mut self) {
        if self.icon_manager.phase_changed(self.phase) {
            tracing::debug!(phase = %self.phase, "menu rebuilt");
        }
        #[cfg(target_os = "macos")]
        if let Some(ref native) = self.native {
            native.apply(&self.menu_config());
        }
    }
}

impl Surface for StatusBarSurface {
    fn name(&self) -> &'static str {
        "status-bar"
    }

    fn show_active(&mut self) {
        self.phase = TimerPhase::Running;
        self.remaining = None;
        self.refresh_title();
        self.refresh_menu();
    }

    fn show_idle(&mut self) {
        self.phase = TimerPhase::Idle;
        self.remaining = None;
        self.refresh_title();
        self.refresh_menu();
    }

    fn show_remaining(&mut self, text: &str) {
        self.remaining = Some(text.to_string());
        self.refresh_title();
    }

    fn show_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
        self.refresh_menu();
    }
}

impl std::fmt::Debug for StatusBarSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusBarSurface")
            .field("initialized", &self.initialized)
            .field("phase", &self.phase)
            .field("remaining", &self.remaining)
            .field("sound_enabled", &self.sound_enabled)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Native status item (macOS)
// ============================================================================

#[cfg(target_os = "macos")]
mod native {
    use anyhow::Context;
    use crossbeam_channel::Sender;
    use tray_icon::menu::{
        CheckMenuItem, Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem,
    };
    use tray_icon::{TrayIcon, TrayIconBuilder};

    use super::{EventHandler, MenuConfig, MenuItemId};
    use crate::types::AppEvent;

    /// The tray icon together with handles to its menu items.
    pub(super) struct NativeStatusItem {
        tray: TrayIcon,
        start: MenuItem,
        stop: MenuItem,
        sound: CheckMenuItem,
        quit: MenuItem,
    }

    impl NativeStatusItem {
        pub(super) fn create(title: &str, config: &MenuConfig) -> anyhow::Result<Self> {
            let start = MenuItem::new(&config.start.text, config.start.enabled, None);
            let stop = MenuItem::new(&config.stop.text, config.stop.enabled, None);
            let sound = CheckMenuItem::new(
                &config.sound.text,
                config.sound.enabled,
                config.sound.checked.unwrap_or(false),
                None,
            );
            let quit = MenuItem::new(&config.quit.text, config.quit.enabled, None);

            let menu = Menu::new();
            menu.append(&start)?;
            menu.append(&stop)?;
            menu.append(&PredefinedMenuItem::separator())?;
            menu.append(&sound)?;
            menu.append(&PredefinedMenuItem::separator())?;
            menu.append(&quit)?;

            let tray = TrayIconBuilder::new()
                .with_title(title)
                .with_menu(Box::new(menu))
                .with_tooltip("TomatoBar")
                .build()
                .context("failed to create the status bar item")?;

            Ok(Self {
                tray,
                start,
                stop,
                sound,
                quit,
            })
        }

        /// Installs the global menu event handler.
        pub(super) fn forward_clicks(&self, events: Sender<AppEvent>) {
            let ids = [
                (self.start.id().clone(), MenuItemId::Start),
                (self.stop.id().clone(), MenuItemId::Stop),
                (self.sound.id().clone(), MenuItemId::Sound),
                (self.quit.id().clone(), MenuItemId::Quit),
            ];
            let handler = EventHandler::new();

            MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
                let item = lookup(&ids, &event.id);
                if let Some(app_event) = handler.handle_click(item) {
                    if events.send(app_event).is_err() {
                        tracing::debug!("event channel closed, menu click dropped");
                    }
                }
            }));
        }

        pub(super) fn set_title(&self, title: &str) {
            self.tray.set_title(Some(title));
        }

        pub(super) fn apply(&self, config: &MenuConfig) {
            self.start.set_enabled(config.start.enabled);
            self.stop.set_enabled(config.stop.enabled);
            self.sound.set_checked(config.sound.checked.unwrap_or(false));
            self.quit.set_enabled(config.quit.enabled);
        }
    }

    fn lookup(ids: &[(MenuId, MenuItemId)], id: &MenuId) -> MenuItemId {
        ids.iter()
            .find(|(known, _)| known == id)
            .map(|(_, item)| *item)
            .unwrap_or(MenuItemId::Unknown)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod surface_tests {
        use super::*;

        #[test]
        fn test_new() {
            let surface = StatusBarSurface::new(true);

            assert!(!surface.is_initialized());
            assert_eq!(surface.phase(), TimerPhase::Idle);
            assert_eq!(surface.title(), "🍅");
            assert_eq!(surface.name(), "status-bar");
        }

        #[test]
        fn test_active_then_remaining() {
            let mut surface = StatusBarSurface::new(true);

            surface.show_active();
            assert_eq!(surface.phase(), TimerPhase::Running);
            assert_eq!(surface.title(), "🍅");

            surface.show_remaining("24:59");
            assert_eq!(surface.title(), "🍅 24:59");
        }

        #[test]
        fn test_idle_clears_remaining() {
            let mut surface = StatusBarSurface::new(true);
            surface.show_active();
            surface.show_remaining("00:00");

            surface.show_idle();

            assert_eq!(surface.phase(), TimerPhase::Idle);
            assert_eq!(surface.title(), "🍅");
        }

        #[test]
        fn test_active_clears_stale_remaining() {
            let mut surface = StatusBarSurface::new(true);
            surface.show_active();
            surface.show_remaining("12:34");
            surface.show_idle();

            surface.show_active();

            assert_eq!(surface.title(), "🍅");
        }

        #[test]
        fn test_menu_follows_phase() {
            let mut surface = StatusBarSurface::new(true);
            assert!(surface.menu_config().start.enabled);
            assert!(!surface.menu_config().stop.enabled);

            surface.show_active();
            assert!(!surface.menu_config().start.enabled);
            assert!(surface.menu_config().stop.enabled);
        }

        #[test]
        fn test_sound_checkbox() {
            let mut surface = StatusBarSurface::new(true);
            assert_eq!(surface.menu_config().sound.checked, Some(true));

            surface.show_sound_enabled(false);
            assert_eq!(surface.menu_config().sound.checked, Some(false));
        }

        #[test]
        fn test_debug() {
            let surface = StatusBarSurface::new(false);

            let debug = format!("{:?}", surface);
            assert!(debug.contains("StatusBarSurface"));
            assert!(debug.contains("initialized"));
        }
    }

    #[cfg(not(target_os = "macos"))]
    mod non_macos_tests {
        use super::*;
        use crossbeam_channel::unbounded;

        #[test]
        fn test_initialize_non_macos() {
            let (tx, _rx) = unbounded();
            let mut surface = StatusBarSurface::new(true);

            let result = surface.initialize(tx);
            assert!(result.is_ok());
            assert!(surface.is_initialized());
        }
    }
}
