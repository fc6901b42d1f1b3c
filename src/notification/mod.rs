//! Completion notifications.
//!
//! When an interval completes, one user-visible alert is fired. Delivery is
//! fire-and-forget: failures are logged and never reach the timer.
//!
//! On macOS the alert goes through `UNUserNotificationCenter`. That API only
//! works for processes launched from an application bundle; anywhere else
//! the alert is written to the log instead.

pub mod error;

#[cfg(target_os = "macos")]
mod center;
#[cfg(target_os = "macos")]
mod content;

#[cfg(target_os = "macos")]
pub use self::center::UserNotificationCenter;
pub use self::error::NotificationError;

use std::sync::{Arc, Mutex};

use tracing::info;

/// Trait for notification delivery implementations.
pub trait CompletionNotifier {
    /// Fires an alert with the given title and body.
    fn notify(&self, title: &str, body: &str);
}

impl<T: CompletionNotifier + ?Sized> CompletionNotifier for Arc<T> {
    fn notify(&self, title: &str, body: &str) {
        (**self).notify(title, body)
    }
}

/// Notifier that writes alerts to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl CompletionNotifier for LogNotifier {
    fn notify(&self, title: &str, body: &str) {
        info!("🍅 {}: {}", title, body);
    }
}

/// Creates the notifier for this platform.
#[cfg(target_os = "macos")]
pub fn create_notifier() -> Box<dyn CompletionNotifier> {
    match UserNotificationCenter::new() {
        Ok(center) => Box::new(center),
        Err(e) => {
            tracing::warn!("Notifications unavailable: {} ({})", e, e.suggestion());
            Box::new(LogNotifier)
        }
    }
}

/// Creates the notifier for this platform.
#[cfg(not(target_os = "macos"))]
pub fn create_notifier() -> Box<dyn CompletionNotifier> {
    Box::new(LogNotifier)
}

/// Mock notifier for testing.
#[derive(Debug, Default)]
pub struct MockNotifier {
    notifications: Mutex<Vec<(String, String)>>,
}

impl MockNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get_notifications(&self) -> Vec<(String, String)> {
        self.notifications.lock().unwrap().clone()
    }

    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }
}

impl CompletionNotifier for MockNotifier {
    fn notify(&self, title: &str, body: &str) {
        self.notifications
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
    }
}
