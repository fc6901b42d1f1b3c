//! Notification content and request construction.

use objc2::rc::Retained;
use objc2_foundation::NSString;
use objc2_user_notifications::{UNMutableNotificationContent, UNNotificationRequest};
use uuid::Uuid;

/// Builder for constructing notification content.
pub struct NotificationContentBuilder {
    content: Retained<UNMutableNotificationContent>,
}

impl NotificationContentBuilder {
    /// Creates a new notification content builder.
    #[must_use]
    pub fn new() -> Self {
        let content = unsafe { UNMutableNotificationContent::new() };
        Self { content }
    }

    /// Sets the notification title.
    #[must_use]
    pub fn title(self, title: &str) -> Self {
        let title = NSString::from_str(title);
        unsafe {
            self.content.setTitle(&title);
        }
        self
    }

    /// Sets the notification body text.
    #[must_use]
    pub fn body(self, body: &str) -> Self {
        let body = NSString::from_str(body);
        unsafe {
            self.content.setBody(&body);
        }
        self
    }

    /// Builds and returns the notification content.
    #[must_use]
    pub fn build(self) -> Retained<UNMutableNotificationContent> {
        self.content
    }
}

/// Creates an immediate request for an alert with a fresh identifier.
///
/// The notification's own sound is left off; the feedback sound is
/// played separately and gated by the sound preference.
#[must_use]
pub fn create_alert_request(title: &str, body: &str) -> Retained<UNNotificationRequest> {
    let content = NotificationContentBuilder::new().title(title).body(body).build();
    let identifier = NSString::from_str(&Uuid::new_v4().to_string());

    UNNotificationRequest::requestWithIdentifier_content_trigger(&identifier, &content, None)
}
