//! Notification system error types.

use thiserror::Error;

/// Errors that can occur in the notification system.
///
/// Delivery is fire-and-forget, so these only ever reach the log.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Failed to request notification authorization from the system.
    #[error("failed to request notification authorization: {0}")]
    AuthorizationFailed(String),

    /// Notification permission was denied by the user.
    #[error("notification permission denied")]
    PermissionDenied,

    /// Failed to deliver a notification.
    #[error("failed to deliver notification: {0}")]
    SendFailed(String),

    /// The process is not running from an application bundle.
    #[error("not running from an application bundle")]
    NotBundled,
}

impl NotificationError {
    /// Returns true if this error is related to permissions.
    #[must_use]
    pub fn is_permission_error(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::AuthorizationFailed(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::AuthorizationFailed(_) | Self::PermissionDenied => {
                "allow notifications in System Settings > Notifications"
            }
            Self::SendFailed(_) => "check the notification center",
            Self::NotBundled => "run TomatoBar from its .app bundle to get notifications",
        }
    }
}
