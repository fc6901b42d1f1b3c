//! UNUserNotificationCenter backed notifier.

use block2::RcBlock;
use objc2::rc::Retained;
use objc2::runtime::Bool;
use objc2_foundation::{NSBundle, NSError};
use objc2_user_notifications::{UNAuthorizationOptions, UNUserNotificationCenter};
use tracing::{debug, warn};

use super::content::create_alert_request;
use super::error::NotificationError;
use super::CompletionNotifier;

/// Delivers alerts through the user notification center.
pub struct UserNotificationCenter {
    center: Retained<UNUserNotificationCenter>,
}

impl UserNotificationCenter {
    /// Connects to the notification center and requests authorization.
    ///
    /// Authorization is requested without waiting for the answer; a denial
    /// is logged when it arrives.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::NotBundled` when the process has no
    /// bundle identifier, since the notification center rejects such
    /// processes.
    pub fn new() -> Result<Self, NotificationError> {
        if NSBundle::mainBundle().bundleIdentifier().is_none() {
            return Err(NotificationError::NotBundled);
        }

        let center = UNUserNotificationCenter::currentNotificationCenter();
        Self::request_authorization(&center);
        Ok(Self { center })
    }

    fn request_authorization(center: &UNUserNotificationCenter) {
        let options = UNAuthorizationOptions::Alert | UNAuthorizationOptions::Sound;

        let block = RcBlock::new(|granted: Bool, error: *mut NSError| {
            let result = match unsafe { error.as_ref() } {
                Some(err) => Err(NotificationError::AuthorizationFailed(
                    err.localizedDescription().to_string(),
                )),
                None if !granted.as_bool() => Err(NotificationError::PermissionDenied),
                None => Ok(()),
            };
            match result {
                Ok(()) => debug!("notification authorization granted"),
                Err(e) => warn!("{} ({})", e, e.suggestion()),
            }
        });

        center.requestAuthorizationWithOptions_completionHandler(options, &block);
    }
}

impl CompletionNotifier for UserNotificationCenter {
    fn notify(&self, title: &str, body: &str) {
        let request = create_alert_request(title, body);

        let block = RcBlock::new(|error: *mut NSError| {
            if let Some(err) = unsafe { error.as_ref() } {
                let e = NotificationError::SendFailed(err.localizedDescription().to_string());
                warn!("{} ({})", e, e.suggestion());
            }
        });

        self.center
            .addNotificationRequest_withCompletionHandler(&request, Some(&block));
        debug!(title, "notification requested");
    }
}

impl std::fmt::Debug for UserNotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserNotificationCenter").finish_non_exhaustive()
    }
}
