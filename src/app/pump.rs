//! Event pumps for the presentation loop.

use std::time::Duration;

use anyhow::{bail, Result};
use crossbeam_channel::{Receiver, RecvTimeoutError};

use crate::types::AppEvent;

/// Default wait between checks for new events.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Waits for the next application event.
pub trait EventPump {
    /// Returns the next event, or `None` when nothing arrived within one
    /// poll interval.
    ///
    /// # Errors
    ///
    /// Returns an error when every sender has been dropped.
    fn next_event(&mut self, events: &Receiver<AppEvent>) -> Result<Option<AppEvent>>;
}

/// Blocks on the channel alone.
///
/// Used where there is no native event loop to service.
#[derive(Debug, Clone, Copy)]
pub struct ChannelPump {
    poll: Duration,
}

impl ChannelPump {
    pub fn new(poll: Duration) -> Self {
        Self { poll }
    }
}

impl Default for ChannelPump {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl EventPump for ChannelPump {
    fn next_event(&mut self, events: &Receiver<AppEvent>) -> Result<Option<AppEvent>> {
        match events.recv_timeout(self.poll) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => bail!("event channel closed"),
        }
    }
}

#[cfg(target_os = "macos")]
pub use cocoa::CocoaPump;

#[cfg(target_os = "macos")]
mod cocoa {
    use std::time::Duration;

    use anyhow::{bail, Context, Result};
    use crossbeam_channel::{Receiver, TryRecvError};
    use objc2::rc::Retained;
    use objc2::MainThreadMarker;
    use objc2_app_kit::{NSApplication, NSApplicationActivationPolicy, NSEventMask};
    use objc2_foundation::{NSDate, NSDefaultRunLoopMode};

    use super::{EventPump, DEFAULT_POLL_INTERVAL};
    use crate::types::AppEvent;

    /// Services the AppKit event queue between channel checks.
    ///
    /// The status item only reacts to clicks while AppKit events are being
    /// dispatched on the main thread.
    pub struct CocoaPump {
        app: Retained<NSApplication>,
        poll: Duration,
    }

    impl CocoaPump {
        /// Sets up the shared application as a menu-bar-only agent.
        ///
        /// # Errors
        ///
        /// Returns an error when not called from the main thread.
        pub fn new() -> Result<Self> {
            let mtm = MainThreadMarker::new()
                .context("the AppKit event pump must be created on the main thread")?;
            let app = NSApplication::sharedApplication(mtm);
            app.setActivationPolicy(NSApplicationActivationPolicy::Accessory);
            #[allow(unused_unsafe)]
            unsafe {
                app.finishLaunching();
            }
            Ok(Self {
                app,
                poll: DEFAULT_POLL_INTERVAL,
            })
        }

        /// Dispatches pending AppKit events, waiting up to one poll interval
        /// for the first.
        fn pump_native(&self) {
            let mut wait = self.poll.as_secs_f64();
            loop {
                #[allow(unused_unsafe)]
                let event = unsafe {
                    let until = NSDate::dateWithTimeIntervalSinceNow(wait);
                    self.app.nextEventMatchingMask_untilDate_inMode_dequeue(
                        NSEventMask::Any,
                        Some(&until),
                        NSDefaultRunLoopMode,
                        true,
                    )
                };
                let Some(event) = event else {
                    break;
                };
                #[allow(unused_unsafe)]
                unsafe {
                    self.app.sendEvent(&event);
                }
                wait = 0.0;
            }
        }
    }

    impl EventPump for CocoaPump {
        fn next_event(&mut self, events: &Receiver<AppEvent>) -> Result<Option<AppEvent>> {
            match events.try_recv() {
                Ok(event) => return Ok(Some(event)),
                Err(TryRecvError::Disconnected) => bail!("event channel closed"),
                Err(TryRecvError::Empty) => {}
            }

            self.pump_native();

            match events.try_recv() {
                Ok(event) => Ok(Some(event)),
                Err(TryRecvError::Empty) => Ok(None),
                Err(TryRecvError::Disconnected) => bail!("event channel closed"),
            }
        }
    }

    impl std::fmt::Debug for CocoaPump {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("CocoaPump")
                .field("poll", &self.poll)
                .finish_non_exhaustive()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_channel_pump_returns_event() {
        let (tx, rx) = unbounded();
        tx.send(AppEvent::Toggle).unwrap();

        let mut pump = ChannelPump::default();
        assert_eq!(pump.next_event(&rx).unwrap(), Some(AppEvent::Toggle));
    }

    #[test]
    fn test_channel_pump_times_out() {
        let (_tx, rx) = unbounded::<AppEvent>();

        let mut pump = ChannelPump::new(Duration::from_millis(5));
        assert_eq!(pump.next_event(&rx).unwrap(), None);
    }

    #[test]
    fn test_channel_pump_disconnected() {
        let (tx, rx) = unbounded::<AppEvent>();
        drop(tx);

        let mut pump = ChannelPump::new(Duration::from_millis(5));
        let err = pump.next_event(&rx).unwrap_err();
        assert!(err.to_string().contains("closed"));
    }

    #[test]
    fn test_channel_pump_drains_in_order() {
        let (tx, rx) = unbounded();
        tx.send(AppEvent::Toggle).unwrap();
        tx.send(AppEvent::Quit).unwrap();

        let mut pump = ChannelPump::default();
        assert_eq!(pump.next_event(&rx).unwrap(), Some(AppEvent::Toggle));
        assert_eq!(pump.next_event(&rx).unwrap(), Some(AppEvent::Quit));
    }
}
