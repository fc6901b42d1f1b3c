//! Presentation loop.
//!
//! Every entry point (menu clicks, the terminal, Ctrl-C, the tick thread)
//! holds a clone of one `crossbeam_channel::Sender<AppEvent>`. [`App`]
//! drains the receiving end on the main thread and dispatches each event to
//! the [`IntervalTimer`], so timer state has a single writer.

pub mod input;
pub mod pump;

pub use input::{parse_command, spawn_terminal_input};
pub use pump::{ChannelPump, EventPump};

#[cfg(target_os = "macos")]
pub use pump::CocoaPump;

use std::ops::ControlFlow;

use anyhow::Result;
use crossbeam_channel::Receiver;
use tracing::{debug, info};

use crate::preferences::PreferenceStore;
use crate::presenter::Presenter;
use crate::timer::{IntervalTimer, TickSource};
use crate::types::AppEvent;

/// Owns the timer and the receiving end of the event channel.
pub struct App<P, T, S> {
    timer: IntervalTimer<P, T, S>,
    events: Receiver<AppEvent>,
}

impl<P, T, S> App<P, T, S>
where
    P: Presenter,
    T: TickSource,
    S: PreferenceStore,
{
    pub fn new(timer: IntervalTimer<P, T, S>, events: Receiver<AppEvent>) -> Self {
        Self { timer, events }
    }

    /// Dispatches one event.
    ///
    /// Returns `ControlFlow::Break` once the application should exit.
    pub fn handle(&mut self, event: AppEvent) -> ControlFlow<()> {
        match event {
            AppEvent::Toggle => {
                let phase = self.timer.request_toggle();
                debug!(phase = %phase, "toggle handled");
            }
            AppEvent::Tick(generation) => {
                self.timer.tick(generation);
            }
            AppEvent::ToggleSound => {
                self.timer.toggle_sound();
            }
            AppEvent::Quit => {
                info!("quit requested");
                self.timer.shutdown();
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Runs until a quit event arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed before quitting.
    pub fn run(&mut self, pump: &mut dyn EventPump) -> Result<()> {
        info!("presentation loop started");
        loop {
            let Some(event) = pump.next_event(&self.events)? else {
                continue;
            };
            if self.handle(event).is_break() {
                info!("presentation loop finished");
                return Ok(());
            }
        }
    }

    /// Returns a reference to the timer.
    pub fn timer(&self) -> &IntervalTimer<P, T, S> {
        &self.timer
    }
}

impl<P, T, S> std::fmt::Debug for App<P, T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("timer", &self.timer)
            .field("pending_events", &self.events.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
