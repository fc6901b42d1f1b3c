//! Periodic tick sources.
//!
//! A tick source is armed once per interval and produces one
//! `AppEvent::Tick` per second until its handle is dropped. Ticks are
//! produced off the presentation thread and only ever delivered through the
//! event channel.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use tokio::runtime::{Builder, Handle};
use tokio::sync::oneshot;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};

use crate::types::{AppEvent, Generation};

/// Period between two ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// TickHandle
// ============================================================================

/// Exclusive handle to an armed tick source.
///
/// Dropping the handle disarms the source.
pub struct TickHandle {
    generation: Generation,
    disarm: Option<Box<dyn FnOnce() + Send>>,
}

impl TickHandle {
    /// Creates a handle that runs `disarm` exactly once when dropped.
    pub fn new(generation: Generation, disarm: impl FnOnce() + Send + 'static) -> Self {
        Self {
            generation,
            disarm: Some(Box::new(disarm)),
        }
    }

    /// Returns the generation the source was armed with.
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        if let Some(disarm) = self.disarm.take() {
            debug!(generation = %self.generation, "tick source disarmed");
            disarm();
        }
    }
}

impl fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickHandle")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TickSource
// ============================================================================

/// Trait for periodic tick source implementations.
pub trait TickSource {
    /// Arms a new source tagged with `generation`.
    ///
    /// The first tick fires immediately and then once per `TICK_PERIOD`.
    fn arm(&mut self, generation: Generation) -> TickHandle;
}

/// Tick source backed by a tokio interval on the tick runtime.
#[derive(Debug, Clone)]
pub struct TokioTickSource {
    runtime: Handle,
    events: Sender<AppEvent>,
}

impl TokioTickSource {
    /// Creates a source that spawns onto `runtime` and delivers to `events`.
    pub fn new(runtime: Handle, events: Sender<AppEvent>) -> Self {
        Self { runtime, events }
    }
}

impl TickSource for TokioTickSource {
    fn arm(&mut self, generation: Generation) -> TickHandle {
        let events = self.events.clone();

        let task = self.runtime.spawn(async move {
            let mut ticker = interval(TICK_PERIOD);
            // Late ticks are delivered, not merged
            ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

            loop {
                ticker.tick().await;
                if events.send(AppEvent::Tick(generation)).is_err() {
                    debug!("event channel closed, stopping tick task");
                    break;
                }
            }
        });

        debug!(generation = %generation, "tick source armed");
        TickHandle::new(generation, move || task.abort())
    }
}

/// Tick source that never fires on its own.
///
/// Tests drive the timer by calling its tick operation directly and use the
/// counters to check that sources are armed and disarmed in pairs.
#[derive(Debug, Clone, Default)]
pub struct ManualTickSource {
    armed: Arc<AtomicUsize>,
    live: Arc<AtomicUsize>,
}

impl ManualTickSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sources armed so far.
    #[must_use]
    pub fn armed_count(&self) -> usize {
        self.armed.load(Ordering::SeqCst)
    }

    /// Number of sources whose handle is still alive.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

impl TickSource for ManualTickSource {
    fn arm(&mut self, generation: Generation) -> TickHandle {
        self.armed.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_add(1, Ordering::SeqCst);

        let live = Arc::clone(&self.live);
        TickHandle::new(generation, move || {
            live.fetch_sub(1, Ordering::SeqCst);
        })
    }
}

// ============================================================================
// TickRuntime
// ============================================================================

/// Tokio runtime running on its own thread.
///
/// This is the execution context ticks are produced on. It also hosts the
/// Ctrl-C listener. Dropping it shuts the runtime down.
pub struct TickRuntime {
    handle: Handle,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl TickRuntime {
    /// Builds the runtime and starts its thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime or its thread cannot be created.
    pub fn start() -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build tick runtime")?;
        let handle = runtime.handle().clone();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let thread = thread::Builder::new()
            .name("tick".to_string())
            .spawn(move || {
                // Resolves on an explicit shutdown or when the sender is dropped
                let _ = runtime.block_on(shutdown_rx);
                debug!("tick runtime stopped");
            })
            .context("Failed to spawn tick thread")?;

        info!("tick runtime started");
        Ok(Self {
            handle,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        })
    }

    /// Returns a handle for spawning onto the runtime.
    pub fn handle(&self) -> Handle {
        self.handle.clone()
    }

    /// Sends `AppEvent::Quit` when the process receives Ctrl-C.
    pub fn forward_ctrl_c(&self, events: Sender<AppEvent>) {
        self.handle.spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, quitting");
                let _ = events.send(AppEvent::Quit);
            }
        });
    }
}

impl Drop for TickRuntime {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl fmt::Debug for TickRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickRuntime")
            .field("running", &self.shutdown.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
