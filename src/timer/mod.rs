//! Interval timer for TomatoBar.
//!
//! This module contains the only component with real behavior:
//! - `engine`: the Idle/Running state machine and its countdown
//! - `ticker`: the periodic tick sources and the runtime they run on

pub mod engine;
pub mod ticker;

pub use engine::{IntervalTimer, TickOutcome};
pub use ticker::{
    ManualTickSource, TickHandle, TickRuntime, TickSource, TokioTickSource, TICK_PERIOD,
};
