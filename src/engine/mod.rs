//! Timer engine module
//!
//! Holds the countdown state machine, the clock driver seam and the hooks
//! the engine calls out to.

pub mod clock;
#[allow(clippy::module_inception)]
pub mod engine;
pub mod hooks;
pub mod model;

// Re-export main types
pub use clock::{ManualScheduler, TickHandle, TickScheduler, TICK_INTERVAL};
pub use engine::{ClickOutcome, Phase, TickOutcome, TimerEngine, QUICK_ADJUST_MINUTES};
pub use hooks::{CountingHook, FinishNotifier, NoopNotifier, NoopRedraw, RedrawRequester};
pub use model::{format_remaining, TimerSnapshot, TimerState, MAX_SECONDS};
