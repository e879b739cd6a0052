//! Clock driver seam: recurring tick registration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Cadence of the countdown tick
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Opaque identifier of one recurring tick registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickHandle(pub u64);

/// Host event loop primitives used by the engine to drive its countdown.
///
/// Implementations deliver ticks back to the engine by calling
/// [`TimerEngine::tick`](crate::engine::TimerEngine::tick) with the handle
/// that produced them. The engine holds at most one live handle and cancels
/// it before dropping it.
pub trait TickScheduler: Send {
    /// Register a recurring callback firing every `interval`
    fn schedule_recurring(&mut self, interval: Duration) -> TickHandle;

    /// Deregister a previously scheduled callback
    fn cancel(&mut self, handle: TickHandle);
}

/// Scheduler that only records registrations.
///
/// Hosts that pump ticks themselves (tests, headless drivers) pair this with
/// direct calls to `tick`.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    active: Vec<TickHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles that were scheduled and not yet cancelled
    pub fn active(&self) -> &[TickHandle] {
        &self.active
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule_recurring(&mut self, _interval: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.active.push(handle);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.active.retain(|h| *h != handle);
    }
}
