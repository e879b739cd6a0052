//! Collaborator hooks the engine calls out to

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use super::model::TimerSnapshot;

/// Called once when a running countdown reaches zero.
///
/// Implementations must not block and must swallow their own failures.
pub trait FinishNotifier: Send + Sync {
    fn on_finish(&self);
}

/// Called whenever the visible state changed and a repaint is due
pub trait RedrawRequester: Send + Sync {
    fn request_redraw(&self, snapshot: &TimerSnapshot);
}

/// Notifier that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl FinishNotifier for NoopNotifier {
    fn on_finish(&self) {}
}

/// Redraw requester that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRedraw;

impl RedrawRequester for NoopRedraw {
    fn request_redraw(&self, _snapshot: &TimerSnapshot) {}
}

/// Counts hook invocations; cheap to clone and share with the engine
#[derive(Debug, Default, Clone)]
pub struct CountingHook {
    count: Arc<AtomicUsize>,
}

impl CountingHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl FinishNotifier for CountingHook {
    fn on_finish(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

impl RedrawRequester for CountingHook {
    fn request_redraw(&self, _snapshot: &TimerSnapshot) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}
