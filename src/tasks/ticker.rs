//! Tokio-backed tick scheduler

use std::{collections::HashMap, time::Duration};

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::debug;

use crate::engine::{TickHandle, TickScheduler};

/// Schedules recurring ticks as runtime tasks that post into the engine loop.
///
/// Each registration owns one task; cancelling aborts it. Ticks that were
/// already queued when a registration was cancelled carry a stale handle and
/// are dropped by the engine.
#[derive(Debug)]
pub struct TokioTicker {
    ticks: mpsc::UnboundedSender<TickHandle>,
    next_id: u64,
    tasks: HashMap<TickHandle, JoinHandle<()>>,
}

impl TokioTicker {
    pub fn new(ticks: mpsc::UnboundedSender<TickHandle>) -> Self {
        Self {
            ticks,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    /// Number of live registrations
    pub fn active(&self) -> usize {
        self.tasks.len()
    }
}

impl TickScheduler for TokioTicker {
    fn schedule_recurring(&mut self, period: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        let ticks = self.ticks.clone();

        let task = tokio::spawn(async move {
            // First tick one period from now, not immediately
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if ticks.send(handle).is_err() {
                    debug!("Tick receiver gone, stopping {:?}", handle);
                    break;
                }
            }
        });

        debug!("Scheduled {:?} every {:?}", handle, period);
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            debug!("Cancelled {:?}", handle);
        }
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_every_period_until_cancelled() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = TokioTicker::new(tx);

        let handle = ticker.schedule_recurring(Duration::from_secs(1));
        assert_eq!(ticker.active(), 1);

        tokio::time::sleep(Duration::from_millis(3500)).await;
        let mut received = Vec::new();
        while let Ok(h) = rx.try_recv() {
            received.push(h);
        }
        assert_eq!(received, vec![handle; 3]);

        ticker.cancel(handle);
        assert_eq!(ticker.active(), 0);
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn no_tick_before_first_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = TokioTicker::new(tx);
        ticker.schedule_recurring(Duration::from_secs(1));

        tokio::time::sleep(Duration::from_millis(900)).await;
        assert!(rx.try_recv().is_err());
    }
}
