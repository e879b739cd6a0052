//! Redraw requests published as snapshots on a watch channel

use tokio::sync::watch;

use crate::engine::{RedrawRequester, TimerSnapshot};

/// Publishes the latest snapshot; readers always see the newest frame state
#[derive(Debug)]
pub struct SnapshotPublisher {
    tx: watch::Sender<TimerSnapshot>,
}

impl SnapshotPublisher {
    pub fn new(tx: watch::Sender<TimerSnapshot>) -> Self {
        Self { tx }
    }
}

impl RedrawRequester for SnapshotPublisher {
    fn request_redraw(&self, snapshot: &TimerSnapshot) {
        // Skip the notification when nothing visible changed
        self.tx.send_if_modified(|current| {
            if current == snapshot {
                false
            } else {
                *current = snapshot.clone();
                true
            }
        });
    }
}
