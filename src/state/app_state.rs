//! Shared state behind the HTTP control surface

use std::{
    path::PathBuf,
    sync::Mutex,
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::info;

use crate::{
    engine::TimerSnapshot,
    error::DialError,
    settings::TimerConfig,
    tasks::EngineHandle,
};

/// State handed to every HTTP handler
#[derive(Debug)]
pub struct AppState {
    /// Sender side of the engine task
    pub engine: EngineHandle,
    /// Latest snapshot published by the engine
    pub snapshot_rx: watch::Receiver<TimerSnapshot>,
    /// Settings change notifications consumed by the engine
    pub settings_tx: watch::Sender<TimerConfig>,
    pub settings_path: PathBuf,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl AppState {
    pub fn new(
        engine: EngineHandle,
        snapshot_rx: watch::Receiver<TimerSnapshot>,
        settings_tx: watch::Sender<TimerConfig>,
        settings_path: PathBuf,
        port: u16,
        host: String,
    ) -> Self {
        Self {
            engine,
            snapshot_rx,
            settings_tx,
            settings_path,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    /// Latest published timer snapshot
    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Current settings
    pub fn settings(&self) -> TimerConfig {
        self.settings_tx.borrow().clone()
    }

    /// Persist new settings and notify the engine
    pub fn update_settings(&self, config: TimerConfig) -> Result<TimerConfig, DialError> {
        let config = config.normalized();
        config.save(&self.settings_path)?;
        self.settings_tx.send_replace(config.clone());
        info!("Settings updated: default={}m", config.default_time);
        Ok(config)
    }

    /// Remember the last action for the status endpoint
    pub fn record_action(&self, action: &str) {
        if let Ok(mut last) = self.last_action.lock() {
            *last = Some((action.to_string(), Utc::now()));
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|a| a.clone()) {
            Some((action, time)) => (Some(action), Some(time)),
            None => (None, None),
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
