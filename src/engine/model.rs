//! Timer state structure and clamping rules

use serde::{Deserialize, Serialize};

/// Upper bound for the countdown: 999 minutes
pub const MAX_SECONDS: u32 = 999 * 60;

/// Clamp a signed second count into `[0, MAX_SECONDS]`
pub fn clamp_seconds(seconds: i64) -> u32 {
    seconds.clamp(0, MAX_SECONDS as i64) as u32
}

/// Mutable countdown state owned by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct TimerState {
    pub remaining_seconds: u32,
    /// Value restored by the last user or config set; the tick never touches it
    pub initial_seconds: u32,
    pub is_running: bool,
    /// Fractional scroll leftover, only consumed in whole steps
    pub scroll_accumulator: f64,
}

impl TimerState {
    /// Create an idle state seeded with a default time in minutes
    pub fn new(default_minutes: u32) -> Self {
        let seconds = clamp_seconds(default_minutes as i64 * 60);
        Self {
            remaining_seconds: seconds,
            initial_seconds: seconds,
            is_running: false,
            scroll_accumulator: 0.0,
        }
    }

    /// Set both the remaining and the reset value, clamped
    pub fn set_seconds(&mut self, seconds: i64) {
        self.remaining_seconds = clamp_seconds(seconds);
        self.initial_seconds = self.remaining_seconds;
    }

    pub fn hours(&self) -> u32 {
        self.remaining_seconds / 3600
    }

    pub fn minutes(&self) -> u32 {
        self.remaining_seconds / 60
    }

    pub fn seconds(&self) -> u32 {
        self.remaining_seconds % 60
    }

    /// Human readable label, `MM:SS` below one hour and `HH:MM:SS` above
    pub fn label(&self) -> String {
        format_remaining(self.remaining_seconds)
    }
}

/// Format a second count as `MM:SS` or `HH:MM:SS`
pub fn format_remaining(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Read-only view of the engine published after every redraw request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub remaining_seconds: u32,
    pub initial_seconds: u32,
    pub is_running: bool,
    pub label: String,
    pub entry_open: bool,
    pub entry_minutes: u32,
    pub entry_seconds: u32,
}

impl TimerSnapshot {
    /// Snapshot of a freshly constructed idle timer
    pub fn idle(default_minutes: u32) -> Self {
        let state = TimerState::new(default_minutes);
        Self {
            remaining_seconds: state.remaining_seconds,
            initial_seconds: state.initial_seconds,
            is_running: false,
            label: state.label(),
            entry_open: false,
            entry_minutes: state.minutes(),
            entry_seconds: state.seconds(),
        }
    }
}
