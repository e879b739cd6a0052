//! Exact time entry popover model
//!
//! The popover shows two bounded fields. Values pushed from the engine go
//! through [`NumericEntry::sync_from`] and never produce an edit; only user
//! edits that actually change a field are reported back.

use serde::{Deserialize, Serialize};

pub const MAX_ENTRY_MINUTES: u32 = 999;
pub const MAX_ENTRY_SECONDS: u32 = 59;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericEntry {
    pub open: bool,
    pub minutes: u32,
    pub seconds: u32,
}

impl NumericEntry {
    pub fn new(remaining_seconds: u32) -> Self {
        let mut entry = Self::default();
        entry.sync_from(remaining_seconds);
        entry
    }

    /// Seed the fields from the model and show the popover
    pub fn open_with(&mut self, remaining_seconds: u32) {
        self.sync_from(remaining_seconds);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Programmatic update of the displayed values; never reported as an edit
    pub fn sync_from(&mut self, remaining_seconds: u32) {
        self.minutes = (remaining_seconds / 60).min(MAX_ENTRY_MINUTES);
        self.seconds = remaining_seconds % 60;
    }

    /// Apply a user edit and return the new total in seconds when a field changed.
    ///
    /// Field values are clamped to their bounds first.
    pub fn edit(&mut self, minutes: u32, seconds: u32) -> Option<u32> {
        let minutes = minutes.min(MAX_ENTRY_MINUTES);
        let seconds = seconds.min(MAX_ENTRY_SECONDS);

        if minutes == self.minutes && seconds == self.seconds {
            return None;
        }

        self.minutes = minutes;
        self.seconds = seconds;
        Some(self.total_seconds())
    }

    pub fn total_seconds(&self) -> u32 {
        self.minutes * 60 + self.seconds
    }
}
