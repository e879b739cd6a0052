//! Scroll delta accumulation
//!
//! Touchpads report small fractional deltas while mouse wheels report whole
//! notches. Deltas are summed and only whole steps are consumed, so a burst
//! of tiny deltas moves the time exactly as far as one wheel notch.

use tracing::{debug, warn};

use crate::settings::TimerConfig;

/// Step granularity selected by the fine adjust modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollGranularity {
    Minutes,
    Seconds,
}

impl ScrollGranularity {
    pub fn from_fine(fine: bool) -> Self {
        if fine {
            Self::Seconds
        } else {
            Self::Minutes
        }
    }

    /// Seconds moved by one scroll step under `config`
    pub fn step_seconds(self, config: &TimerConfig) -> i64 {
        match self {
            Self::Minutes => config.scroll_min_step as i64 * 60,
            Self::Seconds => config.scroll_sec_step as i64,
        }
    }
}

/// Add `dy` to the accumulator and consume whole steps.
///
/// Returns the signed step count to apply to the time, or `None` while the
/// accumulated magnitude stays below one. Positive `dy` scrolls down and
/// decreases the time.
pub fn accumulate(accumulator: &mut f64, dy: f64) -> Option<i64> {
    if !dy.is_finite() {
        warn!("Ignoring non-finite scroll delta {}", dy);
        return None;
    }

    *accumulator += dy;
    if accumulator.abs() < 1.0 {
        return None;
    }

    let steps = accumulator.trunc();
    *accumulator -= steps;
    debug!("Scroll crossed {} step(s), carry {:.3}", steps, accumulator);
    // Negate before the cast; `as` saturates huge magnitudes
    Some((-steps) as i64)
}
