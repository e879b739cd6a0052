//! Timer engine: state machine, input dispatch and tick handling

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{
    clock::{TickHandle, TickScheduler, TICK_INTERVAL},
    hooks::{FinishNotifier, RedrawRequester},
    model::{TimerSnapshot, TimerState},
};
use crate::{
    input::{scroll, Geometry, NumericEntry, Point, Region, ScrollGranularity},
    settings::TimerConfig,
};

/// Minutes moved by the quick-adjust zones
pub const QUICK_ADJUST_MINUTES: i64 = 5;

/// Coarse phase of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Running,
}

/// Result of delivering one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stale handle or engine not running
    Ignored,
    /// Countdown advanced; carries the new remaining seconds
    Decremented(u32),
    /// Countdown hit zero, the engine is idle again and the finish hook ran
    Finished,
}

/// Result of a click on the dial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickOutcome {
    pub region: Region,
    /// Whether the click changed anything
    pub applied: bool,
}

/// Countdown engine owning the timer state and its tick registration
pub struct TimerEngine {
    state: TimerState,
    config: TimerConfig,
    entry: NumericEntry,
    tick_handle: Option<TickHandle>,
    scheduler: Box<dyn TickScheduler>,
    notifier: Arc<dyn FinishNotifier>,
    redraw: Arc<dyn RedrawRequester>,
}

impl TimerEngine {
    /// Create an idle engine seeded from `config`
    pub fn new(
        config: TimerConfig,
        scheduler: Box<dyn TickScheduler>,
        notifier: Arc<dyn FinishNotifier>,
        redraw: Arc<dyn RedrawRequester>,
    ) -> Self {
        let config = config.normalized();
        let state = TimerState::new(config.default_time);
        let entry = NumericEntry::new(state.remaining_seconds);

        Self {
            state,
            config,
            entry,
            tick_handle: None,
            scheduler,
            notifier,
            redraw,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn entry(&self) -> &NumericEntry {
        &self.entry
    }

    pub fn tick_handle(&self) -> Option<TickHandle> {
        self.tick_handle
    }

    pub fn phase(&self) -> Phase {
        if self.state.is_running {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            remaining_seconds: self.state.remaining_seconds,
            initial_seconds: self.state.initial_seconds,
            is_running: self.state.is_running,
            label: self.state.label(),
            entry_open: self.entry.open,
            entry_minutes: self.entry.minutes,
            entry_seconds: self.entry.seconds,
        }
    }

    /// Start or pause the countdown
    pub fn toggle(&mut self) -> bool {
        self.entry.close();

        let changed = if self.state.is_running {
            self.stop_ticking();
            info!("Timer paused at {}", self.state.label());
            true
        } else if self.state.remaining_seconds > 0 {
            self.state.initial_seconds = self.state.remaining_seconds;
            self.start_ticking();
            info!("Timer started from {}", self.state.label());
            true
        } else {
            debug!("Toggle ignored: nothing to count down");
            false
        };

        self.request_redraw();
        changed
    }

    /// Deliver one tick from the scheduler
    pub fn tick(&mut self, handle: TickHandle) -> TickOutcome {
        if !self.state.is_running || self.tick_handle != Some(handle) {
            debug!("Dropping stale tick {:?}", handle);
            return TickOutcome::Ignored;
        }

        if self.state.remaining_seconds > 0 {
            self.state.remaining_seconds -= 1;
            self.entry.sync_from(self.state.remaining_seconds);
            self.request_redraw();
            return TickOutcome::Decremented(self.state.remaining_seconds);
        }

        self.stop_ticking();
        info!("Countdown finished");
        self.notifier.on_finish();
        self.request_redraw();
        TickOutcome::Finished
    }

    /// Set an exact time; ignored while running
    pub fn set_time(&mut self, minutes: u32, seconds: u32) -> bool {
        if self.locked("set time") {
            return false;
        }
        self.state.set_seconds(minutes as i64 * 60 + seconds as i64);
        self.commit()
    }

    /// Restore the configured default time; ignored while running
    pub fn reset(&mut self) -> bool {
        if self.locked("reset") {
            return false;
        }
        self.state.set_seconds(self.config.default_seconds());
        info!("Timer reset to {}", self.state.label());
        self.commit()
    }

    /// Clear the time; ignored while running
    pub fn zero(&mut self) -> bool {
        if self.locked("zero") {
            return false;
        }
        self.state.set_seconds(0);
        info!("Timer set to zero");
        self.commit()
    }

    /// Shift the time by whole minutes; ignored while running
    pub fn nudge(&mut self, delta_minutes: i64) -> bool {
        if self.locked("nudge") {
            return false;
        }
        let target = (self.state.remaining_seconds as i64).saturating_add(delta_minutes.saturating_mul(60));
        self.state.set_seconds(target);
        debug!("Nudged by {}m to {}", delta_minutes, self.state.label());
        self.commit()
    }

    /// Replace the configuration and reseed the time from its default.
    ///
    /// Always permitted. A running countdown keeps running from the new
    /// default.
    pub fn apply_config(&mut self, config: TimerConfig) {
        let config = config.normalized();
        if self.state.is_running {
            warn!(
                "Applying settings while running discards the countdown at {}",
                self.state.label()
            );
        }

        self.config = config;
        self.state.set_seconds(self.config.default_seconds());
        info!(
            "Settings applied: default={}m, scroll steps={}m/{}s",
            self.config.default_time, self.config.scroll_min_step, self.config.scroll_sec_step
        );
        self.commit();
    }

    /// Feed a vertical scroll delta; ignored while running.
    ///
    /// Returns true when the accumulated delta crossed a whole step.
    pub fn scroll(&mut self, dy: f64, granularity: ScrollGranularity) -> bool {
        if self.locked("scroll") {
            return false;
        }

        let Some(delta) = scroll::accumulate(&mut self.state.scroll_accumulator, dy) else {
            return false;
        };

        let step = granularity.step_seconds(&self.config);
        let target = (self.state.remaining_seconds as i64).saturating_add(delta.saturating_mul(step));
        self.state.set_seconds(target);
        debug!("Scroll {:?} x{} to {}", granularity, delta, self.state.label());
        self.commit()
    }

    /// Resolve a click against `geometry` and act on the region hit
    pub fn click(&mut self, point: Point, geometry: &Geometry) -> ClickOutcome {
        let region = geometry.hit_test(point);
        debug!("Click at ({:.1}, {:.1}) hit {:?}", point.x, point.y, region);

        let applied = match region {
            Region::CenterText => self.open_entry(),
            Region::PlayPause => self.toggle(),
            Region::Reset => self.reset(),
            Region::Zero => self.zero(),
            Region::NudgeDown => self.nudge(-QUICK_ADJUST_MINUTES),
            Region::NudgeUp => self.nudge(QUICK_ADJUST_MINUTES),
            Region::Background => self.close_entry(),
        };

        self.request_redraw();
        ClickOutcome { region, applied }
    }

    /// Show the numeric entry seeded from the model; inert while running
    pub fn open_entry(&mut self) -> bool {
        if self.locked("open numeric entry") {
            return false;
        }
        self.entry.open_with(self.state.remaining_seconds);
        self.request_redraw();
        true
    }

    /// Hide the numeric entry; returns whether it was open
    pub fn close_entry(&mut self) -> bool {
        let was_open = self.entry.open;
        self.entry.close();
        if was_open {
            self.request_redraw();
        }
        was_open
    }

    /// Apply a user edit of the numeric entry fields
    pub fn edit_entry(&mut self, minutes: u32, seconds: u32) -> bool {
        if self.locked("numeric entry edit") {
            return false;
        }
        if !self.entry.open {
            debug!("Numeric entry edit ignored: entry is closed");
            return false;
        }

        match self.entry.edit(minutes, seconds) {
            Some(total) => {
                self.state.set_seconds(total as i64);
                self.commit()
            }
            None => false,
        }
    }

    /// Cancel any live tick registration
    pub fn shutdown(&mut self) {
        if self.state.is_running {
            info!("Stopping timer on shutdown");
        }
        self.stop_ticking();
    }

    fn locked(&self, action: &str) -> bool {
        if self.state.is_running {
            debug!("Ignoring {} while running", action);
        }
        self.state.is_running
    }

    fn start_ticking(&mut self) {
        // Never hold two registrations
        self.stop_ticking();
        self.tick_handle = Some(self.scheduler.schedule_recurring(TICK_INTERVAL));
        self.state.is_running = true;
    }

    fn stop_ticking(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            self.scheduler.cancel(handle);
        }
        self.state.is_running = false;
    }

    /// Resync displayed entry values after a model change and repaint
    fn commit(&mut self) -> bool {
        self.entry.sync_from(self.state.remaining_seconds);
        self.request_redraw();
        true
    }

    /// Publish the current snapshot to the redraw requester
    pub fn request_redraw(&self) {
        self.redraw.request_redraw(&self.snapshot());
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        self.stop_ticking();
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("entry", &self.entry)
            .field("tick_handle", &self.tick_handle)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{clock::ManualScheduler, hooks::CountingHook, model::MAX_SECONDS};
    use std::sync::Mutex;

    /// Scheduler that shares its registrations with the test
    #[derive(Clone, Default)]
    struct SharedScheduler(Arc<Mutex<ManualScheduler>>);

    impl SharedScheduler {
        fn active(&self) -> Vec<TickHandle> {
            self.0.lock().unwrap().active().to_vec()
        }
    }

    impl TickScheduler for SharedScheduler {
        fn schedule_recurring(&mut self, interval: std::time::Duration) -> TickHandle {
            self.0.lock().unwrap().schedule_recurring(interval)
        }

        fn cancel(&mut self, handle: TickHandle) {
            self.0.lock().unwrap().cancel(handle)
        }
    }

    struct Fixture {
        engine: TimerEngine,
        scheduler: SharedScheduler,
        finished: CountingHook,
        redraws: CountingHook,
    }

    fn fixture() -> Fixture {
        let scheduler = SharedScheduler::default();
        let finished = CountingHook::new();
        let redraws = CountingHook::new();
        let engine = TimerEngine::new(
            TimerConfig::default(),
            Box::new(scheduler.clone()),
            Arc::new(finished.clone()),
            Arc::new(redraws.clone()),
        );
        Fixture {
            engine,
            scheduler,
            finished,
            redraws,
        }
    }

    #[test]
    fn starts_idle_at_default() {
        let f = fixture();
        assert_eq!(f.engine.state().remaining_seconds, 1500);
        assert_eq!(f.engine.phase(), Phase::Idle);
        assert!(f.scheduler.active().is_empty());
    }

    #[test]
    fn toggle_on_zero_is_noop() {
        let mut f = fixture();
        f.engine.zero();
        let before = f.engine.state().clone();

        assert!(!f.engine.toggle());
        assert_eq!(f.engine.state(), &before);
        assert!(f.scheduler.active().is_empty());
        assert_eq!(f.engine.tick_handle(), None);
    }

    #[test]
    fn toggle_keeps_handle_in_lockstep() {
        let mut f = fixture();
        assert!(f.engine.toggle());
        let handle = f.engine.tick_handle().unwrap();
        assert_eq!(f.scheduler.active(), vec![handle]);

        assert!(f.engine.toggle());
        assert_eq!(f.engine.tick_handle(), None);
        assert!(f.scheduler.active().is_empty());
        assert!(!f.engine.state().is_running);
    }

    #[test]
    fn start_snapshots_initial_seconds() {
        let mut f = fixture();
        f.engine.set_time(1, 0);
        f.engine.toggle();
        let handle = f.engine.tick_handle().unwrap();
        f.engine.tick(handle);
        f.engine.toggle();
        assert_eq!(f.engine.state().remaining_seconds, 59);
        assert_eq!(f.engine.state().initial_seconds, 60);

        f.engine.toggle();
        assert_eq!(f.engine.state().initial_seconds, 59);
    }

    #[test]
    fn ticks_down_then_finishes_once() {
        let mut f = fixture();
        f.engine.set_time(0, 3);
        f.engine.toggle();
        let handle = f.engine.tick_handle().unwrap();

        assert_eq!(f.engine.tick(handle), TickOutcome::Decremented(2));
        assert_eq!(f.engine.tick(handle), TickOutcome::Decremented(1));
        assert_eq!(f.engine.tick(handle), TickOutcome::Decremented(0));
        assert_eq!(f.finished.count(), 0);

        assert_eq!(f.engine.tick(handle), TickOutcome::Finished);
        assert_eq!(f.finished.count(), 1);
        assert_eq!(f.engine.phase(), Phase::Idle);
        assert!(f.scheduler.active().is_empty());

        // Late tick from the cancelled registration
        assert_eq!(f.engine.tick(handle), TickOutcome::Ignored);
        assert_eq!(f.finished.count(), 1);
    }

    #[test]
    fn stale_handle_is_ignored() {
        let mut f = fixture();
        f.engine.toggle();
        let first = f.engine.tick_handle().unwrap();
        f.engine.toggle();
        f.engine.toggle();

        assert_eq!(f.engine.tick(first), TickOutcome::Ignored);
        assert_eq!(f.engine.state().remaining_seconds, 1500);
    }

    #[test]
    fn manual_adjustments_locked_while_running() {
        let mut f = fixture();
        f.engine.toggle();
        let before = f.engine.state().remaining_seconds;

        assert!(!f.engine.set_time(1, 0));
        assert!(!f.engine.reset());
        assert!(!f.engine.zero());
        assert!(!f.engine.nudge(5));
        assert!(!f.engine.scroll(-3.0, ScrollGranularity::Minutes));
        assert!(!f.engine.open_entry());
        assert_eq!(f.engine.state().remaining_seconds, before);
        assert_eq!(f.engine.state().scroll_accumulator, 0.0);
    }

    #[test]
    fn set_time_clamps() {
        let mut f = fixture();
        f.engine.set_time(1000, 30);
        assert_eq!(f.engine.state().remaining_seconds, 59940);
        assert_eq!(f.engine.state().initial_seconds, 59940);
    }

    #[test]
    fn nudge_clamps_at_zero() {
        let mut f = fixture();
        f.engine.set_time(3, 0);
        f.engine.nudge(-5);
        assert_eq!(f.engine.state().remaining_seconds, 0);
        assert_eq!(f.engine.state().initial_seconds, 0);
    }

    #[test]
    fn extreme_nudges_clamp_instead_of_overflowing() {
        let mut f = fixture();
        assert!(f.engine.nudge(i64::MAX));
        assert_eq!(f.engine.state().remaining_seconds, MAX_SECONDS);

        assert!(f.engine.nudge(i64::MIN));
        assert_eq!(f.engine.state().remaining_seconds, 0);
        assert_eq!(f.engine.state().initial_seconds, 0);
    }

    #[test]
    fn reset_uses_current_config() {
        let mut f = fixture();
        f.engine.apply_config(TimerConfig {
            default_time: 10,
            ..TimerConfig::default()
        });
        f.engine.zero();
        f.engine.reset();
        assert_eq!(f.engine.state().remaining_seconds, 600);
    }

    #[test]
    fn apply_config_is_idempotent() {
        let mut f = fixture();
        f.engine.scroll(0.4, ScrollGranularity::Minutes);
        f.engine.apply_config(TimerConfig::default());
        let once = f.engine.state().clone();
        f.engine.apply_config(TimerConfig::default());
        assert_eq!(f.engine.state(), &once);
    }

    #[test]
    fn apply_config_while_running_resets_but_keeps_running() {
        let mut f = fixture();
        f.engine.toggle();
        let handle = f.engine.tick_handle().unwrap();
        f.engine.tick(handle);

        f.engine.apply_config(TimerConfig {
            default_time: 2,
            ..TimerConfig::default()
        });
        assert_eq!(f.engine.state().remaining_seconds, 120);
        assert!(f.engine.state().is_running);
        assert_eq!(f.engine.tick_handle(), Some(handle));
    }

    #[test]
    fn scroll_uses_step_sizes() {
        let mut f = fixture();
        f.engine.set_time(10, 0);
        assert!(f.engine.scroll(1.0, ScrollGranularity::Minutes));
        assert_eq!(f.engine.state().remaining_seconds, 300);

        assert!(f.engine.scroll(-1.0, ScrollGranularity::Seconds));
        assert_eq!(f.engine.state().remaining_seconds, 305);
        assert_eq!(f.engine.entry().seconds, 5);
    }

    #[test]
    fn extreme_scrolls_clamp_instead_of_overflowing() {
        let mut f = fixture();
        assert!(f.engine.scroll(-1e30, ScrollGranularity::Minutes));
        assert_eq!(f.engine.state().remaining_seconds, MAX_SECONDS);

        assert!(f.engine.scroll(1e30, ScrollGranularity::Seconds));
        assert_eq!(f.engine.state().remaining_seconds, 0);
        assert!(f.engine.state().scroll_accumulator.abs() < 1.0);

        assert!(f.engine.scroll(-1.0, ScrollGranularity::Seconds));
        assert_eq!(f.engine.state().remaining_seconds, 5);
    }

    #[test]
    fn scroll_accumulates_fractions() {
        let mut f = fixture();
        assert!(!f.engine.scroll(0.4, ScrollGranularity::Minutes));
        assert!(!f.engine.scroll(0.4, ScrollGranularity::Minutes));
        assert!(f.engine.scroll(0.4, ScrollGranularity::Minutes));
        assert_eq!(f.engine.state().remaining_seconds, 1200);
        assert!((f.engine.state().scroll_accumulator - 0.2).abs() < 1e-9);
    }

    #[test]
    fn center_click_opens_entry_only_when_idle() {
        let mut f = fixture();
        let g = Geometry::new(400.0, 400.0);

        let outcome = f.engine.click(g.center, &g);
        assert_eq!(outcome.region, Region::CenterText);
        assert!(outcome.applied);
        assert!(f.engine.entry().open);
        assert_eq!(f.engine.entry().minutes, 25);

        f.engine.toggle();
        assert!(!f.engine.entry().open);
        let outcome = f.engine.click(g.center, &g);
        assert_eq!(outcome.region, Region::CenterText);
        assert!(!outcome.applied);
        assert!(!f.engine.entry().open);
    }

    #[test]
    fn click_regions_dispatch() {
        let mut f = fixture();
        let g = Geometry::new(400.0, 400.0);

        f.engine.click(Point::new(350.0, 100.0), &g);
        assert_eq!(f.engine.state().remaining_seconds, 1800);
        f.engine.click(Point::new(50.0, 100.0), &g);
        assert_eq!(f.engine.state().remaining_seconds, 1500);

        f.engine.click(g.zero_center(), &g);
        assert_eq!(f.engine.state().remaining_seconds, 0);
        f.engine.click(g.reset_center(), &g);
        assert_eq!(f.engine.state().remaining_seconds, 1500);

        f.engine.click(g.play_center(), &g);
        assert!(f.engine.state().is_running);
    }

    #[test]
    fn background_click_dismisses_entry() {
        let mut f = fixture();
        let g = Geometry::new(400.0, 400.0);
        f.engine.open_entry();

        let outcome = f.engine.click(Point::new(200.0, 30.0), &g);
        assert_eq!(outcome.region, Region::Background);
        assert!(outcome.applied);
        assert!(!f.engine.entry().open);
    }

    #[test]
    fn every_click_requests_redraw() {
        let mut f = fixture();
        let g = Geometry::new(400.0, 400.0);
        let before = f.redraws.count();
        f.engine.click(Point::new(200.0, 30.0), &g);
        assert!(f.redraws.count() > before);
    }

    #[test]
    fn entry_edit_writes_model_and_clamps() {
        let mut f = fixture();
        assert!(!f.engine.edit_entry(1, 0));

        f.engine.open_entry();
        assert!(f.engine.edit_entry(2, 30));
        assert_eq!(f.engine.state().remaining_seconds, 150);
        assert_eq!(f.engine.state().initial_seconds, 150);

        // Same values echoed back do not write again
        let redraws = f.redraws.count();
        assert!(!f.engine.edit_entry(2, 30));
        assert_eq!(f.redraws.count(), redraws);

        assert!(f.engine.edit_entry(999, 59));
        assert_eq!(f.engine.state().remaining_seconds, 59940);
        assert_eq!((f.engine.entry().minutes, f.engine.entry().seconds), (999, 0));
    }

    #[test]
    fn drop_cancels_registration() {
        let mut f = fixture();
        f.engine.toggle();
        assert_eq!(f.scheduler.active().len(), 1);
        drop(f.engine);
        assert!(f.scheduler.active().is_empty());
    }
}
