//! Property-based invariant tests for the timer engine.
//!
//! 1. Remaining time stays within `[0, MAX_SECONDS]` for any sequence of
//!    idle adjustments.
//! 2. `n` ticks decrement by exactly `n`, then one more tick finishes once.
//! 3. Sub-unit scroll deltas never move the time until they sum past one.
//! 4. Reapplying unchanged settings does not drift.

use std::sync::Arc;

use dial_timer::{
    engine::{CountingHook, ManualScheduler, NoopRedraw, TickOutcome, MAX_SECONDS},
    input::{Geometry, Point, ScrollGranularity},
    render::{dial::active_dot_count, render_frame, ApproxMetrics, RenderInput},
    TimerConfig, TimerEngine,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Adjustment {
    Nudge(i64),
    SetTime(u32, u32),
    Reset,
    Zero,
    Scroll(f64, bool),
    Click(f64, f64),
    Entry(u32, u32),
}

fn adjustment_strategy() -> impl Strategy<Value = Adjustment> {
    prop_oneof![
        (-2000i64..=2000).prop_map(Adjustment::Nudge),
        any::<i64>().prop_map(Adjustment::Nudge),
        (0u32..=2000, 0u32..=200).prop_map(|(m, s)| Adjustment::SetTime(m, s)),
        Just(Adjustment::Reset),
        Just(Adjustment::Zero),
        (-50.0f64..50.0, any::<bool>()).prop_map(|(dy, fine)| Adjustment::Scroll(dy, fine)),
        (-1e30f64..1e30, any::<bool>()).prop_map(|(dy, fine)| Adjustment::Scroll(dy, fine)),
        (0.0f64..400.0, 0.0f64..400.0).prop_map(|(x, y)| Adjustment::Click(x, y)),
        (0u32..=1500, 0u32..=100).prop_map(|(m, s)| Adjustment::Entry(m, s)),
    ]
}

fn engine_with(config: TimerConfig) -> (TimerEngine, CountingHook) {
    let finished = CountingHook::new();
    let engine = TimerEngine::new(
        config,
        Box::new(ManualScheduler::new()),
        Arc::new(finished.clone()),
        Arc::new(NoopRedraw),
    );
    (engine, finished)
}

fn apply(engine: &mut TimerEngine, adjustment: &Adjustment) {
    let geometry = Geometry::new(400.0, 400.0);
    match *adjustment {
        Adjustment::Nudge(m) => {
            engine.nudge(m);
        }
        Adjustment::SetTime(m, s) => {
            engine.set_time(m, s);
        }
        Adjustment::Reset => {
            engine.reset();
        }
        Adjustment::Zero => {
            engine.zero();
        }
        Adjustment::Scroll(dy, fine) => {
            engine.scroll(dy, ScrollGranularity::from_fine(fine));
        }
        Adjustment::Click(x, y) => {
            engine.click(Point::new(x, y), &geometry);
            // A click may have started the timer; keep exercising idle paths
            if engine.state().is_running {
                engine.toggle();
            }
        }
        Adjustment::Entry(m, s) => {
            engine.open_entry();
            engine.edit_entry(m, s);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Remaining time stays in range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn remaining_stays_in_range(ops in prop::collection::vec(adjustment_strategy(), 1..40)) {
        let (mut engine, _) = engine_with(TimerConfig::default());
        for op in &ops {
            apply(&mut engine, op);
            let state = engine.state();
            prop_assert!(state.remaining_seconds <= MAX_SECONDS, "out of range after {:?}", op);
            prop_assert_eq!(state.remaining_seconds, state.initial_seconds);
            prop_assert!(!state.is_running);
            prop_assert!(state.scroll_accumulator.abs() < 1.0);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Ticks decrement exactly and finish once
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ticks_decrement_then_finish_once(start in 1u32..400) {
        let (mut engine, finished) = engine_with(TimerConfig::default());
        engine.set_time(start / 60, start % 60);
        prop_assert!(engine.toggle());
        let handle = engine.tick_handle().unwrap();

        for n in 1..=start {
            prop_assert_eq!(engine.tick(handle), TickOutcome::Decremented(start - n));
        }
        prop_assert_eq!(finished.count(), 0);
        prop_assert_eq!(engine.tick(handle), TickOutcome::Finished);
        prop_assert_eq!(engine.tick(handle), TickOutcome::Ignored);
        prop_assert_eq!(finished.count(), 1);
        prop_assert!(engine.tick_handle().is_none());
        prop_assert_eq!(engine.state().initial_seconds, start);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Sub-unit scroll deltas
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn small_scrolls_wait_for_threshold(dy in 0.01f64..0.99) {
        let (mut engine, _) = engine_with(TimerConfig::default());
        let before = engine.state().remaining_seconds;
        let mut sum = 0.0;

        while sum + dy < 1.0 {
            prop_assert!(!engine.scroll(dy, ScrollGranularity::Minutes));
            sum += dy;
            prop_assert_eq!(engine.state().remaining_seconds, before);
        }
        prop_assert!(engine.scroll(dy, ScrollGranularity::Minutes));
        prop_assert_eq!(engine.state().remaining_seconds, before - 300);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Settings reapplication
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reapplying_settings_is_stable(default_time in 1u32..=999, min_step in 1u32..=60, sec_step in 1u32..=60) {
        let config = TimerConfig {
            default_time,
            scroll_min_step: min_step,
            scroll_sec_step: sec_step,
            show_tutorial: false,
        };
        let (mut engine, _) = engine_with(TimerConfig::default());
        engine.apply_config(config.clone());
        let once = engine.state().clone();
        engine.apply_config(config);
        prop_assert_eq!(engine.state(), &once);
        prop_assert_eq!(once.remaining_seconds, default_time * 60);
    }
}

#[test]
fn dot_ring_examples() {
    let g = Geometry::new(400.0, 400.0);

    let hour = render_frame(
        RenderInput {
            remaining_seconds: 3600,
            is_running: false,
        },
        &g,
        &ApproxMetrics,
    );
    assert_eq!(hour.dots.active, 60);

    assert_eq!(active_dot_count(125, false), 3);
}
