//! Engine task: the single place where timer state is mutated
//!
//! User actions, ticks and settings changes all arrive on channels and are
//! applied one at a time, so no handler ever observes a half-applied change.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, info};

use super::ticker::TokioTicker;
use crate::{
    engine::{FinishNotifier, RedrawRequester, TickHandle, TimerEngine, TimerSnapshot},
    error::DialError,
    input::{Geometry, Point, Region, ScrollGranularity},
    settings::TimerConfig,
};

const COMMAND_QUEUE: usize = 64;

/// User-facing commands accepted by the engine task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    Toggle,
    Reset,
    Zero,
    Nudge { minutes: i64 },
    SetTime { minutes: u32, seconds: u32 },
    Scroll { dy: f64, fine: bool },
    Click { x: f64, y: f64, width: f64, height: f64 },
    OpenEntry,
    EditEntry { minutes: u32, seconds: u32 },
    CloseEntry,
}

impl UserAction {
    pub fn name(&self) -> &'static str {
        match self {
            UserAction::Toggle => "toggle",
            UserAction::Reset => "reset",
            UserAction::Zero => "zero",
            UserAction::Nudge { .. } => "nudge",
            UserAction::SetTime { .. } => "set-time",
            UserAction::Scroll { .. } => "scroll",
            UserAction::Click { .. } => "click",
            UserAction::OpenEntry => "open-entry",
            UserAction::EditEntry { .. } => "edit-entry",
            UserAction::CloseEntry => "close-entry",
        }
    }
}

/// Outcome of one user action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    /// False when the action was a no-op, e.g. an adjustment while running
    pub applied: bool,
    /// Region hit, for clicks
    pub region: Option<Region>,
    pub snapshot: TimerSnapshot,
}

#[derive(Debug)]
struct EngineCommand {
    action: UserAction,
    reply: oneshot::Sender<ActionResult>,
}

/// Cloneable sender side of the engine task
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    /// Send an action and wait for its result
    pub async fn send(&self, action: UserAction) -> Result<ActionResult, DialError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(EngineCommand { action, reply })
            .await
            .map_err(|_| DialError::EngineGone)?;
        rx.await.map_err(|_| DialError::EngineGone)
    }
}

/// Build the engine with a tokio ticker and spawn its task
pub fn spawn_engine(
    config: TimerConfig,
    notifier: Arc<dyn FinishNotifier>,
    redraw: Arc<dyn RedrawRequester>,
    settings_rx: watch::Receiver<TimerConfig>,
) -> (EngineHandle, JoinHandle<()>) {
    let (tick_tx, tick_rx) = mpsc::unbounded_channel();
    let (tx, rx) = mpsc::channel(COMMAND_QUEUE);

    let engine = TimerEngine::new(config, Box::new(TokioTicker::new(tick_tx)), notifier, redraw);
    let task = tokio::spawn(engine_task(engine, rx, tick_rx, settings_rx));

    (EngineHandle { tx }, task)
}

/// Apply one action to the engine
pub fn apply_action(engine: &mut TimerEngine, action: UserAction) -> ActionResult {
    let mut region = None;

    let applied = match action {
        UserAction::Toggle => engine.toggle(),
        UserAction::Reset => engine.reset(),
        UserAction::Zero => engine.zero(),
        UserAction::Nudge { minutes } => engine.nudge(minutes),
        UserAction::SetTime { minutes, seconds } => engine.set_time(minutes, seconds),
        UserAction::Scroll { dy, fine } => engine.scroll(dy, ScrollGranularity::from_fine(fine)),
        UserAction::Click { x, y, width, height } => {
            let outcome = engine.click(Point::new(x, y), &Geometry::new(width, height));
            region = Some(outcome.region);
            outcome.applied
        }
        UserAction::OpenEntry => engine.open_entry(),
        UserAction::EditEntry { minutes, seconds } => engine.edit_entry(minutes, seconds),
        UserAction::CloseEntry => engine.close_entry(),
    };

    ActionResult {
        applied,
        region,
        snapshot: engine.snapshot(),
    }
}

async fn engine_task(
    mut engine: TimerEngine,
    mut commands: mpsc::Receiver<EngineCommand>,
    mut ticks: mpsc::UnboundedReceiver<TickHandle>,
    mut settings_rx: watch::Receiver<TimerConfig>,
) {
    info!("Starting timer engine task");
    let mut settings_open = true;

    // Initial paint
    engine.request_redraw();

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(EngineCommand { action, reply }) = command else {
                    info!("All engine handles dropped, stopping engine task");
                    break;
                };
                let name = action.name();
                let result = apply_action(&mut engine, action);
                debug!("Action {} applied={} -> {}", name, result.applied, result.snapshot.label);
                if reply.send(result).is_err() {
                    debug!("Caller of {} went away before the reply", name);
                }
            }

            Some(handle) = ticks.recv() => {
                engine.tick(handle);
            }

            changed = settings_rx.changed(), if settings_open => {
                match changed {
                    Ok(()) => {
                        let config = settings_rx.borrow_and_update().clone();
                        engine.apply_config(config);
                    }
                    Err(_) => {
                        debug!("Settings channel closed, keeping current settings");
                        settings_open = false;
                    }
                }
            }
        }
    }

    engine.shutdown();
}
