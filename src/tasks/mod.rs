//! Background tasks module
//!
//! This module contains the engine task and the ticker that drives it.

pub mod engine_loop;
pub mod ticker;

// Re-export main types
pub use engine_loop::{apply_action, spawn_engine, ActionResult, EngineHandle, UserAction};
pub use ticker::TokioTicker;
