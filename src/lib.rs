//! Dial Timer - A countdown timer with a circular dial
//!
//! This library provides the timer engine (state machine, input translation
//! and dial rendering) and the pieces that host it on a tokio runtime behind a
//! local HTTP control surface.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod render;
pub mod services;
pub mod settings;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use engine::{TimerEngine, TimerSnapshot, TimerState};
pub use error::DialError;
pub use render::{render_frame, Frame};
pub use settings::TimerConfig;
pub use state::AppState;
pub use tasks::{spawn_engine, EngineHandle, UserAction};
pub use utils::signals::shutdown_signal;
