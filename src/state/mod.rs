//! State management module
//!
//! This module contains the state shared by the HTTP handlers and the
//! snapshot publisher the engine paints into.

pub mod app_state;
pub mod publisher;

// Re-export main types
pub use app_state::AppState;
pub use publisher::SnapshotPublisher;
