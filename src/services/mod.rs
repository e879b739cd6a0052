//! External collaborator module
//!
//! This module contains the notifier that tells the desktop a countdown
//! finished.

pub mod notifier;

// Re-export main types
pub use notifier::{check_command_available, DesktopNotifier, LogNotifier};
