//! Error types for the host shell around the timer engine

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised outside the core state machine
#[derive(Debug, Error)]
pub enum DialError {
    #[error("failed to read settings file {path}")]
    ReadSettings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings JSON in {path}")]
    ParseSettings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write settings file {path}")]
    WriteSettings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode settings")]
    EncodeSettings(#[source] serde_json::Error),

    #[error("no configuration directory available on this system")]
    NoConfigDir,

    #[error("timer engine task is no longer running")]
    EngineGone,

    #[error("notification command `{command}` failed: {reason}")]
    Notify { command: String, reason: String },
}
