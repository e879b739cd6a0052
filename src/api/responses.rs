//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{engine::TimerSnapshot, input::Region, tasks::ActionResult};

/// Response for every mutating endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    /// "applied" or "ignored"
    pub status: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ActionResponse {
    pub fn from_result(action: &str, result: ActionResult) -> Self {
        Self {
            status: if result.applied { "applied" } else { "ignored" }.to_string(),
            action: action.to_string(),
            region: result.region,
            timestamp: Utc::now(),
            timer: result.snapshot,
        }
    }
}

/// Status response with the latest snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NudgeRequest {
    pub minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeRequest {
    pub minutes: u32,
    #[serde(default)]
    pub seconds: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScrollRequest {
    pub dy: f64,
    /// Fine adjust modifier held
    #[serde(default)]
    pub fine: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClickRequest {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrameQuery {
    #[serde(default = "default_extent")]
    pub width: f64,
    #[serde(default = "default_extent")]
    pub height: f64,
}

fn default_extent() -> f64 {
    400.0
}
