//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    render::{render_frame, ApproxMetrics, Frame, RenderInput},
    input::Geometry,
    settings::TimerConfig,
    state::AppState,
    tasks::UserAction,
};
use super::responses::{
    ActionResponse, ClickRequest, FrameQuery, HealthResponse, NudgeRequest, ScrollRequest,
    StatusResponse, TimeRequest,
};

/// Largest widget side accepted for frames and clicks
const MAX_EXTENT: f64 = 8192.0;

fn valid_extent(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value <= MAX_EXTENT
}

/// Forward an action to the engine task and wrap the result
async fn run_action(
    state: &AppState,
    action: UserAction,
) -> Result<Json<ActionResponse>, StatusCode> {
    let name = action.name();
    match state.engine.send(action).await {
        Ok(result) => {
            state.record_action(name);
            info!(
                "{} endpoint called - {} ({})",
                name,
                if result.applied { "applied" } else { "ignored" },
                result.snapshot.label
            );
            Ok(Json(ActionResponse::from_result(name, result)))
        }
        Err(e) => {
            error!("Failed to run {}: {}", name, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /toggle - Start or pause the countdown
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, StatusCode> {
    run_action(&state, UserAction::Toggle).await
}

/// Handle POST /reset - Restore the default time
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, StatusCode> {
    run_action(&state, UserAction::Reset).await
}

/// Handle POST /zero - Clear the time
pub async fn zero_handler(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, StatusCode> {
    run_action(&state, UserAction::Zero).await
}

/// Handle POST /nudge - Shift the time by whole minutes
pub async fn nudge_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NudgeRequest>,
) -> Result<Json<ActionResponse>, StatusCode> {
    run_action(&state, UserAction::Nudge { minutes: body.minutes }).await
}

/// Handle POST /time - Set an exact time
pub async fn time_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TimeRequest>,
) -> Result<Json<ActionResponse>, StatusCode> {
    run_action(
        &state,
        UserAction::SetTime {
            minutes: body.minutes,
            seconds: body.seconds,
        },
    )
    .await
}

/// Handle POST /scroll - Feed a scroll delta
pub async fn scroll_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ScrollRequest>,
) -> Result<Json<ActionResponse>, StatusCode> {
    run_action(&state, UserAction::Scroll { dy: body.dy, fine: body.fine }).await
}

/// Handle POST /click - Hit-test a click on the dial
pub async fn click_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ClickRequest>,
) -> Result<Json<ActionResponse>, StatusCode> {
    if !valid_extent(body.width) || !valid_extent(body.height) || !body.x.is_finite() || !body.y.is_finite() {
        warn!("Rejecting click with invalid geometry: {:?}", body);
        return Err(StatusCode::BAD_REQUEST);
    }

    run_action(
        &state,
        UserAction::Click {
            x: body.x,
            y: body.y,
            width: body.width,
            height: body.height,
        },
    )
    .await
}

/// Handle POST /entry - Edit the numeric entry fields
pub async fn entry_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TimeRequest>,
) -> Result<Json<ActionResponse>, StatusCode> {
    run_action(
        &state,
        UserAction::EditEntry {
            minutes: body.minutes,
            seconds: body.seconds,
        },
    )
    .await
}

/// Handle POST /entry/open - Show the numeric entry
pub async fn entry_open_handler(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, StatusCode> {
    run_action(&state, UserAction::OpenEntry).await
}

/// Handle POST /entry/close - Dismiss the numeric entry
pub async fn entry_close_handler(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, StatusCode> {
    run_action(&state, UserAction::CloseEntry).await
}

/// Handle GET /status - Return the latest snapshot
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.snapshot(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /frame - Render the dial for a widget size
pub async fn frame_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FrameQuery>,
) -> Result<Json<Frame>, StatusCode> {
    if !valid_extent(query.width) || !valid_extent(query.height) {
        warn!("Rejecting frame request of {}x{}", query.width, query.height);
        return Err(StatusCode::BAD_REQUEST);
    }

    let snapshot = state.snapshot();
    let geometry = Geometry::new(query.width, query.height);
    Ok(Json(render_frame(RenderInput::from(&snapshot), &geometry, &ApproxMetrics)))
}

/// Handle GET /preferences - Current settings
pub async fn get_preferences_handler(State(state): State<Arc<AppState>>) -> Json<TimerConfig> {
    Json(state.settings())
}

/// Handle PUT /preferences - Save settings and apply them to the timer
pub async fn put_preferences_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TimerConfig>,
) -> Result<Json<TimerConfig>, StatusCode> {
    match state.update_settings(body) {
        Ok(config) => {
            state.record_action("preferences");
            Ok(Json(config))
        }
        Err(e) => {
            error!("Failed to update settings: {:#}", anyhow::Error::from(e));
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
