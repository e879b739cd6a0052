//! HTTP API module
//!
//! This module contains the local control surface: endpoint handlers and
//! response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/toggle", post(toggle_handler))
        .route("/reset", post(reset_handler))
        .route("/zero", post(zero_handler))
        .route("/nudge", post(nudge_handler))
        .route("/time", post(time_handler))
        .route("/scroll", post(scroll_handler))
        .route("/click", post(click_handler))
        .route("/entry", post(entry_handler))
        .route("/entry/open", post(entry_open_handler))
        .route("/entry/close", post(entry_close_handler))
        .route("/status", get(status_handler))
        .route("/frame", get(frame_handler))
        .route("/preferences", get(get_preferences_handler).put(put_preferences_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
