//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{state::AppState, timer::StartOutcome};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /start - Begin the next interval
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start().await {
        Ok((StartOutcome::Started(kind), timer)) => {
            info!("Start endpoint called - {:?} interval started", kind);
            Ok(Json(ApiResponse::started(
                format!("{} interval started", kind.palette().title()),
                timer,
            )))
        }
        Ok((StartOutcome::AlreadyRunning, timer)) => {
            info!("Start endpoint called - interval already running");
            Ok(Json(ApiResponse::ignored(
                "An interval is already running".to_string(),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to start interval: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle POST /reset - Cancel the countdown and clear the session
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset().await {
        Ok(timer) => {
            info!("Reset endpoint called - timer reset");
            Ok(Json(ApiResponse::reset("Timer reset".to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to reset timer: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle GET /status - Current display and session information
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.get_timer_state(),
        durations: state.durations,
        cycle: state.cycle,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
