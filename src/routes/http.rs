// Handlers: version/info plus the five core operations.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::error::MonitorError;
use crate::report;
use crate::version::{NAME, VERSION};

/// GET /version — service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/info — static system identity (fetched once at startup).
pub(super) async fn api_info_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.system_info.as_ref().clone())
}

/// GET /api/resources — live reading plus the recording status the
/// dashboard polls alongside it.
pub(super) async fn resources_handler(State(state): State<AppState>) -> Response {
    match state.sampler.sample().await {
        Ok(snapshot) => Json(serde_json::json!({
            "snapshot": snapshot,
            "recording": state.recorder.status(),
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/recording/start
pub(super) async fn start_recording_handler(State(state): State<AppState>) -> Response {
    match state.recorder.start() {
        Ok(status) => Json(serde_json::json!({
            "status": "started",
            "recording": status,
        }))
        .into_response(),
        Err(MonitorError::AlreadyRecording) => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({ "status": "already_recording" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/recording/stop — stopping an idle recorder is a no-op status,
/// not an error.
pub(super) async fn stop_recording_handler(State(state): State<AppState>) -> Response {
    match state.recorder.stop().await {
        Ok(status) => Json(serde_json::json!({
            "status": "stopped",
            "samples": status.sample_count,
        }))
        .into_response(),
        Err(MonitorError::NotRecording) => Json(serde_json::json!({
            "status": "not_recording",
            "samples": 0,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/recording/status
pub(super) async fn recording_status_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.recorder.status())
}

/// POST /api/report — aggregates the recorded series; the response payload
/// is what the external renderer consumes.
pub(super) async fn report_handler(State(state): State<AppState>) -> Response {
    let series = state.recorder.series();
    let (start_label, end_label) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (
            report::timestamp_label(first.timestamp),
            report::timestamp_label(last.timestamp),
        ),
        _ => (String::new(), String::new()),
    };
    match report::build_report(&series, &state.system_info, &start_label, &end_label) {
        Ok(aggregate) => Json(aggregate).into_response(),
        Err(e) => error_response(e),
    }
}

/// Core errors map to transport codes here, not in the core.
fn error_response(e: MonitorError) -> Response {
    let status = match &e {
        MonitorError::AlreadyRecording | MonitorError::NotRecording => StatusCode::CONFLICT,
        MonitorError::InsufficientData { .. } => StatusCode::BAD_REQUEST,
        MonitorError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": e.to_string() }))).into_response()
}
