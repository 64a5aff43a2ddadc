// HTTP routes: thin passthroughs over the core (sampler, recorder, report).
// All behavioral rules live in the core; this layer only maps results to
// status codes and JSON.

mod http;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::models::SystemInfo;
use crate::recorder::Recorder;
use crate::sampler::Sampler;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) sampler: Arc<Sampler>,
    pub(crate) recorder: Arc<Recorder>,
    pub(crate) system_info: Arc<SystemInfo>,
}

pub fn app(
    sampler: Arc<Sampler>,
    recorder: Arc<Recorder>,
    system_info: Arc<SystemInfo>,
) -> Router {
    let state = AppState {
        sampler,
        recorder,
        system_info,
    };
    Router::new()
        .route("/", get(|| async { "syswatch: host resource monitor" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/info", get(http::api_info_handler)) // GET /api/info
        .route("/api/resources", get(http::resources_handler)) // GET /api/resources
        .route("/api/recording/start", post(http::start_recording_handler)) // POST /api/recording/start
        .route("/api/recording/stop", post(http::stop_recording_handler)) // POST /api/recording/stop
        .route("/api/recording/status", get(http::recording_status_handler)) // GET /api/recording/status
        .route("/api/report", post(http::report_handler)) // POST /api/report
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
