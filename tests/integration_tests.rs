// Integration tests: HTTP endpoints over the full stack (real sysinfo
// provider, null GPU capability).

use axum::http::StatusCode;
use axum_test::TestServer;
use std::sync::Arc;
use syswatch::gpu_repo::NullGpuRepo;
use syswatch::recorder::{Recorder, RecorderConfig};
use syswatch::routes;
use syswatch::sampler::Sampler;
use syswatch::sysinfo_repo::SysinfoRepo;
use tokio::time::Duration;

async fn test_app(duration_limit_ms: u64, sample_interval_ms: u64) -> axum::Router {
    let sysinfo_repo = Arc::new(SysinfoRepo::new());
    let system_info = Arc::new(
        sysinfo_repo
            .get_system_info()
            .await
            .expect("get_system_info"),
    );
    let sampler = Arc::new(Sampler::new(sysinfo_repo, Arc::new(NullGpuRepo)));
    let recorder = Arc::new(Recorder::new(
        sampler.clone(),
        RecorderConfig {
            duration_limit: Duration::from_millis(duration_limit_ms),
            sample_interval: Duration::from_millis(sample_interval_ms),
        },
    ));
    routes::app(sampler, recorder, system_info)
}

async fn test_server() -> TestServer {
    TestServer::try_new(test_app(60_000, 25).await).expect("test server")
}

#[tokio::test]
async fn test_root_endpoint() {
    let server = test_server().await;
    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_text("syswatch: host resource monitor");
}

#[tokio::test]
async fn test_version_endpoint() {
    let server = test_server().await;
    let response = server.get("/version").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json.get("name").and_then(|v| v.as_str()), Some("syswatch"));
    assert!(json.get("version").and_then(|v| v.as_str()).is_some());
}

#[tokio::test]
async fn test_api_info_returns_static_identity() {
    let server = test_server().await;
    let response = server.get("/api/info").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert!(json.get("osFamily").is_some());
    assert!(json.get("hostname").is_some());
    assert!(json.get("processorName").is_some());
}

#[tokio::test]
async fn test_resources_returns_snapshot_and_recording_status() {
    let server = test_server().await;
    let response = server.get("/api/resources").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    let snapshot = json.get("snapshot").expect("snapshot field");
    assert!(snapshot.pointer("/cpu/usagePercent").is_some());
    assert!(snapshot.pointer("/memory/total").is_some());
    assert_eq!(
        json.pointer("/recording/active").and_then(|v| v.as_bool()),
        Some(false)
    );
}

#[tokio::test]
async fn test_recording_flow_start_status_stop_report() {
    let server = test_server().await;

    let response = server.post("/api/recording/start").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json.get("status").and_then(|v| v.as_str()), Some("started"));

    // Second start is rejected without disturbing the session.
    let response = server.post("/api/recording/start").await;
    response.assert_status(StatusCode::CONFLICT);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json.get("status").and_then(|v| v.as_str()),
        Some("already_recording")
    );

    let response = server.get("/api/recording/status").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json.get("active").and_then(|v| v.as_bool()), Some(true));

    tokio::time::sleep(Duration::from_millis(150)).await;

    let response = server.post("/api/recording/stop").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json.get("status").and_then(|v| v.as_str()), Some("stopped"));
    let samples = json.get("samples").and_then(|v| v.as_u64()).unwrap_or(0);
    assert!(samples >= 2, "expected at least 2 samples, got {samples}");

    let response = server.post("/api/report").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(
        json.get("sampleCount").and_then(|v| v.as_u64()),
        Some(samples)
    );
    assert!(json.pointer("/cpuPercent/avg").is_some());
    assert!(json.pointer("/series/timestamps").is_some());
}

#[tokio::test]
async fn test_stop_without_recording_is_noop() {
    let server = test_server().await;
    let response = server.post("/api/recording/stop").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(
        json.get("status").and_then(|v| v.as_str()),
        Some("not_recording")
    );
    assert_eq!(json.get("samples").and_then(|v| v.as_u64()), Some(0));
}

#[tokio::test]
async fn test_report_without_data_is_rejected() {
    let server = test_server().await;
    let response = server.post("/api/report").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let json: serde_json::Value = response.json();
    assert!(
        json.get("error")
            .and_then(|v| v.as_str())
            .is_some_and(|e| e.contains("not enough")),
        "unexpected error payload: {json}"
    );
}
