use std::path::Path;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use image::{Rgb, RgbImage};
use serde_json::{Value, json};
use tower::ServiceExt;

use tool_inventory::server::{AppState, create_router};
use tool_inventory::{
    CameraSet, ColorDetector, ColorRange, Disconnected, FrameSource, ImageFileSource, MemorySink,
    SharedTracker, ToolTracker, TrackerPipeline,
};

fn green_squares(n: u32) -> RgbImage {
    let mut frame = RgbImage::new(640, 480);
    for i in 0..n {
        let x0 = 40 + i * 100;
        for y in 100..140 {
            for x in x0..x0 + 40 {
                frame.put_pixel(x, y, Rgb([57, 255, 20]));
            }
        }
    }
    frame
}

fn state_with(field: impl FrameSource + 'static, log_dir: &Path) -> AppState {
    let pipeline = TrackerPipeline::new(
        ColorDetector::default(),
        vec![ColorRange::new("Tool1", [35, 100, 100], [85, 255, 255])],
        CameraSet::new(field, Disconnected, Disconnected),
        SharedTracker::new(ToolTracker::with_sink(MemorySink::new())),
    );
    AppState::new(pipeline, log_dir)
}

async fn get(state: &AppState, uri: &str) -> axum::response::Response {
    create_router(state.clone())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post(state: &AppState, uri: &str) -> axum::response::Response {
    create_router(state.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_tool_counts_and_logs() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_with(|| Some(green_squares(2)), dir.path());
    state.pipeline.lock().initialize().unwrap();

    let response = get(&state, "/tool_counts").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "Tool1": { "total": 2, "in_field": 2, "in_use": 0, "discarded": 0 } })
    );

    let response = get(&state, "/logs").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn test_tool_counts_empty_before_initialization() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_with(Disconnected, dir.path());

    let response = get(&state, "/tool_counts").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({}));
}

#[tokio::test]
async fn test_reinitialize_from_snapshot_file() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("field.png");
    green_squares(3).save(&snapshot).unwrap();
    let state = state_with(ImageFileSource::new(&snapshot), dir.path());

    let response = post(&state, "/reinitialize_tool_counts").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "status": "Tool counts reinitialized successfully" })
    );
    assert_eq!(state.tracker.counts().get("Tool1").unwrap().total, 3);
}

#[tokio::test]
async fn test_reinitialize_without_camera_fails() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_with(Disconnected, dir.path());

    let response = post(&state, "/reinitialize_tool_counts").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "status": "Failed to reinitialize tool counts" })
    );
    assert!(!state.tracker.is_initialized());
}

#[tokio::test]
async fn test_latest_log_missing_and_present() {
    let dir = tempfile::tempdir().unwrap();
    let log_dir = dir.path().join("log");
    let state = state_with(Disconnected, &log_dir);

    let response = get(&state, "/latest_log").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({ "status": "No log files available" })
    );

    std::fs::create_dir_all(&log_dir).unwrap();
    std::fs::write(
        log_dir.join("tool_tracking_2024-01-01_00-00-00.log"),
        "INFO Starting tool tracking system\n",
    )
    .unwrap();

    let response = get(&state, "/latest_log").await;
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("tool_tracking_2024-01-01_00-00-00.log"));
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"INFO Starting tool tracking system\n");
}

#[tokio::test]
async fn test_video_feed_streams_latest_frame() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_with(Disconnected, dir.path());
    state.frames.publish(vec![0xFF, 0xD8, 0xFF, 0xD9]);

    let response = get(&state, "/video_feed").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "multipart/x-mixed-replace; boundary=frame"
    );

    let mut body = response.into_body();
    let frame = body.frame().await.unwrap().unwrap();
    let chunk = frame.into_data().unwrap();
    assert!(chunk.starts_with(b"--frame\r\nContent-Type: image/jpeg\r\n\r\n"));
    assert!(chunk.ends_with(b"\xFF\xD9\r\n"));
}

#[tokio::test]
async fn test_healthz() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_with(Disconnected, dir.path());

    let response = get(&state, "/healthz").await;
    assert_eq!(response.status(), StatusCode::OK);
}
