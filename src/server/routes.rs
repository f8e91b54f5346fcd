//! API Routes

use std::convert::Infallible;
use std::path::{Path, PathBuf};

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use serde_json::json;
use tokio_stream::{StreamExt, wrappers::WatchStream};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::error::Result;
use crate::inventory::CountsSnapshot;
use crate::server::state::AppState;

const MJPEG_CONTENT_TYPE: &str = "multipart/x-mixed-replace; boundary=frame";

/// Create API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/tool_counts", get(get_tool_counts))
        .route("/logs", get(get_logs))
        .route("/latest_log", get(get_latest_log))
        .route("/reinitialize_tool_counts", post(reinitialize_tool_counts))
        .route("/video_feed", get(video_feed))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "ok"
}

async fn get_tool_counts(State(state): State<AppState>) -> Json<CountsSnapshot> {
    Json(state.tracker.counts())
}

async fn get_logs(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.tracker.recent_log())
}

/// Download the newest audit log file.
async fn get_latest_log(State(state): State<AppState>) -> Result<Response> {
    let Some(path) = latest_log_file(&state.log_dir).await? else {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "status": "No log files available" })),
        )
            .into_response());
    };

    let contents = tokio::fs::read(&path).await?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        contents,
    )
        .into_response())
}

async fn latest_log_file(dir: &Path) -> Result<Option<PathBuf>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut latest = None;
    while let Some(entry) = entries.next_entry().await? {
        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified()?;
        if latest.as_ref().is_none_or(|(newest, _)| modified > *newest) {
            latest = Some((modified, entry.path()));
        }
    }
    Ok(latest.map(|(_, path)| path))
}

/// Grab a fresh field frame and rebuild the baseline from it.
async fn reinitialize_tool_counts(State(state): State<AppState>) -> Response {
    let pipeline = state.pipeline.clone();
    let result = tokio::task::spawn_blocking(move || pipeline.lock().initialize()).await;

    match result {
        Ok(Ok(())) => {
            info!("Tool counts reinitialized via API");
            (
                StatusCode::OK,
                Json(json!({ "status": "Tool counts reinitialized successfully" })),
            )
                .into_response()
        }
        Ok(Err(e)) => {
            warn!(error = %e, "Reinitialization request failed");
            reinitialize_failed()
        }
        Err(e) => {
            error!(error = %e, "Reinitialization task panicked");
            reinitialize_failed()
        }
    }
}

fn reinitialize_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "status": "Failed to reinitialize tool counts" })),
    )
        .into_response()
}

/// MJPEG stream of the composited view, starting with the latest frame.
async fn video_feed(State(state): State<AppState>) -> Response {
    let stream = WatchStream::new(state.frames.subscribe())
        .filter_map(|frame| frame.map(|jpeg| Ok::<_, Infallible>(multipart_part(&jpeg))));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, MJPEG_CONTENT_TYPE)
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(stream))
        .unwrap_or_else(|e| {
            error!("Failed to build video feed response: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })
}

fn multipart_part(jpeg: &[u8]) -> Bytes {
    let mut part = Vec::with_capacity(jpeg.len() + 48);
    part.extend_from_slice(b"--frame\r\nContent-Type: image/jpeg\r\n\r\n");
    part.extend_from_slice(jpeg);
    part.extend_from_slice(b"\r\n");
    Bytes::from(part)
}
