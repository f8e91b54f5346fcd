//! Error type shared by the inventory core, the vision helpers and the web layer.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `reconcile` was called before any successful `initialize`.
    #[error("inventory has not been initialized")]
    NotInitialized,

    /// A camera could not supply a frame.
    #[error("no frame available from the {0} camera")]
    NoFrame(String),

    /// The detector backend failed on a frame.
    #[error("detection failed: {0}")]
    Detection(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            Error::NotInitialized => (StatusCode::CONFLICT, "NOT_INITIALIZED"),
            Error::NoFrame(_) => (StatusCode::SERVICE_UNAVAILABLE, "NO_FRAME"),
            Error::Detection(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DETECTION_ERROR"),
            Error::Config(_) | Error::Yaml(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            Error::Image(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IMAGE_ERROR"),
            Error::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        };
        let message = self.to_string();

        tracing::error!(
            status = %status,
            error_code = %error_code,
            detail = %message,
            "Request error"
        );

        (
            status,
            Json(json!({
                "error_code": error_code,
                "message": message,
            })),
        )
            .into_response()
    }
}
