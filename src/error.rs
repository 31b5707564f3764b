use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

/// Everything /average-price can fail with. Config and gateway errors are
/// rendered as a `{"detail": ...}` body; upstream errors replay the upstream
/// status and body to the caller untouched.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Config(String),
    #[error("{0}")]
    Gateway(String),
    #[error("upstream returned {status}")]
    Upstream { status: StatusCode, body: String },
}

impl ApiError {
    pub fn config<S: Into<String>>(detail: S) -> Self {
        ApiError::Config(detail.into())
    }

    pub fn gateway<S: Into<String>>(detail: S) -> Self {
        ApiError::Gateway(detail.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Config(detail) => {
                tracing::error!("Configuration error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": detail })),
                )
                    .into_response()
            }
            ApiError::Gateway(detail) => {
                tracing::error!("Bad gateway: {detail}");
                (StatusCode::BAD_GATEWAY, Json(json!({ "detail": detail }))).into_response()
            }
            ApiError::Upstream { status, body } => {
                tracing::error!("Upstream error {status}: {body}");
                (status, body).into_response()
            }
        }
    }
}
