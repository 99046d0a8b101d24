use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::notion::NotionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Bodies are `{"error": "<display message>"}`; the status code is what
/// distinguishes not-found from failure.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{message}: {source}")]
    Upstream {
        message: &'static str,
        #[source]
        source: NotionError,
    },
}

impl AppError {
    /// Wraps a CMS failure with the message shown to clients.
    pub fn upstream(message: &'static str) -> impl FnOnce(NotionError) -> AppError {
        move |source| AppError::Upstream { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, *msg),
            AppError::Upstream { message, source } => {
                tracing::error!("{message}: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, *message)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
