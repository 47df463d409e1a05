use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Error type at the HTTP boundary.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Both variants currently answer 500 with a `detail` body; clients of the
/// `/cv-analysis` endpoint depend on that shape.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    /// Blanket 500 for unexpected failures outside the rewrite pipeline.
    /// Nothing on the current `/cv-analysis` path produces it: rewrite errors
    /// degrade to the fallback and input errors are `Validation`.
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(msg) => {
                tracing::error!("Error processing request: invalid input: {msg}");
            }
            AppError::Internal(e) => {
                tracing::error!("Error processing request: {e:?}");
            }
        }

        let body = Json(json!({
            "detail": format!("Internal server error: {self}")
        }));

        (self.status(), body).into_response()
    }
}
