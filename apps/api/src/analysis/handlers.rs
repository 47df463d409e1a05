//! Axum route handler for the CV analysis API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::analysis::input::validate_input;
use crate::analysis::rewriter::rewrite_content;
use crate::errors::AppError;
use crate::models::cv::AnalysisResult;
use crate::state::AppState;

/// POST /cv-analysis
///
/// Tailors the submitted CV to its job description. Rewrite failures degrade to
/// the untouched CV with a generic summary; only unreadable input is an error.
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn handle_cv_analysis(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(payload) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    let request = validate_input(payload)?;
    let result = rewrite_content(state.llm.as_ref(), &request).await;

    Ok(Json(result))
}
