//! Input normalization for `POST /cv-analysis`.

use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::models::cv::AnalysisRequest;

/// Confirms a raw JSON payload matches the canonical request shape.
///
/// Beyond type-checking this is a pass-through: the returned request carries
/// exactly the values that were sent.
pub fn validate_input(payload: Value) -> Result<AnalysisRequest, AppError> {
    let request: AnalysisRequest =
        serde_json::from_value(payload).map_err(|e| AppError::Validation(e.to_string()))?;

    debug!(
        "Validated CV input: {} skills, {} experiences",
        request.skills.len(),
        request.experiences.len()
    );

    Ok(request)
}
