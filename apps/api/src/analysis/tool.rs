//! The `provide_edited_cv` tool offered to the model.

use serde_json::{json, Value};

use crate::llm_client::ToolDefinition;

pub const EDIT_CV_TOOL_NAME: &str = "provide_edited_cv";

const EDIT_CV_DESCRIPTION: &str = "Edit the CV to better match the job description. \
    You MUST return a new JSON object with the EXACT SAME structure as the input, including ALL \
    original fields: 'experiences', 'skills', 'professionalSummary', and 'jobDescription'. \
    Do not omit or rename any fields, even if unchanged. \
    Enhance the content of each field as appropriate, but always include every required field \
    in the output. The professionalSummary must be a strong, metric-driven summary.";

fn skill_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": {"type": "string"},
            "name": {"type": "string"},
            "level": {"type": "string"}
        },
        "required": ["id", "name", "level"]
    })
}

fn experience_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": {"type": "string"},
            "company": {"type": "string"},
            "position": {"type": "string"},
            "title": {"type": "string"},
            "startDate": {"type": "string"},
            "endDate": {"type": "string"},
            "current": {"type": "boolean"},
            "location": {"type": "string"},
            "description": {"type": "string"},
            "achievements": {"type": "array", "items": {"type": "string"}}
        },
        "required": [
            "id", "company", "position", "title", "startDate", "endDate",
            "current", "location", "description", "achievements"
        ]
    })
}

/// Builds the tool definition. Item schemas carry the full Skill and
/// Experience shapes so the model is steered toward echoing every entry.
pub fn edit_cv_tool() -> ToolDefinition {
    ToolDefinition::function(
        EDIT_CV_TOOL_NAME,
        EDIT_CV_DESCRIPTION,
        json!({
            "type": "object",
            "properties": {
                "experiences": {
                    "type": "array",
                    "items": experience_schema(),
                    "description": "List of optimized work experiences. This field is REQUIRED."
                },
                "skills": {
                    "type": "array",
                    "items": skill_schema(),
                    "description": "List of optimized skills. This field is REQUIRED."
                },
                "professionalSummary": {
                    "type": "string",
                    "description": "A strong, metric-driven professional summary. This field is REQUIRED."
                },
                "jobDescription": {
                    "type": "string",
                    "description": "Job description used for optimization. This field is REQUIRED."
                }
            },
            "required": ["experiences", "skills", "professionalSummary", "jobDescription"]
        }),
    )
}
