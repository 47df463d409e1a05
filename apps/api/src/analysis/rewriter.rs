//! CV Rewriter — tailors a CV to a job description through a single tool call.
//!
//! Flow: build prompt → call_tool(provide_edited_cv) → parse arguments →
//!       backfill omitted fields from the request → validate → reconcile with
//!       the request's entries → return.
//!
//! Any failure along the way resolves to `fallback_response`, so callers always
//! receive a well-formed result.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::analysis::prompts::build_rewrite_prompt;
use crate::analysis::tool::{edit_cv_tool, EDIT_CV_TOOL_NAME};
use crate::llm_client::{LlmError, ToolCallingBackend};
use crate::models::cv::{AnalysisRequest, AnalysisResult, Experience, Skill};

pub const FALLBACK_SUMMARY: &str =
    "Experienced professional with skills matching the job requirements.";

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("No tool calls received from AI")]
    NoToolCall,

    #[error("Model invoked unexpected tool '{0}'")]
    UnexpectedTool(String),

    #[error("Tool arguments are not valid JSON: {0}")]
    MalformedArguments(serde_json::Error),

    #[error("Tool output failed validation: {0}")]
    InvalidShape(String),

    #[error("Failed to serialize CV data: {0}")]
    Serialize(serde_json::Error),
}

/// Tool arguments as the model produced them. Every field is optional;
/// `null` counts as absent. `jobDescription` is not part of the result, so its
/// type is never checked.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditedCv {
    experiences: Option<Vec<Experience>>,
    skills: Option<Vec<Skill>>,
    professional_summary: Option<String>,
    job_description: Option<Value>,
}

/// Tool arguments after omitted fields were copied from the request.
#[derive(Debug)]
struct BackfilledCv {
    experiences: Vec<Experience>,
    skills: Vec<Skill>,
    professional_summary: Option<String>,
    job_description: Value,
}

impl EditedCv {
    fn parse(arguments: &str) -> Result<Self, RewriteError> {
        let value: Value =
            serde_json::from_str(arguments).map_err(RewriteError::MalformedArguments)?;
        serde_json::from_value(value).map_err(|e| RewriteError::InvalidShape(e.to_string()))
    }

    fn backfill(self, request: &AnalysisRequest) -> BackfilledCv {
        BackfilledCv {
            experiences: self
                .experiences
                .unwrap_or_else(|| request.experiences.clone()),
            skills: self.skills.unwrap_or_else(|| request.skills.clone()),
            professional_summary: self.professional_summary,
            job_description: self
                .job_description
                .unwrap_or_else(|| Value::String(request.job_description.clone())),
        }
    }
}

impl BackfilledCv {
    /// Checks the merged object against the result shape and pins every entry
    /// to the request's identity, order, and count.
    fn validate(self, request: &AnalysisRequest) -> Result<AnalysisResult, RewriteError> {
        let professional_summary = self.professional_summary.ok_or_else(|| {
            RewriteError::InvalidShape("missing field `professionalSummary`".to_string())
        })?;

        if self.job_description.as_str() != Some(request.job_description.as_str()) {
            debug!("Model echoed a modified jobDescription; ignoring it");
        }

        if self.skills.len() != request.skills.len() {
            warn!(
                "Model returned {} skills for {} submitted; keeping submitted skills",
                self.skills.len(),
                request.skills.len()
            );
        }

        Ok(AnalysisResult {
            experiences: reconcile_experiences(&request.experiences, &self.experiences),
            skills: request.skills.clone(),
            professional_summary,
        })
    }
}

/// Rewrites the CV narrative for the request's job description.
///
/// Never fails: every error is logged and answered with `fallback_response`.
pub async fn rewrite_content(
    llm: &dyn ToolCallingBackend,
    request: &AnalysisRequest,
) -> AnalysisResult {
    info!(
        "Starting CV rewrite at {} UTC",
        Utc::now().format("%Y-%m-%d %H:%M:%S")
    );

    match try_rewrite(llm, request).await {
        Ok(result) => {
            info!(
                "Successfully created enhanced CV with {} experiences",
                result.experiences.len()
            );
            result
        }
        Err(e) => {
            error!("Error processing CV: {e}");
            fallback_response(request)
        }
    }
}

async fn try_rewrite(
    llm: &dyn ToolCallingBackend,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, RewriteError> {
    let cv_json = serde_json::to_string(request).map_err(RewriteError::Serialize)?;
    let prompt = build_rewrite_prompt(&request.job_description, &cv_json);

    info!("Sending request to AI with function calling...");
    let call = llm
        .call_tool(&prompt, &edit_cv_tool())
        .await?
        .ok_or(RewriteError::NoToolCall)?;

    if call.name != EDIT_CV_TOOL_NAME {
        return Err(RewriteError::UnexpectedTool(call.name));
    }

    debug!("Received tool call arguments: {}", call.arguments);

    EditedCv::parse(&call.arguments)?
        .backfill(request)
        .validate(request)
}

/// Deterministic result built only from the request: entries copied as-is and
/// a generic summary.
pub fn fallback_response(request: &AnalysisRequest) -> AnalysisResult {
    AnalysisResult {
        experiences: request.experiences.clone(),
        skills: request.skills.clone(),
        professional_summary: FALLBACK_SUMMARY.to_string(),
    }
}

/// Returns the original experiences in order, with `description` and
/// `achievements` taken from the rewritten entry of the same id.
fn reconcile_experiences(original: &[Experience], rewritten: &[Experience]) -> Vec<Experience> {
    let mut by_id: HashMap<&str, &Experience> = HashMap::new();
    for exp in rewritten {
        by_id.entry(exp.id.as_str()).or_insert(exp);
    }

    let known: HashSet<&str> = original.iter().map(|e| e.id.as_str()).collect();
    let invented: Vec<&str> = rewritten
        .iter()
        .map(|e| e.id.as_str())
        .filter(|id| !known.contains(id))
        .collect();
    if !invented.is_empty() {
        warn!("Dropping experiences not present in the request: {invented:?}");
    }

    original
        .iter()
        .map(|exp| match by_id.get(exp.id.as_str()) {
            Some(edit) => Experience {
                description: edit.description.clone(),
                achievements: edit.achievements.clone(),
                ..exp.clone()
            },
            None => exp.clone(),
        })
        .collect()
}
