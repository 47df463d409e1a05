//! CV data model shared by the analysis endpoint and the rewrite pipeline.
//!
//! Field names are camelCase on the wire. All values are request-scoped and
//! never persisted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub level: String,
}

/// A single work experience. `end_date` stays present even when `current` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub location: String,
    pub description: String,
    pub achievements: Vec<String>,
}

/// Inbound body of `POST /cv-analysis`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub skills: Vec<Skill>,
    pub job_description: String,
    pub experiences: Vec<Experience>,
}

/// Tailored CV returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub experiences: Vec<Experience>,
    pub skills: Vec<Skill>,
    pub professional_summary: String,
}
