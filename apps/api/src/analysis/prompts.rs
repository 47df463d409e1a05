// Prompt construction for the CV rewrite call.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{NO_FABRICATION_INSTRUCTION, PRESERVE_FIELDS_INSTRUCTION};

const PERSONA: &str =
    "You are a Certified Professional Resume Writer with 20+ years of experience.";

const STRUCTURE_INSTRUCTION: &str = "You MUST return the result as a JSON object with the \
    EXACT SAME structure as the input, including ALL original fields: 'experiences', 'skills', \
    'professionalSummary', and 'jobDescription'.";

const REWRITE_SCOPE_INSTRUCTION: &str = "For each experience, rewrite ONLY the 'description' \
    field and the 'achievements' field using keywords and measurable goals from the job \
    description. Every other field of every experience and skill must be returned unchanged.";

const SUMMARY_INSTRUCTION: &str = "The professionalSummary must be a compelling, measurable, \
    and concise summary that highlights the candidate's impact, skills, and achievements, using \
    numbers, percentages, or other metrics where possible. \
    Base the summary on the user's work experiences and skills.";

/// Builds the rewrite prompt. `cv_json` is the serialized request body and is
/// embedded verbatim, as is the job description.
pub fn build_rewrite_prompt(job_description: &str, cv_json: &str) -> String {
    format!(
        "{PERSONA} Given this job description: {job_description} and the following CV data \
        (skills and experiences), rewrite the CV to better match the job description. \
        {STRUCTURE_INSTRUCTION} {REWRITE_SCOPE_INSTRUCTION} {NO_FABRICATION_INSTRUCTION} \
        {PRESERVE_FIELDS_INSTRUCTION} {SUMMARY_INSTRUCTION}\n\nCV DATA:\n{cv_json}"
    )
}
