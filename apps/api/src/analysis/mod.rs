// CV analysis: input normalization, tool schema, prompt construction,
// and the rewrite pipeline behind POST /cv-analysis.
// All LLM calls go through llm_client.

pub mod handlers;
pub mod input;
pub mod prompts;
pub mod rewriter;
pub mod tool;
