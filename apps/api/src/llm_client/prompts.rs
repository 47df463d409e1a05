// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it and pulls cross-cutting rules from here.

/// Factuality rule appended to every rewrite prompt.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    DO NOT invent or hallucinate new experiences, skills, or achievements. \
    Keep the core meaning and facts true to the original, just express them \
    in a way that matches the job requirements.";

/// Structural rule for prompts whose output must mirror the input shape.
pub const PRESERVE_FIELDS_INSTRUCTION: &str = "\
    Do NOT omit, rename, or remove any fields, even if unchanged. \
    Only enhance the content.";
