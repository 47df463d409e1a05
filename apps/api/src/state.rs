use std::sync::Arc;

use crate::llm_client::ToolCallingBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide completion backend. Stateless from the caller's side and
    /// shared by every in-flight request.
    pub llm: Arc<dyn ToolCallingBackend>,
}
