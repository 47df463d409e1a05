pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/cv-analysis", post(handlers::handle_cv_analysis))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Json,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::rewriter::FALLBACK_SUMMARY;
    use crate::llm_client::{FunctionCall, LlmClient, LlmError, ToolCallingBackend, ToolDefinition};

    /// Backend answering every call with the same optional tool call.
    struct CannedBackend(Option<FunctionCall>);

    #[async_trait]
    impl ToolCallingBackend for CannedBackend {
        async fn call_tool(
            &self,
            _prompt: &str,
            _tool: &ToolDefinition,
        ) -> Result<Option<FunctionCall>, LlmError> {
            Ok(self.0.clone())
        }
    }

    fn router_with(llm: Arc<dyn ToolCallingBackend>) -> Router {
        build_router(AppState { llm })
    }

    fn edit_call(arguments: &str) -> Option<FunctionCall> {
        Some(FunctionCall {
            name: "provide_edited_cv".to_string(),
            arguments: arguments.to_string(),
        })
    }

    fn sample_body() -> Value {
        json!({
            "skills": [{"id": "s1", "name": "Python", "level": "expert"}],
            "jobDescription": "Senior backend engineer",
            "experiences": [{
                "id": "e1",
                "company": "Acme",
                "position": "Engineer",
                "title": "Software Engineer",
                "startDate": "2019-03",
                "endDate": "2023-06",
                "current": false,
                "location": "Berlin",
                "description": "Wrote code",
                "achievements": ["Shipped v1"]
            }]
        })
    }

    async fn post_analysis(app: Router, body: String) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/cv-analysis")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let app = router_with(Arc::new(CannedBackend(None)));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rewrite_updates_summary_and_description() {
        let mut edited = sample_body();
        edited["experiences"][0]["description"] =
            json!("Designed Python services serving 1M users");
        edited["professionalSummary"] = json!("Backend engineer who cut costs by 20%");

        let app = router_with(Arc::new(CannedBackend(edit_call(&edited.to_string()))));
        let (status, body) = post_analysis(app, sample_body().to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"], sample_body()["skills"]);
        assert_eq!(body["experiences"][0]["id"], "e1");
        assert_eq!(
            body["experiences"][0]["description"],
            "Designed Python services serving 1M users"
        );
        assert_eq!(
            body["professionalSummary"],
            "Backend engineer who cut costs by 20%"
        );
        assert!(body.get("jobDescription").is_none());
    }

    #[tokio::test]
    async fn test_no_tool_call_returns_fallback() {
        let app = router_with(Arc::new(CannedBackend(None)));
        let (status, body) = post_analysis(app, sample_body().to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["professionalSummary"], FALLBACK_SUMMARY);
        assert_eq!(body["experiences"], sample_body()["experiences"]);
        assert_eq!(body["skills"], sample_body()["skills"]);
    }

    #[tokio::test]
    async fn test_invalid_tool_arguments_still_ok() {
        let app = router_with(Arc::new(CannedBackend(edit_call("{not json"))));
        let (status, body) = post_analysis(app, sample_body().to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["professionalSummary"], FALLBACK_SUMMARY);
    }

    #[tokio::test]
    async fn test_missing_skills_is_server_error() {
        let mut request = sample_body();
        request.as_object_mut().unwrap().remove("skills");

        let app = router_with(Arc::new(CannedBackend(None)));
        let (status, body) = post_analysis(app, request.to_string()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Internal server error: "), "{detail}");
        assert!(detail.contains("skills"), "{detail}");
    }

    #[tokio::test]
    async fn test_malformed_body_is_server_error() {
        let app = router_with(Arc::new(CannedBackend(None)));
        let (status, body) = post_analysis(app, "{\"skills\": [".to_string()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_end_to_end_against_completion_service() {
        // Completion service that returns a tool call with broken arguments.
        let completion = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                Json(json!({
                    "choices": [{
                        "message": {
                            "content": null,
                            "tool_calls": [{
                                "id": "call_1",
                                "type": "function",
                                "function": {
                                    "name": "provide_edited_cv",
                                    "arguments": "{\"professionalSummary\": "
                                }
                            }]
                        }
                    }]
                }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, completion).await.unwrap();
        });

        let client = LlmClient::new(
            &format!("http://{addr}/v1"),
            "test-key".to_string(),
            "test-model".to_string(),
        )
        .unwrap();
        let app = router_with(Arc::new(client));
        let (status, body) = post_analysis(app, sample_body().to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["professionalSummary"], FALLBACK_SUMMARY);
        assert_eq!(body["experiences"], sample_body()["experiences"]);
    }
}
