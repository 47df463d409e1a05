/// LLM Client — the single point of entry for all completion API calls.
///
/// Speaks the OpenAI-compatible chat-completions protocol with function calling.
/// No other module may issue HTTP requests to the completion service directly.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const REQUEST_TIMEOUT_SECS: u64 = 120;
/// Let the model decide whether to invoke a tool.
pub const TOOL_CHOICE_AUTO: &str = "auto";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// A tool offered to the model, in the `{"type": "function", "function": {...}}` envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: &'static str,
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionDefinition {
    pub name: &'static str,
    pub description: String,
    /// JSON Schema of the function arguments.
    pub parameters: Value,
}

impl ToolDefinition {
    pub fn function(name: &'static str, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            tool_type: "function",
            function: FunctionDefinition {
                name,
                description: description.into(),
                parameters,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    tools: &'a [ToolDefinition],
    tool_choice: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    pub id: Option<String>,
    pub function: FunctionCall,
}

/// The function the model chose to call. `arguments` is a JSON-encoded string
/// and is not guaranteed to be valid JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatCompletion {
    /// Returns the first tool call of the first choice, if the model made one.
    pub fn first_tool_call(&self) -> Option<&ToolCall> {
        self.choices
            .first()
            .and_then(|c| c.message.tool_calls.as_ref())
            .and_then(|calls| calls.first())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The seam between the rewrite pipeline and the completion service.
///
/// Carried in `AppState` as `Arc<dyn ToolCallingBackend>`.
#[async_trait]
pub trait ToolCallingBackend: Send + Sync {
    /// Sends `prompt` with a single tool under automatic tool choice.
    /// `Ok(None)` means the model answered without invoking the tool.
    async fn call_tool(
        &self,
        prompt: &str,
        tool: &ToolDefinition,
    ) -> Result<Option<FunctionCall>, LlmError>;
}

/// Client for an OpenAI-compatible chat-completions endpoint.
/// Cheap to clone; safe to share across concurrent requests.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(base_url: &str, api_key: String, model: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| LlmError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a single chat-completion call with one user message and the given tools.
    /// No retries: a transport failure or non-2xx status is returned to the caller.
    pub async fn chat_with_tools(
        &self,
        prompt: &str,
        tools: &[ToolDefinition],
        tool_choice: &str,
    ) -> Result<ChatCompletion, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            tools,
            tool_choice,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletion = response.json().await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(completion)
    }
}

#[async_trait]
impl ToolCallingBackend for LlmClient {
    async fn call_tool(
        &self,
        prompt: &str,
        tool: &ToolDefinition,
    ) -> Result<Option<FunctionCall>, LlmError> {
        let completion = self
            .chat_with_tools(prompt, std::slice::from_ref(tool), TOOL_CHOICE_AUTO)
            .await?;

        match completion.first_tool_call() {
            Some(call) => {
                debug!(
                    "Model invoked tool '{}' (call id {:?})",
                    call.function.name, call.id
                );
                Ok(Some(call.function.clone()))
            }
            None => {
                let text = completion
                    .choices
                    .first()
                    .and_then(|c| c.message.content.as_deref())
                    .unwrap_or_default();
                debug!("Model answered without a tool call: {text}");
                Ok(None)
            }
        }
    }
}
