use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the OpenAI-compatible completion service.
    pub llm_base_url: String,
    pub llm_api_key: String,
    pub model_name: String,
    pub environment: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            llm_base_url: require_env("UNIFY_URL")?,
            llm_api_key: require_env("UNIFY_API_KEY")?,
            model_name: require_env("MODEL_NAME")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| default_log_level(&environment).to_string()),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

/// Development runs log raw tool-call arguments, which are emitted at debug level.
fn default_log_level(environment: &str) -> &'static str {
    if environment == "development" {
        "debug"
    } else {
        "info"
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
