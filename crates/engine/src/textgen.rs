//! Text-generation client.
//!
//! Sends step text to a chat-completions style HTTP endpoint and returns
//! the provider's structured response unmodified.

use std::time::Duration;

use crate::error::StepError;

/// Request timeout for a single completion call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default endpoint when `TEXTGEN_API_URL` is not set.
const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model when `TEXTGEN_MODEL` is not set.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for the text-generation service.
#[derive(Debug, Clone)]
pub struct TextGenConfig {
    /// Chat-completions endpoint URL.
    pub api_url: String,
    /// Bearer token for the endpoint.
    pub api_key: String,
    /// Model name sent with every request.
    pub model: String,
}

impl TextGenConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var           | Default                                       |
    /// |-------------------|-----------------------------------------------|
    /// | `TEXTGEN_API_URL` | `https://api.openai.com/v1/chat/completions`  |
    /// | `TEXTGEN_API_KEY` | (required)                                    |
    /// | `TEXTGEN_MODEL`   | `gpt-4o-mini`                                 |
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("TEXTGEN_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()),
            api_key: std::env::var("TEXTGEN_API_KEY").expect("TEXTGEN_API_KEY must be set"),
            model: std::env::var("TEXTGEN_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
        }
    }
}

/// Client for the text-generation endpoint.
pub struct TextGenerator {
    client: reqwest::Client,
    config: TextGenConfig,
}

impl TextGenerator {
    pub fn new(config: TextGenConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build text-generation HTTP client");
        Self { client, config }
    }

    /// Send `text` as a single user message and return the provider's
    /// structured JSON response. Any call failure propagates to the caller.
    pub async fn complete(&self, text: &str) -> Result<serde_json::Value, StepError> {
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": text}],
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(StepError::TextGen(format!(
                "endpoint returned status {}: {detail}",
                status.as_u16()
            )));
        }

        Ok(response.json().await?)
    }
}
