//! OpenAI-compatible chat-completions backend.
//!
//! Endpoint: POST {api_base}/chat/completions
//! Auth: Bearer token

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Settings;

use super::{CompletionBackend, CompletionRequest, ServiceError};

/// Per-request timeout. Cover-letter generation on a large model is the slow
/// path; well under this in practice.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Chat-completions client for OpenAI and API-compatible services
pub struct OpenAiBackend {
    api_base: String,
    api_key: String,
    client: reqwest::Client,
}

/// Request body for the chat-completions endpoint
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response body (only the fields we read)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OpenAiBackend {
    /// Create a new backend against an API base like
    /// `https://api.openai.com/v1` (no trailing slash needed).
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create from resolved settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_base.clone(), settings.api_key.clone())
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ServiceError> {
        let body = ChatRequest {
            model: &request.model,
            temperature: request.temperature,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
        };

        let response = self
            .client
            .post(self.completions_url())
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::new(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            // Auth, quota and validation failures land here; keep the body
            // snippet so the user can tell which one it was.
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(300).collect();
            return Err(ServiceError::with_status(
                status.as_u16(),
                format!("service returned {status}: {}", snippet.trim()),
            ));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::new(format!("malformed response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ServiceError::new("malformed response: no choices returned"))?;

        Ok(content)
    }
}
