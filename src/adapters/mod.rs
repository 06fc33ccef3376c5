//! Completion backend interface for external text-generation services.
//!
//! Backends provide a unified interface over whatever service actually turns
//! a prompt into text. The pipeline only ever sees this trait.

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

// Re-export the default backend
pub use openai::OpenAiBackend;

/// One text-completion call: a prompt plus the (model, temperature) pair the
/// requesting step wants it run with.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier, e.g. "gpt-4"
    pub model: String,

    /// Sampling temperature (0.0 = deterministic)
    pub temperature: f32,

    /// Fully rendered prompt text
    pub prompt: String,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, temperature: f32, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature,
            prompt: prompt.into(),
        }
    }
}

/// Catch-all failure from the completion service.
///
/// Auth rejections, quota limits, network failures and malformed responses
/// all surface as this one kind; callers get a human-readable message and,
/// when the service answered at all, the HTTP status.
#[derive(Debug, Clone, Error)]
#[error("completion service error: {message}")]
pub struct ServiceError {
    /// Human-readable description of what went wrong
    pub message: String,

    /// HTTP status code, when the failure came with one
    pub status: Option<u16>,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }
}

/// Trait for external text-completion services.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Human-readable backend name (used in logs)
    fn name(&self) -> &str;

    /// Submit one completion request and return the generated text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ServiceError>;
}
