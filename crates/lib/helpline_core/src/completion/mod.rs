//! AI completion providers.
//!
//! A provider turns a single user message into generated text. Failures are
//! reported as a typed [`CompletionError`] so the caller can decide what to
//! substitute and tests can assert on the cause.

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use openai::OpenAiCompletion;

/// Errors that can occur while requesting a completion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("Missing configuration: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Single-turn chat completion.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a reply to `prompt`, sent as one user-role message.
    ///
    /// The returned text is exactly what the provider produced; trimming is
    /// the caller's concern.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Provider identifier for logging.
    fn name(&self) -> &str;
}
