//! OpenAI chat-completions provider.
//!
//! Calls `{base_url}/chat/completions` once per prompt. No retry, no timeout.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{CompletionError, CompletionProvider};
use crate::config::OpenAiConfig;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Completion provider backed by the OpenAI API.
#[derive(Clone, Debug)]
pub struct OpenAiCompletion {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiCompletion {
    pub fn new(config: OpenAiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Reuse an existing HTTP client (connection pool).
    pub fn with_client(client: Client, config: OpenAiConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

/// Extract the first choice's content from a raw response body.
fn parse_completion(body: &[u8]) -> Result<String, CompletionError> {
    let data: ChatResponse = serde_json::from_slice(body)
        .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

    data.choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::MalformedResponse("empty choices array".into()))?
        .message
        .content
        .ok_or_else(|| CompletionError::MalformedResponse("choice has no content".into()))
}

#[async_trait]
impl CompletionProvider for OpenAiCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| CompletionError::Config("OPENAI_API_KEY is not set".into()))?;

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&ChatRequest {
                model: &self.config.model,
                messages: [ChatMessage {
                    role: "user",
                    content: prompt,
                }],
            })
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(CompletionError::Provider {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        parse_completion(&body)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
