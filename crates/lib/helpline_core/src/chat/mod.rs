//! Chat decision chain.
//!
//! For each incoming message:
//! 1. Exact-match FAQ lookup on the trimmed message
//! 2. Otherwise ask the completion provider (failure → fixed apology)
//! 3. If the reply contains an escalation trigger, notify the administrator
//!    and replace the reply with the escalation result
//! 4. Append a chat log record (store errors propagate)
//!
//! Requests are independent; nothing is remembered between calls.
//!
//! The triggers are plain case-sensitive substring checks, so a legitimate
//! answer that happens to contain "Sorry" or "I don't know" is escalated too.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

use crate::chat_log::{ChatLogRecord, ChatLogStore, StoreError};
use crate::completion::{CompletionError, CompletionProvider};
use crate::faq::FaqTable;
use crate::messaging::{MessagingError, MessagingProvider};

/// Reply substituted when the completion provider fails.
pub const AI_UNAVAILABLE_REPLY: &str =
    "Sorry, I am unable to process your request at the moment.";

/// Reply after a successful escalation.
pub const ESCALATION_CONFIRMED_REPLY: &str =
    "Your request has been forwarded to a human agent. They will contact you shortly.";

/// Reply when the escalation message could not be sent.
pub const ESCALATION_FAILED_REPLY: &str = "Failed to escalate. Please try again later.";

/// Substrings that route a reply to a human agent.
pub const ESCALATION_TRIGGERS: &[&str] = &["Sorry", "I don't know"];

/// Incoming chat message. Missing or null fields become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            phone: phone.into(),
        }
    }
}

/// Where the final reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Faq,
    /// Completion text, or the apology when the provider failed.
    Completion,
    Escalated,
    EscalationFailed,
}

/// Result of handling one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutcome {
    pub reply: String,
    pub source: ReplySource,
    /// Set when the completion provider was called and failed.
    pub completion_error: Option<CompletionError>,
    /// Trigger substring that caused escalation, if any.
    pub escalation_trigger: Option<&'static str>,
    /// Set when escalation was attempted and failed.
    pub escalation_error: Option<MessagingError>,
}

/// Sender and recipient numbers for escalation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EscalationRoute {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Returns the first escalation trigger contained in `reply`.
pub fn needs_escalation(reply: &str) -> Option<&'static str> {
    ESCALATION_TRIGGERS
        .iter()
        .copied()
        .find(|trigger| reply.contains(trigger))
}

/// Body of the message sent to the administrator.
pub fn escalation_body(phone: &str, message: &str) -> String {
    format!("Customer ({phone}) needs support: {message}")
}

/// The chat handler with its injected collaborators.
#[derive(Clone)]
pub struct ChatService {
    faq: FaqTable,
    completion: Arc<dyn CompletionProvider>,
    messaging: Arc<dyn MessagingProvider>,
    store: Arc<dyn ChatLogStore>,
    route: EscalationRoute,
}

impl ChatService {
    pub fn new(
        faq: FaqTable,
        completion: Arc<dyn CompletionProvider>,
        messaging: Arc<dyn MessagingProvider>,
        store: Arc<dyn ChatLogStore>,
        route: EscalationRoute,
    ) -> Self {
        Self {
            faq,
            completion,
            messaging,
            store,
            route,
        }
    }

    pub fn faq(&self) -> &FaqTable {
        &self.faq
    }

    /// Run the decision chain for one request and log the interaction.
    ///
    /// Only a store failure is returned as an error; provider failures are
    /// folded into the reply.
    pub async fn handle(&self, request: &ChatRequest) -> Result<ChatOutcome, StoreError> {
        let message = request.message.trim();
        let phone = request.phone.as_str();

        let mut completion_error = None;
        let (mut reply, mut source) = match self.faq.lookup(message) {
            Some(answer) => {
                debug!(phone = %phone, "FAQ match");
                (answer.to_string(), ReplySource::Faq)
            }
            None => match self.completion.complete(message).await {
                Ok(text) => (text.trim().to_string(), ReplySource::Completion),
                Err(e) => {
                    warn!(provider = self.completion.name(), error = %e, "completion failed");
                    completion_error = Some(e);
                    (AI_UNAVAILABLE_REPLY.to_string(), ReplySource::Completion)
                }
            },
        };

        let escalation_trigger = needs_escalation(&reply);
        let mut escalation_error = None;
        if let Some(trigger) = escalation_trigger {
            info!(phone = %phone, trigger, "escalating to human agent");
            match self.escalate(phone, message).await {
                Ok(()) => {
                    reply = ESCALATION_CONFIRMED_REPLY.to_string();
                    source = ReplySource::Escalated;
                }
                Err(e) => {
                    warn!(provider = self.messaging.name(), error = %e, "escalation failed");
                    reply = ESCALATION_FAILED_REPLY.to_string();
                    source = ReplySource::EscalationFailed;
                    escalation_error = Some(e);
                }
            }
        }

        self.store
            .insert_one(&ChatLogRecord {
                user: phone.to_string(),
                message: message.to_string(),
                response: reply.clone(),
            })
            .await?;

        info!(phone = %phone, source = ?source, "chat handled");

        Ok(ChatOutcome {
            reply,
            source,
            completion_error,
            escalation_trigger,
            escalation_error,
        })
    }

    async fn escalate(&self, phone: &str, message: &str) -> Result<(), MessagingError> {
        let from = self
            .route
            .from
            .as_deref()
            .ok_or_else(|| MessagingError::Config("TWILIO_PHONE_NUMBER is not set".into()))?;
        let to = self
            .route
            .to
            .as_deref()
            .ok_or_else(|| MessagingError::Config("ADMIN_PHONE_NUMBER is not set".into()))?;

        self.messaging
            .send(from, to, &escalation_body(phone, message))
            .await
    }
}
