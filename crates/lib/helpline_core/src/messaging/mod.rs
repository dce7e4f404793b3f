//! Outbound messaging (SMS / WhatsApp) providers.

pub mod twilio;

use async_trait::async_trait;
use thiserror::Error;

pub use twilio::TwilioMessaging;

/// Errors that can occur while sending a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagingError {
    #[error("Missing configuration: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Provider returned {status}: {body}")]
    Provider { status: u16, body: String },
}

/// Sends a text message between two numbers.
#[async_trait]
pub trait MessagingProvider: Send + Sync {
    async fn send(&self, from: &str, to: &str, body: &str) -> Result<(), MessagingError>;

    /// Provider identifier for logging.
    fn name(&self) -> &str;
}
