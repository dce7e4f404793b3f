//! Twilio Messages API provider.
//!
//! `POST {base}/2010-04-01/Accounts/{sid}/Messages.json` with a form body and
//! HTTP basic auth (account SID / auth token).

use async_trait::async_trait;
use reqwest::Client;

use super::{MessagingError, MessagingProvider};
use crate::config::TwilioConfig;

/// Messaging provider backed by the Twilio REST API.
#[derive(Clone, Debug)]
pub struct TwilioMessaging {
    client: Client,
    config: TwilioConfig,
}

impl TwilioMessaging {
    pub fn new(config: TwilioConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: TwilioConfig) -> Self {
        Self { client, config }
    }

    fn messages_url(&self, account_sid: &str) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.base_url.trim_end_matches('/'),
            account_sid
        )
    }
}

#[async_trait]
impl MessagingProvider for TwilioMessaging {
    async fn send(&self, from: &str, to: &str, body: &str) -> Result<(), MessagingError> {
        let account_sid = self
            .config
            .account_sid
            .as_deref()
            .ok_or_else(|| MessagingError::Config("TWILIO_ACCOUNT_SID is not set".into()))?;
        let auth_token = self
            .config
            .auth_token
            .as_deref()
            .ok_or_else(|| MessagingError::Config("TWILIO_AUTH_TOKEN is not set".into()))?;

        let resp = self
            .client
            .post(self.messages_url(account_sid))
            .basic_auth(account_sid, Some(auth_token))
            .form(&[("From", from), ("To", to), ("Body", body)])
            .send()
            .await
            .map_err(|e| MessagingError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(MessagingError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "twilio"
    }
}
