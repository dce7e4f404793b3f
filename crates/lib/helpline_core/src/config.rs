//! Provider configuration resolved from the environment.
//!
//! Nothing here is validated: a missing credential or phone number only
//! surfaces when the corresponding provider call is attempted.

/// Default chat-completion model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";

/// Default OpenAI API base URL.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default Twilio API base URL.
pub const DEFAULT_TWILIO_BASE_URL: &str = "https://api.twilio.com";

/// OpenAI chat-completion settings.
#[derive(Clone, Debug, Default)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

/// Twilio messaging settings.
#[derive(Clone, Debug, Default)]
pub struct TwilioConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    /// Sender number for outbound messages.
    pub from_number: Option<String>,
    /// Administrator number that receives escalations.
    pub admin_number: Option<String>,
    pub base_url: String,
}

/// Everything the core needs to build its providers.
#[derive(Clone, Debug, Default)]
pub struct HelplineConfig {
    pub openai: OpenAiConfig,
    pub twilio: TwilioConfig,
}

impl HelplineConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable              | Default                     |
    /// |-----------------------|-----------------------------|
    /// | `OPENAI_API_KEY`      | unset                       |
    /// | `OPENAI_MODEL`        | `gpt-4`                     |
    /// | `OPENAI_BASE_URL`     | `https://api.openai.com/v1` |
    /// | `TWILIO_ACCOUNT_SID`  | unset                       |
    /// | `TWILIO_AUTH_TOKEN`   | unset                       |
    /// | `TWILIO_PHONE_NUMBER` | unset                       |
    /// | `ADMIN_PHONE_NUMBER`  | unset                       |
    /// | `TWILIO_BASE_URL`     | `https://api.twilio.com`    |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            openai: OpenAiConfig {
                api_key: lookup("OPENAI_API_KEY"),
                model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into()),
                base_url: lookup("OPENAI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.into()),
            },
            twilio: TwilioConfig {
                account_sid: lookup("TWILIO_ACCOUNT_SID"),
                auth_token: lookup("TWILIO_AUTH_TOKEN"),
                from_number: lookup("TWILIO_PHONE_NUMBER"),
                admin_number: lookup("ADMIN_PHONE_NUMBER"),
                base_url: lookup("TWILIO_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_TWILIO_BASE_URL.into()),
            },
        }
    }
}
