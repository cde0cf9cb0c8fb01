//! Outbound notifier configuration
//!
//! The notifier relays formatted messages to a bot-API style messaging
//! webhook. Both the bot credential and the destination channel id are
//! required for live delivery; their absence is surfaced as a server
//! configuration error, never as a missing-field detail to the client.

use serde::{Deserialize, Serialize};

/// Default bot API base URL
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Default timeout for the outbound relay call, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Configuration for the outbound messaging webhook
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotifierConfig {
    /// Bot credential; `None` means the relay is unconfigured
    pub bot_token: Option<String>,
    /// Destination channel identifier
    pub chat_id: Option<String>,
    /// Base URL of the bot API (overridable for tests)
    pub api_base: String,
    /// Bounded timeout for the outbound call
    pub timeout_secs: u64,
    /// When set, the live webhook is bypassed and a mock notifier with
    /// a fixed simulated delay is used instead
    pub test_mode: bool,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            test_mode: false,
        }
    }
}

impl NotifierConfig {
    /// Load configuration from `NOTIFY_*` / `TEST_MODE` environment variables
    pub fn from_env() -> Self {
        Self {
            bot_token: std::env::var("NOTIFY_BOT_TOKEN").ok().filter(|v| !v.is_empty()),
            chat_id: std::env::var("NOTIFY_CHAT_ID").ok().filter(|v| !v.is_empty()),
            api_base: std::env::var("NOTIFY_API_BASE")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            timeout_secs: std::env::var("NOTIFY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            test_mode: std::env::var("TEST_MODE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Whether both required credentials are present
    pub fn is_configured(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }
}
