//! Bot API webhook notifier
//!
//! Delivers formatted messages to a Telegram-style bot API endpoint
//! (`POST {base}/bot{token}/sendMessage`). The request carries a
//! bounded timeout so a stalled webhook cannot hold a flow submission
//! open indefinitely.
//!
//! Error strings returned to the core are generic; the webhook's own
//! failure detail goes to the logs only.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use fg_core::services::notify::Notifier;
use fg_shared::config::NotifierConfig;

use crate::InfrastructureError;

/// Request body for the sendMessage call
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// The subset of the bot API response we act on
#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    result: Option<SentMessage>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

/// Live webhook client
#[derive(Debug)]
pub struct BotApiNotifier {
    client: reqwest::Client,
    endpoint: String,
    chat_id: String,
}

impl BotApiNotifier {
    /// Build the client from configuration, failing when the bot
    /// credential or channel id is absent
    pub fn new(config: &NotifierConfig) -> Result<Self, InfrastructureError> {
        let bot_token = config
            .bot_token
            .as_deref()
            .ok_or_else(|| InfrastructureError::Config("NOTIFY_BOT_TOKEN not set".to_string()))?;
        let chat_id = config
            .chat_id
            .as_deref()
            .ok_or_else(|| InfrastructureError::Config("NOTIFY_CHAT_ID not set".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/bot{}/sendMessage",
                config.api_base.trim_end_matches('/'),
                bot_token
            ),
            chat_id: chat_id.to_string(),
        })
    }

    async fn send(&self, text: &str) -> Result<String, InfrastructureError> {
        let body = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
            parse_mode: "HTML",
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let parsed: SendMessageResponse = response.json().await.map_err(|e| {
            InfrastructureError::Notify(format!("unparseable webhook response ({status}): {e}"))
        })?;

        if !parsed.ok {
            return Err(InfrastructureError::Notify(format!(
                "webhook refused message ({status}): {}",
                parsed.description.unwrap_or_else(|| "no description".to_string())
            )));
        }

        Ok(parsed
            .result
            .map(|m| m.message_id.to_string())
            .unwrap_or_default())
    }
}

#[async_trait]
impl Notifier for BotApiNotifier {
    async fn notify(&self, message: &str) -> Result<String, String> {
        match self.send(message).await {
            Ok(message_id) => {
                tracing::debug!(
                    message_id = %message_id,
                    event = "notify_delivered",
                    "Webhook accepted message"
                );
                Ok(message_id)
            }
            Err(error) => {
                tracing::error!(
                    error = %error,
                    event = "notify_failed",
                    "Webhook delivery failed"
                );
                Err("notification delivery failed".to_string())
            }
        }
    }
}
