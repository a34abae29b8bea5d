//! Facebook Messenger adapter

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::application::errors::{BotError, ConfigError};
use crate::domain::traits::Bot;
use crate::infrastructure::config::MessengerConfig;

/// Graph API base URL
const API_BASE: &str = "https://graph.facebook.com";

/// Graph API version used for the Send API
const API_VERSION: &str = "v2.6";

type HmacSha256 = Hmac<Sha256>;

/// Webhook callback body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub entry: Vec<Entry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Entry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub messaging: Vec<MessagingEvent>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessagingEvent {
    /// Absent on some plugin events (checkbox opt-ins carry only a user_ref)
    #[serde(default)]
    pub sender: Option<Participant>,
    #[serde(default)]
    pub recipient: Option<Participant>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub message: Option<MessengerMessage>,
    #[serde(default)]
    pub postback: Option<Postback>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Participant {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessengerMessage {
    #[serde(default)]
    pub mid: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub is_echo: bool,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Postback {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub payload: Option<String>,
}

/// Verify a webhook subscription request.
///
/// Messenger sends `hub.mode=subscribe`, `hub.verify_token` and
/// `hub.challenge`; the challenge is echoed back when the token matches.
/// A missing mode is tolerated.
pub fn verify_subscription(
    mode: Option<&str>,
    token: Option<&str>,
    challenge: Option<&str>,
    expected_token: &str,
) -> Option<String> {
    let token = token?;
    let challenge = challenge?;

    if mode.is_some_and(|m| m != "subscribe") {
        return None;
    }

    if !expected_token.is_empty() && token == expected_token {
        Some(challenge.to_string())
    } else {
        None
    }
}

/// Verify the `X-Hub-Signature-256` header (`sha256=<hex>`) of a webhook body.
pub fn verify_signature(body: &[u8], signature_header: &str, app_secret: &str) -> bool {
    let Some(digest) = signature_header
        .strip_prefix("sha256=")
        .and_then(|hex_digest| hex::decode(hex_digest).ok())
    else {
        tracing::warn!("Malformed signature header: {}", signature_header);
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(app_secret.as_bytes()) else {
        return false;
    };

    mac.update(body);
    mac.verify_slice(&digest).is_ok()
}

/// Messenger Send API adapter
pub struct MessengerAdapter {
    page_access_token: String,
    client: Client,
    api_base: String,
    api_version: String,
}

impl MessengerAdapter {
    pub fn new(page_access_token: impl Into<String>) -> Self {
        Self {
            page_access_token: page_access_token.into(),
            client: Client::new(),
            api_base: API_BASE.to_string(),
            api_version: API_VERSION.to_string(),
        }
    }

    pub fn from_config(config: &MessengerConfig) -> Result<Self, BotError> {
        let token = config
            .page_access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingField("messenger.page-access-token".to_string()))?;

        Ok(Self::new(token)
            .with_api_base(&config.api_base)
            .with_api_version(&config.api_version))
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Get the Send API URL
    fn send_url(&self) -> String {
        format!("{}/{}/me/messages", self.api_base.trim_end_matches('/'), self.api_version)
    }

    /// Post a text message via the Send API
    pub async fn send_text(&self, recipient_id: &str, text: &str) -> Result<String, BotError> {
        #[derive(Serialize)]
        struct SendRequest<'a> {
            recipient: Recipient<'a>,
            message: MessageData<'a>,
        }

        #[derive(Serialize)]
        struct Recipient<'a> {
            id: &'a str,
        }

        #[derive(Serialize)]
        struct MessageData<'a> {
            text: &'a str,
        }

        #[derive(Deserialize)]
        struct SendResponse {
            message_id: Option<String>,
            error: Option<ApiError>,
        }

        #[derive(Deserialize)]
        struct ApiError {
            message: Option<String>,
            code: Option<i64>,
        }

        let request = SendRequest {
            recipient: Recipient { id: recipient_id },
            message: MessageData { text },
        };

        let response = self.client
            .post(self.send_url())
            .query(&[("access_token", self.page_access_token.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        // Errors arrive as {"error": {...}} regardless of status
        let data: SendResponse = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                BotError::Parse(e.to_string())
            } else {
                BotError::Api(format!("status: {}, body: {}", status, body))
            }
        })?;

        if let Some(error) = data.error {
            let message = error.message.unwrap_or_else(|| "unknown error".to_string());
            return Err(BotError::Api(match error.code {
                Some(code) => format!("{} (code {})", message, code),
                None => message,
            }));
        }

        if !status.is_success() {
            return Err(BotError::Api(format!("status: {}, body: {}", status, body)));
        }

        Ok(data.message_id.unwrap_or_default())
    }
}

#[async_trait]
impl Bot for MessengerAdapter {
    fn name(&self) -> &str {
        "messenger"
    }

    async fn send_message(&self, recipient_id: &str, text: &str) -> Result<String, BotError> {
        tracing::debug!("Sending to {}: {}", recipient_id, text);
        self.send_text(recipient_id, text).await
    }
}
