use crate::traits::BotApi;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Upper bound for the server-side long poll
pub const MAX_POLL_TIMEOUT_SECS: u64 = 3600;

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

impl<T> ApiResponse<T> {
    pub fn into_result(self, method: &str) -> Result<T> {
        if !self.ok {
            return Err(anyhow!(
                "Telegram {} failed ({}): {}",
                method,
                self.error_code.unwrap_or_default(),
                self.description.unwrap_or_else(|| "no description".to_owned())
            ));
        }
        self.result
            .with_context(|| format!("Telegram {} returned ok without a result", method))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

impl Update {
    /// Decode one raw update.
    ///
    /// An update the bot cannot read still yields its `update_id` (with no
    /// message) so the poller acknowledges it instead of fetching it again.
    pub fn from_raw(raw: serde_json::Value) -> Option<Self> {
        let update_id = raw.get("update_id").and_then(serde_json::Value::as_i64);

        match serde_json::from_value::<Update>(raw) {
            Ok(update) => Some(update),
            Err(e) => {
                warn!("Skipping undecodable update {:?}: {}", update_id, e);
                update_id.map(|update_id| Update {
                    update_id,
                    message: None,
                })
            }
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub web_app_data: Option<WebAppData>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Chat {
    pub id: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Payload a Mini App sent through `Telegram.WebApp.sendData`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WebAppData {
    pub data: String,
    pub button_text: String,
}

/// HTTP client for the Telegram Bot API
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self> {
        info!("Creating HTTP client for the Telegram Bot API");
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, method);

        let response: ApiResponse<T> = self
            .client
            .post(&url)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to call Telegram {}", method))?
            .json()
            .await
            .with_context(|| format!("Failed to decode Telegram {} response", method))?;

        response.into_result(method)
    }
}

#[async_trait]
impl BotApi for TelegramClient {
    #[tracing::instrument(name = "get_me", skip(self))]
    async fn get_me(&self) -> Result<User> {
        self.call("getMe", &json!({}), Duration::from_secs(30)).await
    }

    #[tracing::instrument(name = "get_updates", skip(self))]
    async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>> {
        let timeout_secs = timeout_secs.min(MAX_POLL_TIMEOUT_SECS);
        let body = json!({
            "offset": offset,
            "timeout": timeout_secs,
            "allowed_updates": ["message"],
        });

        // The HTTP timeout has to outlive the server-side long poll
        let raw: Vec<serde_json::Value> = self
            .call(
                "getUpdates",
                &body,
                Duration::from_secs(timeout_secs.saturating_add(10)),
            )
            .await?;
        let updates: Vec<Update> = raw.into_iter().filter_map(Update::from_raw).collect();
        debug!("Received {} updates", updates.len());

        Ok(updates)
    }

    #[tracing::instrument(name = "send_message", skip(self, text))]
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let body = json!({
            "chat_id": chat_id,
            "text": text,
        });

        let _: serde_json::Value = self.call("sendMessage", &body, Duration::from_secs(30)).await?;

        Ok(())
    }
}
