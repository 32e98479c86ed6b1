use crate::purchase::PurchaseRequest;
use crate::telegram::{Message, Update};
use crate::traits::BotApi;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const GREETING: &str = "Привет! Я твой CryptoWorkBot 🚀";
pub const ORDER_ACCEPTED: &str = "Заказ принят";
pub const ORDER_REJECTED: &str = "Не удалось обработать заказ";

/// Which route an update took through the bot
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Handled {
    Start,
    Purchase(PurchaseRequest),
    InvalidPurchase,
    Ignored,
}

/// True for `/start` and `/start <payload>`, and for `/start@<name>` when
/// `<name>` is this bot's username (compared case-insensitively).
pub fn is_start_command(text: &str, bot_username: Option<&str>) -> bool {
    let command = text.split_whitespace().next().unwrap_or_default();
    let (command, mention) = match command.split_once('@') {
        Some((command, mention)) => (command, Some(mention)),
        None => (command, None),
    };

    command == "/start"
        && match mention {
            None => true,
            Some(mention) => bot_username.is_some_and(|name| name.eq_ignore_ascii_case(mention)),
        }
}

#[tracing::instrument(
    name = "HandleUpdate",
    skip(api, update, bot_username),
    fields(
        request_id = %Uuid::new_v4(),
        update_id = update.update_id,
    )
)]
pub async fn handle_update(
    api: &dyn BotApi,
    update: &Update,
    bot_username: Option<&str>,
) -> Result<Handled> {
    let Some(message) = update.message.as_ref() else {
        return Ok(Handled::Ignored);
    };

    if let Some(web_app_data) = message.web_app_data.as_ref() {
        return handle_web_app_data(api, message, &web_app_data.data).await;
    }

    match message.text.as_deref() {
        Some(text) if is_start_command(text, bot_username) => {
            info!("Greeting chat {}", message.chat.id);
            api.send_message(message.chat.id, GREETING).await?;
            Ok(Handled::Start)
        }
        _ => Ok(Handled::Ignored),
    }
}

async fn handle_web_app_data(api: &dyn BotApi, message: &Message, data: &str) -> Result<Handled> {
    match PurchaseRequest::from_web_app_data(data) {
        Ok(request) => {
            info!(product = %request.product, "Purchase request from chat {}", message.chat.id);
            let reply = format!("{}: {}", ORDER_ACCEPTED, request.product);
            api.send_message(message.chat.id, &reply).await?;
            Ok(Handled::Purchase(request))
        }
        Err(e) => {
            warn!("Rejecting web app data from chat {}: {:?}", message.chat.id, e);
            api.send_message(message.chat.id, ORDER_REJECTED).await?;
            Ok(Handled::InvalidPurchase)
        }
    }
}

/// Long-polling driver for the Bot API
pub struct Poller<'a> {
    api: &'a dyn BotApi,
    bot_username: Option<String>,
    offset: i64,
    timeout_secs: u64,
    retry_delay: Duration,
}

impl<'a> Poller<'a> {
    pub fn new(api: &'a dyn BotApi, timeout_secs: u64, retry_delay: Duration) -> Self {
        Self {
            api,
            bot_username: None,
            offset: 0,
            timeout_secs,
            retry_delay,
        }
    }

    pub fn with_bot_username(mut self, bot_username: impl Into<String>) -> Self {
        self.bot_username = Some(bot_username.into());
        self
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn bot_username(&self) -> Option<&str> {
        self.bot_username.as_deref()
    }

    /// Ask the Bot API who we are so `/start@<name>` mentions can be matched
    pub async fn identify(&mut self) -> Result<()> {
        let me = self.api.get_me().await?;
        let username = me.username.context("getMe returned a bot without a username")?;

        info!("Running as @{}", username);
        self.bot_username = Some(username);
        Ok(())
    }

    /// Fetch one batch of updates and run each through `handle_update`.
    ///
    /// Returns how many updates were fetched. A failing handler is logged and
    /// its update is still acknowledged.
    pub async fn poll_once(&mut self) -> Result<usize> {
        let updates = self.api.get_updates(self.offset, self.timeout_secs).await?;

        for update in &updates {
            self.offset = self.offset.max(update.update_id + 1);

            if let Err(e) = handle_update(self.api, update, self.bot_username.as_deref()).await {
                error!("Failed to handle update {}: {:?}", update.update_id, e);
            }
        }

        Ok(updates.len())
    }

    pub async fn run(mut self) {
        while self.bot_username.is_none() {
            if let Err(e) = self.identify().await {
                warn!("getMe failed, retrying in {:?}: {:?}", self.retry_delay, e);
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        info!("Starting long polling");
        loop {
            if let Err(e) = self.poll_once().await {
                warn!("Polling failed, retrying in {:?}: {:?}", self.retry_delay, e);
                tokio::time::sleep(self.retry_delay).await;
            }
        }
    }
}

pub async fn run_polling(api: &dyn BotApi, timeout_secs: u64, retry_delay: Duration) {
    Poller::new(api, timeout_secs, retry_delay).run().await
}
