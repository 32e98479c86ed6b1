use crate::telegram::{Update, User};
use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Channel from the embedded web app to the hosting messenger.
///
/// Delivery is fire-and-forget: the caller never observes an outcome.
#[cfg_attr(test, automock)]
pub trait HostBridge: Send + Sync {
    /// Hand an opaque text payload to the host application
    fn send_data(&self, data: &str);
}

/// Trait for talking to the Telegram Bot API
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BotApi: Send + Sync {
    /// Identity of the bot the token belongs to
    async fn get_me(&self) -> Result<User>;

    /// Long-poll for new updates starting at `offset`
    async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>>;

    /// Send a plain text message to a chat
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;
}
