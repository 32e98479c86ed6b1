use crate::telegram::MAX_POLL_TIMEOUT_SECS;
use anyhow::{Context, Result, anyhow, ensure};
use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
pub const DEFAULT_HEALTH_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, PartialEq)]
pub struct Settings {
    pub bot_token: String,
    pub api_url: String,
    pub poll_timeout_secs: u64,
    pub retry_delay: Duration,
    pub health_addr: SocketAddr,
    pub log_level: String,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("bot_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("retry_delay", &self.retry_delay)
            .field("health_addr", &self.health_addr)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup, `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup("BOT_TOKEN")
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| anyhow!("BOT_TOKEN must be set to the token issued by @BotFather"))?;

        let api_url = lookup("TELEGRAM_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();

        let poll_timeout_secs = match lookup("POLL_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("POLL_TIMEOUT_SECS is not a number: {v}"))?,
            None => DEFAULT_POLL_TIMEOUT_SECS,
        };
        ensure!(
            poll_timeout_secs <= MAX_POLL_TIMEOUT_SECS,
            "POLL_TIMEOUT_SECS must be at most {MAX_POLL_TIMEOUT_SECS}, got {poll_timeout_secs}"
        );

        let retry_delay_ms = match lookup("RETRY_DELAY_MS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("RETRY_DELAY_MS is not a number: {v}"))?,
            None => DEFAULT_RETRY_DELAY_MS,
        };

        let health_addr = lookup("HEALTH_ADDR")
            .unwrap_or_else(|| DEFAULT_HEALTH_ADDR.to_owned())
            .parse::<SocketAddr>()
            .context("HEALTH_ADDR is not a valid socket address")?;

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned());

        Ok(Settings {
            bot_token,
            api_url,
            poll_timeout_secs,
            retry_delay: Duration::from_millis(retry_delay_ms),
            health_addr,
            log_level,
        })
    }
}
