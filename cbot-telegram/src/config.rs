//! Telegram transport config: token, API URL, and optional webhook settings.
//! Loaded from BOT_TOKEN (or TELEGRAM_TOKEN), TELEGRAM_API_URL, WEBHOOK_URL, WEBHOOK_LISTEN_ADDR, WEBHOOK_SECRET_PATH.

use anyhow::{Context, Result};
use reqwest::Url;
use std::env;
use std::net::SocketAddr;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";

/// Webhook listener settings. Present only when WEBHOOK_URL is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// Public base URL Telegram posts updates to, e.g. `https://bot.example.com`.
    pub url: String,
    pub listen_addr: SocketAddr,
    /// Path segment appended to `url`; only requests on this path are accepted.
    pub secret_path: String,
}

impl WebhookConfig {
    /// Full URL registered with Telegram: `<url>/<secret_path>`.
    pub fn endpoint_url(&self) -> Result<Url> {
        let raw = format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            self.secret_path.trim_start_matches('/')
        );
        Url::parse(&raw).with_context(|| format!("Invalid WEBHOOK_URL: {}", self.url))
    }
}

/// Telegram transport config.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    /// `None` means long polling.
    pub webhook: Option<WebhookConfig>,
}

impl TelegramConfig {
    /// Loads from environment variables. BOT_TOKEN (or TELEGRAM_TOKEN) is required.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_token(None)
    }

    /// Like [`TelegramConfig::from_env`], but a given `token` takes precedence over BOT_TOKEN.
    pub fn from_env_with_token(token: Option<String>) -> Result<Self> {
        let bot_token = token
            .or_else(|| env::var("BOT_TOKEN").ok())
            .or_else(|| env::var("TELEGRAM_TOKEN").ok())
            .filter(|t| !t.trim().is_empty())
            .context("BOT_TOKEN not set")?;
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();

        let webhook = match env::var("WEBHOOK_URL").ok().filter(|u| !u.trim().is_empty()) {
            Some(url) => {
                let raw_addr = env::var("WEBHOOK_LISTEN_ADDR")
                    .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
                let listen_addr = raw_addr
                    .parse::<SocketAddr>()
                    .with_context(|| format!("Invalid WEBHOOK_LISTEN_ADDR: {}", raw_addr))?;
                let secret_path = env::var("WEBHOOK_SECRET_PATH")
                    .ok()
                    .filter(|p| !p.trim().is_empty())
                    .unwrap_or_else(|| bot_token.clone());
                Some(WebhookConfig {
                    url,
                    listen_addr,
                    secret_path,
                })
            }
            None => None,
        };

        Ok(Self {
            bot_token,
            telegram_api_url,
            webhook,
        })
    }

    /// Builds with the given token; no custom API URL, long polling.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            webhook: None,
        }
    }

    /// Creates the teloxide Bot, pointing it at the custom API URL when configured.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match &self.telegram_api_url {
            Some(raw) => {
                let url = Url::parse(raw)
                    .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", raw))?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}
