//! Application config, loaded once at startup. Missing credentials or admin id abort startup.

use anyhow::{Context, Result};
use cbot_telegram::TelegramConfig;
use llm_client::GeneratorConfig;
use std::env;
use std::path::PathBuf;

pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub generator: GeneratorConfig,
    /// Only this user may run status, allow, remove and dump_whitelist.
    pub owner_id: i64,
    pub whitelist_path: PathBuf,
    pub report_dir: PathBuf,
    pub log_file: String,
}

impl BotConfig {
    /// Loads from environment variables. If `token` is provided it overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::from_env_with_token(token)?;
        let generator = GeneratorConfig::from_env()?;
        let owner_id = owner_id_from_env()?;
        Ok(Self {
            telegram,
            generator,
            owner_id,
            whitelist_path: whitelist_path_from_env(),
            report_dir: env::var("REPORT_DIR")
                .unwrap_or_else(|_| "reports".to_string())
                .into(),
            log_file: env::var("LOG_FILE")
                .unwrap_or_else(|_| "logs/commentary-bot.log".to_string()),
        })
    }
}

/// WHITELIST_PATH, or `whitelist.json` in the working directory.
pub(crate) fn whitelist_path_from_env() -> PathBuf {
    env::var("WHITELIST_PATH")
        .unwrap_or_else(|_| "whitelist.json".to_string())
        .into()
}

fn owner_id_from_env() -> Result<i64> {
    let raw = env::var("OWNER_ID")
        .or_else(|_| env::var("ADMIN_ID"))
        .context("OWNER_ID not set")?;
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id != 0)
        .with_context(|| format!("OWNER_ID is not a non-zero integer: {}", raw))
}
