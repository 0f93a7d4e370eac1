//! Entry points: run the bot, or print the persisted whitelist.

use anyhow::{Context, Result};
use cbot_core::{init_tracing, Bot};
use cbot_telegram::{run_polling, run_webhook, TelegramBotAdapter};
use channel_state::WhitelistFile;
use llm_client::{CommentGenerator, OpenAICommentGenerator};
use openai_client::mask_token;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::components::build_components;
use crate::config::{whitelist_path_from_env, BotConfig};

/// Main entry: init logging, build components, then long-poll or serve the webhook.
/// `force_polling` ignores a configured WEBHOOK_URL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig, force_polling: bool) -> Result<()> {
    init_tracing(&config.log_file)?;

    info!(
        openai_base_url = %config.generator.openai_base_url,
        openai_api_key = %mask_token(&config.generator.openai_api_key),
        standard_model = %config.generator.models.standard,
        premium_model = %config.generator.models.premium,
        timeout_secs = config.generator.timeout.as_secs(),
        owner_id = config.owner_id,
        "Initializing bot"
    );

    let teloxide_bot = config.telegram.build_bot()?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let generator: Arc<dyn CommentGenerator> =
        Arc::new(OpenAICommentGenerator::from_config(&config.generator));
    let components = build_components(&config, bot, generator).await?;

    info!("Bot started successfully");

    match (&config.telegram.webhook, force_polling) {
        (Some(webhook), false) => {
            run_webhook(teloxide_bot, components.handler_chain, webhook).await
        }
        _ => run_polling(teloxide_bot, components.handler_chain).await,
    }
}

/// Prints the premium channels and handle map from the whitelist file.
pub fn show_whitelist(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(whitelist_path_from_env);
    let snapshot = WhitelistFile::new(&path)
        .load()
        .with_context(|| format!("Failed to read {}", path.display()))?;

    println!("Whitelist file: {}", path.display());
    println!("Premium channels ({}):", snapshot.premium_channels.len());
    for id in &snapshot.premium_channels {
        println!("  {}", id);
    }
    println!("Known handles ({}):", snapshot.handles.len());
    for (handle, id) in &snapshot.handles {
        println!("  {} -> {}", handle, id);
    }
    Ok(())
}
