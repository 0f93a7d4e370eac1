//! Component assembly: restores persisted state and wires the handler chain.

use anyhow::{Context, Result};
use cbot_core::Bot;
use channel_state::{ChannelStore, WhitelistFile, WhitelistPersister};
use commentary_handlers::{CommandHandler, CommentaryHandler, LoggingHandler, ReportExporter};
use handler_chain::HandlerChain;
use llm_client::CommentGenerator;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::BotConfig;

/// Shared state and the chain built on top of it.
#[derive(Clone)]
pub struct BotComponents {
    pub store: ChannelStore,
    pub persister: WhitelistPersister,
    pub handler_chain: HandlerChain,
}

/// Loads the whitelist (a missing file is an empty whitelist; an unreadable one aborts startup),
/// seeds the store with it and builds the chain.
#[instrument(skip(config, bot, generator), fields(whitelist_path = %config.whitelist_path.display()))]
pub async fn build_components(
    config: &BotConfig,
    bot: Arc<dyn Bot>,
    generator: Arc<dyn CommentGenerator>,
) -> Result<BotComponents> {
    let file = WhitelistFile::new(&config.whitelist_path);
    let snapshot = file
        .load()
        .with_context(|| format!("Failed to load whitelist {}", config.whitelist_path.display()))?;
    let store = ChannelStore::with_snapshot(&snapshot).await;
    let persister = WhitelistPersister::new(store.clone(), file);

    let handler_chain = build_handler_chain(
        config.owner_id,
        &config.report_dir,
        store.clone(),
        persister.clone(),
        bot,
        generator,
    );
    info!(
        premium_channels = snapshot.premium_channels.len(),
        handles = snapshot.handles.len(),
        handlers = handler_chain.len(),
        "Components built"
    );

    Ok(BotComponents {
        store,
        persister,
        handler_chain,
    })
}

/// Chain order: LoggingHandler, CommandHandler, CommentaryHandler.
pub fn build_handler_chain(
    owner_id: i64,
    report_dir: &Path,
    store: ChannelStore,
    persister: WhitelistPersister,
    bot: Arc<dyn Bot>,
    generator: Arc<dyn CommentGenerator>,
) -> HandlerChain {
    let exporter = ReportExporter::new(store.clone(), report_dir, bot.clone());
    let command_handler = CommandHandler::new(
        owner_id,
        store.clone(),
        persister.clone(),
        exporter,
        bot.clone(),
    );
    let commentary_handler = CommentaryHandler::new(store, persister, generator, bot);

    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(command_handler))
        .add_handler(Arc::new(commentary_handler))
}
