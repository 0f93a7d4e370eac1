//! Update ingestion: a teloxide Dispatcher with `message` and `channel_post` branches, both converted
//! to core [`cbot_core::Message`] and passed to the same [`HandlerChain`].
//!
//! The dispatcher runs updates from different chats concurrently and updates from one chat in order.

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use cbot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::update_listeners::{webhooks, UpdateListener};
use tracing::{debug, error, info, instrument};

use crate::adapters::TelegramMessageWrapper;
use crate::config::WebhookConfig;

fn schema() -> UpdateHandler<anyhow::Error> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(dispatch_message))
        .branch(Update::filter_channel_post().endpoint(dispatch_message))
}

async fn dispatch_message(msg: teloxide::types::Message, chain: HandlerChain) -> Result<()> {
    let core_msg = TelegramMessageWrapper(&msg).to_core();

    debug!(
        chat_id = core_msg.chat.id,
        message_id = %core_msg.id,
        "step: processing message (handler chain started)"
    );
    if let Err(e) = chain.handle(&core_msg).await {
        error!(error = %e, chat_id = core_msg.chat.id, "Handler chain failed");
    }
    Ok(())
}

/// Long-polls Telegram until Ctrl-C.
#[instrument(skip(bot, chain))]
pub async fn run_polling(bot: teloxide::Bot, chain: HandlerChain) -> Result<()> {
    // A leftover webhook would make getUpdates fail.
    if let Err(e) = bot.delete_webhook().await {
        error!(error = %e, "Failed to delete webhook before polling");
    }

    info!("Starting long polling");
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![chain])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Polling stopped");
    Ok(())
}

/// Body of the liveness route.
pub const HEALTH_RESPONSE: &str = "Bot is running";

/// Liveness route served next to the webhook: `GET /` answers [`HEALTH_RESPONSE`].
pub fn health_router() -> Router {
    Router::new().route("/", get(|| async { HEALTH_RESPONSE }))
}

/// Registers the webhook with Telegram and serves updates on `config.listen_addr` until Ctrl-C.
///
/// Only POSTs on the secret path that carry Telegram's secret token header are fed to the
/// dispatcher. `GET /` is answered by [`health_router`].
#[instrument(skip(bot, chain, config), fields(listen_addr = %config.listen_addr))]
pub async fn run_webhook(
    bot: teloxide::Bot,
    chain: HandlerChain,
    config: &WebhookConfig,
) -> Result<()> {
    let url = config.endpoint_url()?;
    let (mut listener, stop_flag, webhook_router) =
        webhooks::axum_to_router(bot.clone(), webhooks::Options::new(config.listen_addr, url))
            .await
            .context("Failed to register webhook")?;
    let app = webhook_router.merge(health_router());

    let tcp_listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind webhook listener on {}", config.listen_addr))?;
    let stop_token = listener.stop_token();
    tokio::spawn(async move {
        if let Err(e) = axum::serve(tcp_listener, app)
            .with_graceful_shutdown(stop_flag)
            .await
        {
            error!(error = %e, "Webhook server failed");
            stop_token.stop();
        }
    });

    info!("Webhook listener started");
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![chain])
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    info!("Webhook stopped");
    Ok(())
}
