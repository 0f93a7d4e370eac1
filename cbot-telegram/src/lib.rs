//! # cbot-telegram
//!
//! Telegram transport layer: adapters from teloxide types, the [`cbot_core::Bot`] implementation,
//! transport config, and the long-polling / webhook runners that feed a [`handler_chain::HandlerChain`].
//! Knows nothing about channel state or comment generation.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{TelegramConfig, WebhookConfig};
pub use runner::{health_router, run_polling, run_webhook, HEALTH_RESPONSE};
