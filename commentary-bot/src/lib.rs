//! # commentary-bot
//!
//! Application layer: [`BotConfig`] from the environment, component assembly into a
//! [`handler_chain::HandlerChain`], and [`run_bot`] which starts polling or the webhook listener.

pub mod cli;
mod components;
mod config;
mod runner;

pub use cli::{Cli, Commands};
pub use components::{build_components, build_handler_chain, BotComponents};
pub use config::BotConfig;
pub use runner::{run_bot, show_whitelist};
