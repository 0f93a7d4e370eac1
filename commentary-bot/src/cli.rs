//! CLI parser.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "commentary-bot")]
#[command(about = "Telegram channel commentary bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        /// Long-poll even when WEBHOOK_URL is set.
        #[arg(long)]
        polling: bool,
    },
    /// Print the persisted premium whitelist and handle map.
    ShowWhitelist {
        /// Whitelist file; defaults to WHITELIST_PATH or whitelist.json.
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}
