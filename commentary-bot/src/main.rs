//! commentary-bot CLI: run the bot, or inspect the persisted whitelist. Config from env and optional CLI args.

use anyhow::Result;
use clap::Parser;
use commentary_bot::{run_bot, show_whitelist, BotConfig, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, polling } => {
            let config = BotConfig::load(token)?;
            run_bot(config, polling).await
        }
        Commands::ShowWhitelist { path } => show_whitelist(path),
    }
}
