//! Admin commands and `/report`. Plain messages pass through to the next handler.
//!
//! Per command: access check, then argument resolution, then the store mutation, then persistence.
//! A failed save is reported in the reply but the mutation stays in effect.

use std::sync::Arc;

use async_trait::async_trait;
use cbot_core::{Bot, Document, Handler, HandlerResponse, Message, Result};
use channel_state::{ChannelStore, WhitelistPersister};
use tracing::{debug, error, info, instrument, warn};

use crate::command::{classify, Command, Denial, InboundEvent};
use crate::error::ResolutionError;
use crate::report::ReportExporter;
use crate::resolve::resolve_target;

pub const ACCESS_DENIED: &str = "Access denied.";
pub const NO_ACTIVITY: &str = "No activity data yet.";
pub const WHITELIST_NOT_FOUND: &str = "Whitelist file not found.";
const WHITELIST_FILENAME: &str = "whitelist.json";

#[derive(Clone)]
pub struct CommandHandler {
    admin_id: i64,
    store: ChannelStore,
    persister: WhitelistPersister,
    exporter: ReportExporter,
    bot: Arc<dyn Bot>,
}

impl CommandHandler {
    pub fn new(
        admin_id: i64,
        store: ChannelStore,
        persister: WhitelistPersister,
        exporter: ReportExporter,
        bot: Arc<dyn Bot>,
    ) -> Self {
        Self {
            admin_id,
            store,
            persister,
            exporter,
            bot,
        }
    }

    fn is_admin(&self, message: &Message) -> bool {
        message.sender_id() == Some(self.admin_id)
    }

    /// Runs one command and returns the reply text, if the command replies with text.
    async fn execute(&self, message: &Message, command: Command) -> Option<String> {
        match command {
            Command::Status => Some(self.status_text().await),
            Command::Allow(arg) => Some(self.allow(arg.as_deref()).await),
            Command::Remove(arg) => Some(self.remove(arg.as_deref()).await),
            Command::DumpWhitelist => self.dump_whitelist(message.chat.id).await,
            Command::Report => {
                if let Err(e) = self.exporter.export_channel(message.chat.id).await {
                    error!(error = %e, chat_id = message.chat.id, "Report export failed");
                }
                None
            }
        }
    }

    /// One line per channel in first-seen order.
    pub async fn status_text(&self) -> String {
        let stats = self.store.stats().await;
        if stats.is_empty() {
            return NO_ACTIVITY.to_string();
        }
        let mut text = String::from("Channel statistics:\n");
        for s in stats {
            let name = s
                .display_name
                .as_deref()
                .map(|n| format!(" (@{})", n.trim_start_matches('@')))
                .unwrap_or_default();
            text.push_str(&format!(
                "\nChannel {}{}: {} comments, tier: {}",
                s.channel_id, name, s.usage_count, s.tier
            ));
        }
        text
    }

    async fn allow(&self, arg: Option<&str>) -> String {
        let target = match resolve_target(&self.store, arg, "allow").await {
            Ok(target) => target,
            Err(e) => return e.to_string(),
        };
        let added = self.store.allow(target.channel_id).await;
        info!(channel_id = target.channel_id, added, "Channel allowed");
        self.persist_with(format!(
            "Channel {} added to the premium whitelist",
            target.label
        ))
        .await
    }

    async fn remove(&self, arg: Option<&str>) -> String {
        let target = match resolve_target(&self.store, arg, "remove").await {
            Ok(target) => target,
            Err(e) => return e.to_string(),
        };
        if !self.store.remove(target.channel_id).await {
            let raw = arg.map(str::trim).unwrap_or_default();
            return ResolutionError::NotWhitelisted(raw.to_string()).to_string();
        }
        info!(channel_id = target.channel_id, "Channel removed");
        self.persist_with(format!(
            "Channel {} removed from the premium whitelist",
            target.label
        ))
        .await
    }

    async fn persist_with(&self, confirmation: String) -> String {
        match self.persister.persist().await {
            Ok(()) => confirmation,
            Err(e) => format!(
                "{}\nWarning: the whitelist could not be saved ({}). The change is active but may be lost on restart.",
                confirmation, e
            ),
        }
    }

    async fn dump_whitelist(&self, chat_id: i64) -> Option<String> {
        match self.persister.file().read_raw() {
            Ok(Some(bytes)) => {
                let document = Document::new(WHITELIST_FILENAME, bytes);
                if let Err(e) = self.bot.send_document(chat_id, document, None).await {
                    error!(error = %e, chat_id, "Failed to send whitelist file");
                }
                None
            }
            Ok(None) => Some(WHITELIST_NOT_FOUND.to_string()),
            Err(e) => {
                error!(error = %e, "Failed to read whitelist file");
                Some(format!("Failed to read the whitelist file: {}", e))
            }
        }
    }

    async fn reply(&self, message: &Message, text: &str) {
        if let Err(e) = self.bot.reply_to(message, text).await {
            error!(error = %e, chat_id = message.chat.id, "Failed to send command reply");
        }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let command = match classify(&message.content) {
            InboundEvent::PlainMessage => return Ok(HandlerResponse::Continue),
            InboundEvent::Empty => return Ok(HandlerResponse::Stop),
            InboundEvent::UnknownCommand(name) => {
                debug!(command = %name, "Unknown command ignored");
                return Ok(HandlerResponse::Stop);
            }
            InboundEvent::Command(command) => command,
        };

        if let Some(denial) = command.denial() {
            if !self.is_admin(message) {
                warn!(
                    command = command.name(),
                    user_id = ?message.sender_id(),
                    "Admin command from non-admin"
                );
                return match denial {
                    Denial::Silent => Ok(HandlerResponse::Stop),
                    Denial::Notice => {
                        self.reply(message, ACCESS_DENIED).await;
                        Ok(HandlerResponse::Reply(ACCESS_DENIED.to_string()))
                    }
                };
            }
        }

        info!(command = command.name(), "step: executing command");
        match self.execute(message, command).await {
            Some(text) => {
                self.reply(message, &text).await;
                Ok(HandlerResponse::Reply(text))
            }
            None => Ok(HandlerResponse::Stop),
        }
    }
}
