//! Wraps teloxide::Bot and implements [`cbot_core::Bot`]. Production code sends via Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use cbot_core::{Bot as CoreBot, CbotError, Document, Message, Result};
use teloxide::payloads::{SendDocumentSetters, SendMessageSetters};
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, MessageId, ReplyParameters};
use tracing::debug;

/// Thin wrapper around teloxide::Bot that implements cbot-core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

fn transport_error(e: teloxide::RequestError) -> CbotError {
    CbotError::Transport(e.to_string())
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text.to_string())
            .await
            .map_err(transport_error)?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        let Ok(id) = message.id.parse::<i32>() else {
            debug!(message_id = %message.id, "Non-numeric message id, sending without reply reference");
            return self.send_message(message.chat.id, text).await;
        };
        self.bot
            .send_message(ChatId(message.chat.id), text.to_string())
            .reply_parameters(ReplyParameters::new(MessageId(id)))
            .await
            .map_err(transport_error)?;
        Ok(())
    }

    async fn send_document(
        &self,
        chat_id: i64,
        document: Document,
        caption: Option<&str>,
    ) -> Result<()> {
        let file = InputFile::memory(document.bytes).file_name(document.filename);
        let mut request = self.bot.send_document(ChatId(chat_id), file);
        if let Some(caption) = caption {
            request = request.caption(caption.to_string());
        }
        request.await.map_err(transport_error)?;
        Ok(())
    }
}
