//! Outbound transport abstraction.
//!
//! [`Bot`] is transport-agnostic; `cbot_telegram::TelegramBotAdapter` implements it via teloxide.

use crate::error::Result;
use crate::types::Message;
use async_trait::async_trait;

/// A file-like attachment: raw bytes plus the filename shown to the recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// Abstraction for sending messages and documents. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Sends a document attachment with an optional caption.
    async fn send_document(
        &self,
        chat_id: i64,
        document: Document,
        caption: Option<&str>,
    ) -> Result<()>;
}
