//! Logs each inbound message in before() and the final response in after(); always continues.

use async_trait::async_trait;
use cbot_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            chat_id = message.chat.id,
            chat_type = %message.chat.chat_type,
            user_id = ?message.sender_id(),
            username = %message
                .sender
                .as_ref()
                .and_then(|u| u.username.as_deref())
                .unwrap_or("unknown"),
            message_content = %message.content,
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = %message.id,
            chat_id = message.chat.id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}
