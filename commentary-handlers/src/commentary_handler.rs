//! Commentary pipeline for plain posts: generate a comment on the channel's tier, record the post,
//! and reply in the channel.

use std::sync::Arc;

use async_trait::async_trait;
use cbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use channel_state::{ChannelStore, PostRecord, WhitelistPersister};
use chrono::Utc;
use llm_client::CommentGenerator;
use tracing::{error, info, instrument, warn};

use crate::command::{classify, InboundEvent};

/// Posted and recorded when generation fails or times out.
pub const PLACEHOLDER_COMMENT: &str = "(Comment was not generated)";

#[derive(Clone)]
pub struct CommentaryHandler {
    store: ChannelStore,
    persister: WhitelistPersister,
    generator: Arc<dyn CommentGenerator>,
    bot: Arc<dyn Bot>,
}

impl CommentaryHandler {
    pub fn new(
        store: ChannelStore,
        persister: WhitelistPersister,
        generator: Arc<dyn CommentGenerator>,
        bot: Arc<dyn Bot>,
    ) -> Self {
        Self {
            store,
            persister,
            generator,
            bot,
        }
    }
}

#[async_trait]
impl Handler for CommentaryHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if classify(&message.content) != InboundEvent::PlainMessage {
            return Ok(HandlerResponse::Continue);
        }

        let channel_id = message.chat.id;
        let display_name = message.chat.username.as_deref();

        // Held until the reply is sent so one channel's posts are handled in arrival order.
        let _channel_guard = self.store.lock_channel(channel_id).await;

        if self.store.observe(channel_id, display_name).await {
            info!(channel_id, handle = ?message.chat.handle(), "Name index changed");
            if let Err(e) = self.persister.persist().await {
                warn!(error = %e, channel_id, "Name index not persisted");
            }
        }

        let tier = self.store.tier_for(channel_id).await;
        info!(channel_id, tier = %tier, "step: generating comment");
        let comment = match self.generator.generate(&message.content, tier).await {
            Ok(comment) => comment,
            Err(e) => {
                warn!(error = %e, channel_id, tier = %tier, "Using placeholder comment");
                PLACEHOLDER_COMMENT.to_string()
            }
        };

        let usage_count = self
            .store
            .commit_post(PostRecord {
                timestamp: Utc::now(),
                channel_id,
                display_name: display_name.map(str::to_string),
                original_text: message.content.clone(),
                generated_text: comment.clone(),
                tier,
            })
            .await;
        info!(channel_id, usage_count, tier = %tier, "Post recorded");

        if let Err(e) = self.bot.reply_to(message, &comment).await {
            error!(error = %e, channel_id, "Failed to send comment");
        }
        Ok(HandlerResponse::Reply(comment))
    }
}
