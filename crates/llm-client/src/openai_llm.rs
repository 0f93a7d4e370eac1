//! OpenAI-backed [`CommentGenerator`]: system prompt (with signature rule) + post text, model chosen by tier.

use async_trait::async_trait;
use cbot_core::Tier;
use openai_client::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, OpenAIClient,
};
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::config::GeneratorConfig;
use crate::{with_timeout, CommentGenerator, GenerationError, TierModels};

#[derive(Clone)]
pub struct OpenAICommentGenerator {
    client: OpenAIClient,
    models: TierModels,
    system_prompt: String,
    timeout: Duration,
}

impl OpenAICommentGenerator {
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            client: OpenAIClient::with_base_url(
                config.openai_api_key.clone(),
                config.openai_base_url.clone(),
            ),
            models: config.models.clone(),
            system_prompt: config.system_prompt(),
            timeout: config.timeout,
        }
    }

    fn build_messages(&self, text: &str) -> Result<Vec<ChatCompletionRequestMessage>, GenerationError> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(self.system_prompt.clone())
            .build()
            .map_err(|e| GenerationError::Backend(e.to_string()))?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(text.to_string())
            .build()
            .map_err(|e| GenerationError::Backend(e.to_string()))?;
        Ok(vec![system.into(), user.into()])
    }
}

#[async_trait]
impl CommentGenerator for OpenAICommentGenerator {
    #[instrument(skip(self, text), fields(tier = %tier, text_len = text.len()))]
    async fn generate(&self, text: &str, tier: Tier) -> Result<String, GenerationError> {
        let model = self.models.model_for(tier);
        let messages = self.build_messages(text)?;

        let result = with_timeout(self.timeout, async {
            self.client
                .chat_completion(model, messages)
                .await
                .map_err(|e| GenerationError::Backend(e.to_string()))
        })
        .await;

        match result {
            Ok(comment) if comment.is_empty() => {
                warn!(model = %model, "Empty comment from backend");
                Err(GenerationError::EmptyResponse)
            }
            Ok(comment) => {
                info!(model = %model, comment_len = comment.len(), "Comment generated");
                Ok(comment)
            }
            Err(e) => {
                warn!(model = %model, error = %e, "Comment generation failed");
                Err(e)
            }
        }
    }
}
