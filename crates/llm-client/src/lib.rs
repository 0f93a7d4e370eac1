//! # Comment generation client
//!
//! Defines the [`CommentGenerator`] trait and an OpenAI implementation that picks the model by
//! [`Tier`]. Every call is bounded by a timeout; callers get a [`GenerationError`] they can recover
//! from, never a panic.

use async_trait::async_trait;
use cbot_core::Tier;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

mod config;
mod openai_llm;

pub use config::{GeneratorConfig, DEFAULT_SIGNATURE, DEFAULT_SYSTEM_PROMPT};
pub use openai_llm::OpenAICommentGenerator;

/// Why a comment could not be generated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
    #[error("generation backend error: {0}")]
    Backend(String),
    #[error("generation backend returned an empty comment")]
    EmptyResponse,
}

/// Turns a post into a comment.
#[async_trait]
pub trait CommentGenerator: Send + Sync {
    async fn generate(&self, text: &str, tier: Tier) -> Result<String, GenerationError>;
}

/// Model name per tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierModels {
    pub standard: String,
    pub premium: String,
}

impl TierModels {
    pub fn model_for(&self, tier: Tier) -> &str {
        match tier {
            Tier::Standard => &self.standard,
            Tier::Premium => &self.premium,
        }
    }
}

impl Default for TierModels {
    fn default() -> Self {
        Self {
            standard: "gpt-3.5-turbo".to_string(),
            premium: "gpt-4".to_string(),
        }
    }
}

/// Runs `fut` with an upper bound; elapsed time becomes [`GenerationError::Timeout`].
pub async fn with_timeout<F>(timeout: Duration, fut: F) -> Result<String, GenerationError>
where
    F: Future<Output = Result<String, GenerationError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(GenerationError::Timeout(timeout)),
    }
}
