//! Integration tests for component assembly: persisted whitelist restored into the store, chain
//! order, and startup failure on an unreadable whitelist.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cbot_core::{Bot, Chat, Document, HandlerResponse, Message, Result as CbotResult, Tier, User};
use cbot_telegram::TelegramConfig;
use chrono::Utc;
use commentary_bot::{build_components, BotConfig};
use llm_client::{CommentGenerator, GenerationError, GeneratorConfig, TierModels};

const OWNER_ID: i64 = 42;

/// Mock Bot: records reply texts only.
#[derive(Default)]
struct MockBot {
    replies: Mutex<Vec<String>>,
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, _chat_id: i64, _text: &str) -> CbotResult<()> {
        Ok(())
    }

    async fn reply_to(&self, _message: &Message, text: &str) -> CbotResult<()> {
        self.replies.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn send_document(
        &self,
        _chat_id: i64,
        _document: Document,
        _caption: Option<&str>,
    ) -> CbotResult<()> {
        Ok(())
    }
}

/// Replies with the tier it was asked for.
struct TierEcho;

#[async_trait]
impl CommentGenerator for TierEcho {
    async fn generate(&self, _text: &str, tier: Tier) -> Result<String, GenerationError> {
        Ok(format!("{} comment", tier))
    }
}

fn config_in(dir: &Path) -> BotConfig {
    BotConfig {
        telegram: TelegramConfig::with_token("test_token".to_string()),
        generator: GeneratorConfig {
            openai_api_key: "test_key".to_string(),
            openai_base_url: "http://127.0.0.1:1".to_string(),
            models: TierModels::default(),
            system_prompt: None,
            signature: None,
            timeout: Duration::from_secs(1),
        },
        owner_id: OWNER_ID,
        whitelist_path: dir.join("whitelist.json"),
        report_dir: dir.join("reports"),
        log_file: dir.join("bot.log").display().to_string(),
    }
}

fn message(chat_id: i64, sender: Option<i64>, text: &str) -> Message {
    Message {
        id: "1".to_string(),
        chat: Chat {
            id: chat_id,
            username: None,
            chat_type: if sender.is_some() { "private" } else { "channel" }.to_string(),
        },
        sender: sender.map(|id| User {
            id,
            username: None,
            first_name: Some("Owner".to_string()),
            last_name: None,
        }),
        content: text.to_string(),
        created_at: Utc::now(),
    }
}

/// **Test: channels in the persisted whitelist get Premium after a restart; handles still resolve.**
#[tokio::test]
async fn test_restored_whitelist_applies_to_new_posts() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("whitelist.json"),
        r#"{"premium_channels": [-100123], "handles": {"@news": -100123}}"#,
    )
    .unwrap();
    let bot = Arc::new(MockBot::default());

    let components = build_components(&config_in(dir.path()), bot.clone(), Arc::new(TierEcho))
        .await
        .unwrap();

    assert_eq!(components.handler_chain.len(), 3);
    assert_eq!(components.store.resolve_handle("@NEWS").await, Some(-100123));

    let response = components
        .handler_chain
        .handle(&message(-100123, None, "Hello world"))
        .await
        .unwrap();
    assert_eq!(response, HandlerResponse::Reply("premium comment".to_string()));

    components
        .handler_chain
        .handle(&message(-100456, None, "Other channel"))
        .await
        .unwrap();
    assert_eq!(
        bot.replies.lock().unwrap().clone(),
        vec!["premium comment".to_string(), "standard comment".to_string()]
    );
}

/// **Test: the configured owner can run admin commands; others cannot.**
#[tokio::test]
async fn test_owner_id_gates_admin_commands() {
    let dir = tempfile::tempdir().unwrap();
    let components = build_components(
        &config_in(dir.path()),
        Arc::new(MockBot::default()),
        Arc::new(TierEcho),
    )
    .await
    .unwrap();

    components
        .handler_chain
        .handle(&message(7, Some(7), "/allow -100123"))
        .await
        .unwrap();
    assert!(!components.store.is_premium(-100123).await);

    components
        .handler_chain
        .handle(&message(OWNER_ID, Some(OWNER_ID), "/allow -100123"))
        .await
        .unwrap();
    assert!(components.store.is_premium(-100123).await);
    assert!(dir.path().join("whitelist.json").exists());
}

/// **Test: a corrupt whitelist file aborts assembly instead of being overwritten later.**
#[tokio::test]
async fn test_corrupt_whitelist_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("whitelist.json"), b"not json").unwrap();

    let result = build_components(
        &config_in(dir.path()),
        Arc::new(MockBot::default()),
        Arc::new(TierEcho),
    )
    .await;

    assert!(result.is_err());
}
