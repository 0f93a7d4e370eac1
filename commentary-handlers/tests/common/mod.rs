//! Shared fixtures: recording MockBot, scripted generators, message builders, and a wired chain.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cbot_core::{Bot, CbotError, Chat, Document, Message, Result as CbotResult, Tier, User};
use channel_state::{ChannelStore, WhitelistFile, WhitelistPersister};
use chrono::Utc;
use commentary_handlers::{CommandHandler, CommentaryHandler, LoggingHandler, ReportExporter};
use handler_chain::HandlerChain;
use llm_client::{CommentGenerator, GenerationError};
use tempfile::TempDir;
use tokio::sync::Notify;

pub const ADMIN_ID: i64 = 42;

static NEXT_MESSAGE_ID: AtomicU64 = AtomicU64::new(1);

fn next_message_id() -> String {
    NEXT_MESSAGE_ID.fetch_add(1, Ordering::SeqCst).to_string()
}

/// One outbound call seen by [`MockBot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Message {
        chat_id: i64,
        text: String,
    },
    Reply {
        chat_id: i64,
        message_id: String,
        text: String,
    },
    Document {
        chat_id: i64,
        filename: String,
        bytes: Vec<u8>,
        caption: Option<String>,
    },
}

/// Mock Bot: records every send, optionally failing all of them.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<Sent>>,
    fail: AtomicBool,
}

impl MockBot {
    pub fn failing() -> Self {
        let bot = Self::default();
        bot.fail.store(true, Ordering::SeqCst);
        bot
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Texts of all replies, in order.
    pub fn replies(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Reply { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    fn record(&self, sent: Sent) -> CbotResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CbotError::Transport("mock transport down".to_string()));
        }
        self.sent.lock().unwrap().push(sent);
        Ok(())
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat_id: i64, text: &str) -> CbotResult<()> {
        self.record(Sent::Message {
            chat_id,
            text: text.to_string(),
        })
    }

    async fn reply_to(&self, message: &Message, text: &str) -> CbotResult<()> {
        self.record(Sent::Reply {
            chat_id: message.chat.id,
            message_id: message.id.clone(),
            text: text.to_string(),
        })
    }

    async fn send_document(
        &self,
        chat_id: i64,
        document: Document,
        caption: Option<&str>,
    ) -> CbotResult<()> {
        self.record(Sent::Document {
            chat_id,
            filename: document.filename,
            bytes: document.bytes,
            caption: caption.map(str::to_string),
        })
    }
}

/// Generator returning a fixed result and recording (text, tier) per call.
pub struct MockGenerator {
    result: std::result::Result<String, GenerationError>,
    calls: Mutex<Vec<(String, Tier)>>,
}

impl MockGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GenerationError) -> Self {
        Self {
            result: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Tier)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommentGenerator for MockGenerator {
    async fn generate(&self, text: &str, tier: Tier) -> std::result::Result<String, GenerationError> {
        self.calls.lock().unwrap().push((text.to_string(), tier));
        self.result.clone()
    }
}

/// Echoes the post back as `re: <text>`. Posts containing "slow" take 150ms; posts containing
/// "gate" wait until [`GatedGenerator::open`] is called.
#[derive(Default)]
pub struct GatedGenerator {
    gate: Notify,
}

impl GatedGenerator {
    pub fn open(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl CommentGenerator for GatedGenerator {
    async fn generate(&self, text: &str, _tier: Tier) -> std::result::Result<String, GenerationError> {
        if text.contains("gate") {
            self.gate.notified().await;
        } else if text.contains("slow") {
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        Ok(format!("re: {}", text))
    }
}

/// Channel post: no sender, channel chat with an optional public username.
pub fn channel_post(chat_id: i64, username: Option<&str>, text: &str) -> Message {
    Message {
        id: next_message_id(),
        chat: Chat {
            id: chat_id,
            username: username.map(str::to_string),
            chat_type: "channel".to_string(),
        },
        sender: None,
        content: text.to_string(),
        created_at: Utc::now(),
    }
}

/// Private message from `user_id` to the bot.
pub fn private_message(user_id: i64, text: &str) -> Message {
    Message {
        id: next_message_id(),
        chat: Chat {
            id: user_id,
            username: None,
            chat_type: "private".to_string(),
        },
        sender: Some(User {
            id: user_id,
            username: Some("someone".to_string()),
            first_name: Some("Some".to_string()),
            last_name: None,
        }),
        content: text.to_string(),
        created_at: Utc::now(),
    }
}

/// A fully wired chain over a temp directory.
pub struct Fixture {
    pub dir: TempDir,
    pub store: ChannelStore,
    pub persister: WhitelistPersister,
    pub bot: Arc<MockBot>,
    pub chain: HandlerChain,
}

impl Fixture {
    pub fn new(generator: Arc<dyn CommentGenerator>) -> Self {
        Self::build(generator, Arc::new(MockBot::default()), None)
    }

    pub fn with_bot(generator: Arc<dyn CommentGenerator>, bot: Arc<MockBot>) -> Self {
        Self::build(generator, bot, None)
    }

    /// Whitelist saved to `whitelist_path` instead of `<dir>/whitelist.json`.
    pub fn with_whitelist_path(generator: Arc<dyn CommentGenerator>, whitelist_path: PathBuf) -> Self {
        Self::build(generator, Arc::new(MockBot::default()), Some(whitelist_path))
    }

    fn build(
        generator: Arc<dyn CommentGenerator>,
        bot: Arc<MockBot>,
        whitelist_path: Option<PathBuf>,
    ) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let whitelist_path = whitelist_path.unwrap_or_else(|| dir.path().join("whitelist.json"));
        let store = ChannelStore::new();
        let persister = WhitelistPersister::new(store.clone(), WhitelistFile::new(&whitelist_path));
        let core_bot: Arc<dyn Bot> = bot.clone();
        let exporter = ReportExporter::new(store.clone(), dir.path().join("reports"), core_bot.clone());

        let chain = HandlerChain::new()
            .add_handler(Arc::new(LoggingHandler))
            .add_handler(Arc::new(CommandHandler::new(
                ADMIN_ID,
                store.clone(),
                persister.clone(),
                exporter,
                core_bot.clone(),
            )))
            .add_handler(Arc::new(CommentaryHandler::new(
                store.clone(),
                persister.clone(),
                generator,
                core_bot,
            )));

        Self {
            dir,
            store,
            persister,
            bot,
            chain,
        }
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.dir.path().join("reports")
    }

    pub fn whitelist_path(&self) -> &Path {
        self.persister.file().path()
    }
}
