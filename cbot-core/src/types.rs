//! Core types: user, chat, message, generation tier, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sender identity (id, username, names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (channel, group or private) identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    /// Public handle without the leading `@`, when the chat has one.
    pub username: Option<String>,
    pub chat_type: String,
}

impl Chat {
    /// Returns the lower-cased `@handle` form used by the name index.
    pub fn handle(&self) -> Option<String> {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(|u| format!("@{}", u.to_lowercase()))
    }
}

/// A single inbound message. `sender` is `None` for channel posts, which are signed by the channel itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub chat: Chat,
    pub sender: Option<User>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Id of the user who sent the message, if any.
    pub fn sender_id(&self) -> Option<i64> {
        self.sender.as_ref().map(|u| u.id)
    }
}

/// Generation tier. Derived from allow-list membership; never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Standard,
    Premium,
}

impl Tier {
    pub fn from_membership(is_premium: bool) -> Self {
        if is_premium {
            Tier::Premium
        } else {
            Tier::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Standard => "standard",
            Tier::Premium => "premium",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handler result for the chain. `Reply(text)` carries the response body so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Stop the chain and attach reply text.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_handle_is_lowercased_with_at() {
        let chat = Chat {
            id: -100123,
            username: Some("MyChannel".to_string()),
            chat_type: "channel".to_string(),
        };
        assert_eq!(chat.handle().as_deref(), Some("@mychannel"));
    }

    #[test]
    fn test_chat_handle_none_for_missing_or_empty_username() {
        let mut chat = Chat {
            id: 1,
            username: None,
            chat_type: "private".to_string(),
        };
        assert!(chat.handle().is_none());
        chat.username = Some(String::new());
        assert!(chat.handle().is_none());
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Premium).unwrap(), "\"premium\"");
        assert_eq!(Tier::from_membership(false), Tier::Standard);
        assert_eq!(Tier::Standard.to_string(), "standard");
    }
}
