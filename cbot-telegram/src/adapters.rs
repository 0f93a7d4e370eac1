//! Adapters from Telegram (teloxide) types to cbot_core types.

use cbot_core::{Chat, Message, ToCoreMessage, ToCoreUser, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message (regular message or channel post) for conversion to core [`Message`].
///
/// Channel posts carry no `from`; the resulting message has `sender: None`. Media captions are used
/// as content when there is no text.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let msg = self.0;
        Message {
            id: msg.id.to_string(),
            chat: Chat {
                id: msg.chat.id.0,
                username: msg.chat.username().map(str::to_string),
                chat_type: chat_type(&msg.chat).to_string(),
            },
            sender: msg.from.as_ref().map(|u| TelegramUserWrapper(u).to_core()),
            content: msg.text().or_else(|| msg.caption()).unwrap_or("").to_string(),
            created_at: msg.date,
        }
    }
}

fn chat_type(chat: &teloxide::types::Chat) -> &'static str {
    if chat.is_channel() {
        "channel"
    } else if chat.is_supergroup() {
        "supergroup"
    } else if chat.is_group() {
        "group"
    } else {
        "private"
    }
}
