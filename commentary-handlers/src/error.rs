use cbot_core::CbotError;
use thiserror::Error;

/// An admin command argument that does not name a usable channel. Rendered as the reply text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Specify a username or chat_id: /{command} @channel_username or /{command} 123456")]
    MissingArgument { command: &'static str },

    #[error("Channel {0} not found. Ensure the bot has observed it (added and active in that channel).")]
    UnknownHandle(String),

    #[error("Error: invalid channel ID")]
    InvalidId(String),

    #[error("Channel {0} is not in the whitelist")]
    NotWhitelisted(String),
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Report write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report delivery failed: {0}")]
    Transport(#[from] CbotError),
}
