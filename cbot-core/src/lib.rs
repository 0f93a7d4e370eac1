//! # cbot-core
//!
//! Core types and traits for the channel commentary bot: [`Bot`], [`Handler`], message, chat and
//! user types, the generation [`Tier`], error types, and tracing initialization.
//! Transport-agnostic; used by cbot-telegram, handler-chain and the handler crates.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Bot, Document};
pub use error::{CbotError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Handler, HandlerResponse, Message, Tier, ToCoreMessage, ToCoreUser, User};
