//! Channel state crate: the single owned state object behind the commentary bot.
//!
//! ## Modules
//!
//! - [`error`] – Persistence error types
//! - [`models`] – ChannelState, ChannelStats, PostRecord, WhitelistSnapshot
//! - [`name_index`] – `@handle` ↔ channel id mapping
//! - [`store`] – ChannelStore (usage counters, allow-list, name index, post log)
//! - [`whitelist`] – WhitelistFile (JSON artifact on disk)
//! - [`persister`] – WhitelistPersister (ordered saves of the store's whitelist snapshot)

mod error;
mod models;
mod name_index;
mod persister;
mod store;
mod whitelist;

pub use error::PersistenceError;
pub use models::{ChannelState, ChannelStats, PostRecord, WhitelistSnapshot};
pub use name_index::{normalize_handle, NameIndex};
pub use persister::WhitelistPersister;
pub use store::ChannelStore;
pub use whitelist::WhitelistFile;
