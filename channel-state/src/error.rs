//! Persistence error types.
//!
//! Returned by [`crate::WhitelistFile`] and [`crate::WhitelistPersister`]. The in-memory store stays
//! authoritative when any of these occur.

use thiserror::Error;

/// Errors that can occur when reading or writing the whitelist artifact.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Whitelist IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Whitelist JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
