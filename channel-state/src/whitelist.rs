//! Whitelist artifact on disk.
//!
//! A single pretty-printed JSON object (`premium_channels` array + `handles` map). Writes go to a
//! temp file in the target directory which is then renamed over the target, so readers see either
//! the previous or the new version, never a partial one.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::PersistenceError;
use crate::models::WhitelistSnapshot;

#[derive(Debug, Clone)]
pub struct WhitelistFile {
    path: PathBuf,
}

impl WhitelistFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whitelist. A missing file yields an empty snapshot.
    pub fn load(&self) -> Result<WhitelistSnapshot, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "Whitelist file not found, starting empty");
                return Ok(WhitelistSnapshot::default());
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot: WhitelistSnapshot = serde_json::from_slice(&bytes)?;
        info!(
            path = %self.path.display(),
            premium_channels = snapshot.premium_channels.len(),
            handles = snapshot.handles.len(),
            "Loaded whitelist"
        );
        Ok(snapshot)
    }

    /// Atomically replaces the whitelist file with `snapshot`.
    pub fn save(&self, snapshot: &WhitelistSnapshot) -> Result<(), PersistenceError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, snapshot)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), "Whitelist saved");
        Ok(())
    }

    /// Raw file bytes for verbatim export. `None` when the file does not exist.
    pub fn read_raw(&self) -> Result<Option<Vec<u8>>, PersistenceError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
