use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info, instrument};

use crate::error::PersistenceError;
use crate::store::ChannelStore;
use crate::whitelist::WhitelistFile;

/// Writes the store's whitelist snapshot to disk, one save at a time.
///
/// The snapshot is taken after acquiring the write lock, so concurrent mutations are never written
/// out of order: whichever save runs last writes the newest state.
#[derive(Debug, Clone)]
pub struct WhitelistPersister {
    store: ChannelStore,
    file: Arc<WhitelistFile>,
    write_lock: Arc<Mutex<()>>,
}

impl WhitelistPersister {
    pub fn new(store: ChannelStore, file: WhitelistFile) -> Self {
        Self {
            store,
            file: Arc::new(file),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn file(&self) -> &WhitelistFile {
        &self.file
    }

    #[instrument(skip(self), fields(path = %self.file.path().display()))]
    pub async fn persist(&self) -> Result<(), PersistenceError> {
        let _guard = self.write_lock.lock().await;
        let snapshot = self.store.whitelist_snapshot().await;
        match self.file.save(&snapshot) {
            Ok(()) => {
                info!(
                    premium_channels = snapshot.premium_channels.len(),
                    handles = snapshot.handles.len(),
                    "Whitelist persisted"
                );
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to persist whitelist");
                Err(e)
            }
        }
    }
}
