use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ballot_store::{LedgerState, StateStore, StoreError, StoreLock};
use tracing::{debug, warn};

/// A [`StateStore`] backed by a single JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    /// Advisory lock file next to the data file. The data file itself is
    /// replaced by rename on every save, so it cannot carry the lock.
    pub fn lock_path(&self) -> PathBuf {
        self.sibling(".lock")
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn ensure_parent_dir(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::Io(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        Ok(())
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<LedgerState>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no state file yet");
                return Ok(None);
            }
            Err(e) => {
                return Err(StoreError::Io(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };

        let state: LedgerState = serde_json::from_str(&contents).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "state file is unreadable");
            StoreError::Corruption(format!("{}: {e}", self.path.display()))
        })?;

        debug!(
            path = %self.path.display(),
            users = state.users.len(),
            elections = state.elections.len(),
            blocks = state.ledger.len(),
            "loaded state"
        );
        Ok(Some(state))
    }

    fn save(&self, state: &LedgerState) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        self.ensure_parent_dir()?;

        // Write to a temporary file first, then atomically rename.
        let tmp = self.temp_path();
        let write = || -> io::Result<()> {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        };
        write().map_err(|e| {
            let _ = fs::remove_file(&tmp);
            StoreError::Io(format!("failed to write {}: {e}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), bytes = json.len(), "saved state");
        Ok(())
    }

    /// Exclusive advisory lock on [`JsonFileStore::lock_path`], shared by
    /// every store and process that opens the same data file.
    fn lock(&self) -> Result<StoreLock, StoreError> {
        self.ensure_parent_dir()?;
        let lock_path = self.lock_path();
        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| {
                StoreError::Io(format!("failed to open {}: {e}", lock_path.display()))
            })?;
        file.lock().map_err(|e| {
            StoreError::Io(format!("failed to lock {}: {e}", lock_path.display()))
        })?;
        debug!(path = %lock_path.display(), "holding state lock");
        Ok(StoreLock::holding(file))
    }
}
