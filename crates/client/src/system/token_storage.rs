use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

use contracts::system::auth::UserInfo;

/// What survives a restart: the token and the user it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

#[derive(Debug, Error)]
pub enum TokenStorageError {
    #[error("token storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("token storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Persistent slot for the session token. Read on startup, written on
/// login, cleared on logout.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Result<Option<StoredSession>, TokenStorageError>;
    fn save(&self, session: &StoredSession) -> Result<(), TokenStorageError>;
    fn clear(&self) -> Result<(), TokenStorageError>;
}

/// JSON file, e.g. `~/.config/price-dashboard/session.json`
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<Option<StoredSession>, TokenStorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, session: &StoredSession) -> Result<(), TokenStorageError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Nothing outlives the process
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    slot: Mutex<Option<StoredSession>>,
}

impl MemoryTokenStorage {
    pub fn with_session(session: StoredSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<Option<StoredSession>, TokenStorageError> {
        Ok(self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, session: &StoredSession) -> Result<(), TokenStorageError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStorageError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
