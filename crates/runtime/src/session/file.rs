//! File-backed SessionStore implementation.
//!
//! Stands in for an external key-value store: sessions survive process
//! restarts and any process sharing the directory can continue an
//! encounter.

use std::fs;
use std::path::{Path, PathBuf};

use arena_core::AccountId;

use crate::repository::{RepositoryError, Result};

use super::{CombatSession, SessionStore};

/// File-based session store, one bincode file per account.
///
/// Writes go through a temp file and an atomic rename so a crashed write
/// never leaves a torn session behind.
pub struct FileSessionStore {
    base_dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    /// Store rooted at the platform data directory.
    pub fn in_data_dir() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "arena").ok_or_else(|| {
            RepositoryError::Io(std::io::Error::other("no home directory available"))
        })?;
        Self::new(dirs.data_dir().join("sessions"))
    }

    fn session_path(&self, account: AccountId) -> PathBuf {
        self.base_dir.join(format!("session_{}.bin", account.0))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, account: AccountId) -> Result<Option<CombatSession>> {
        let path = self.session_path(account);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let session: CombatSession = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        Ok(Some(session))
    }

    fn store(&self, session: &CombatSession) -> Result<()> {
        let path = self.session_path(session.account);
        let temp_path = path.with_extension("bin.tmp");

        let bytes = bincode::serialize(session)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("saved session for {} to {}", session.account, path.display());
        Ok(())
    }

    fn remove(&self, account: AccountId) -> Result<()> {
        let path = self.session_path(account);
        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("removed session for {}", account);
        }
        Ok(())
    }

    fn contains(&self, account: AccountId) -> bool {
        self.session_path(account).exists()
    }
}
