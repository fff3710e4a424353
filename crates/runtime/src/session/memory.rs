//! In-process SessionStore implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use arena_core::AccountId;

use crate::repository::{RepositoryError, Result};

use super::{CombatSession, SessionStore};

/// In-memory session store, keyed by account.
///
/// Not durable across process restart; a crashed process simply loses its
/// live encounters and players start fresh ones.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<AccountId, CombatSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, account: AccountId) -> Result<Option<CombatSession>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(sessions.get(&account).cloned())
    }

    fn store(&self, session: &CombatSession) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        sessions.insert(session.account, session.clone());
        Ok(())
    }

    fn remove(&self, account: AccountId) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        sessions.remove(&account);
        Ok(())
    }

    fn contains(&self, account: AccountId) -> bool {
        self.sessions
            .read()
            .map(|sessions| sessions.contains_key(&account))
            .unwrap_or(false)
    }
}
