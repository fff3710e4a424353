//! Live combat session storage.
//!
//! At most one live encounter exists per player. The [`SessionStore`] trait
//! is the locality seam: [`InMemorySessionStore`] keeps sessions in the
//! process (the pragmatic default, requires sticky routing at scale) while
//! [`FileSessionStore`] externalizes them to a shared key-value location so
//! any process can pick an encounter up.

pub mod file;
pub mod memory;

use arena_core::{AccountId, CombatAttributes, CombatState, DifficultyTier, OpponentDescriptor, Timestamp};

use crate::repository::Result;

pub use file::FileSessionStore;
pub use memory::InMemorySessionStore;

/// Everything the resolver needs to advance one player's encounter.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CombatSession {
    pub account: AccountId,
    pub opponent: OpponentDescriptor,
    pub tier: DifficultyTier,
    /// Attributes snapshotted at the start of the encounter.
    pub attributes: CombatAttributes,
    pub state: CombatState,
    pub started_at: Timestamp,
}

/// Keyed storage of live encounters, one per account.
///
/// Implementations only store and fetch; serialization of turns for a single
/// account is the encounter manager's job.
pub trait SessionStore: Send + Sync {
    fn load(&self, account: AccountId) -> Result<Option<CombatSession>>;

    /// Insert or replace the account's session.
    fn store(&self, session: &CombatSession) -> Result<()>;

    fn remove(&self, account: AccountId) -> Result<()>;

    fn contains(&self, account: AccountId) -> bool;
}
