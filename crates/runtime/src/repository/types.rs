//! Durable record types owned by the runtime.

use arena_core::{AccountId, Reward};

/// Engine-side wallet for one account.
///
/// Reward grants and flee costs settle here; everything else about an
/// account (profile, workout history) lives outside this engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerAccount {
    pub id: AccountId,
    pub gold: u64,
    pub crystals: u64,
    pub experience: u64,
}

impl PlayerAccount {
    /// Gold a freshly seen account starts with.
    pub const STARTING_GOLD: u64 = 100;

    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            gold: Self::STARTING_GOLD,
            crystals: 0,
            experience: 0,
        }
    }

    /// Credit a reward in full.
    pub fn credit(&mut self, reward: &Reward) {
        self.experience += reward.experience;
        self.gold += reward.gold;
        self.crystals += reward.crystals;
    }
}
