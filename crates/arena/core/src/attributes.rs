//! Player combat attributes and the oracle that supplies them.
//!
//! Attributes are derived elsewhere (from workout history and unlocked
//! progression); this engine only consumes them. The [`AttributeOracle`]
//! trait is the seam where the surrounding application plugs that derivation
//! in.

use crate::config::EngineConfig;
use crate::ids::AccountId;

/// Combat scalars describing a player at the moment an encounter begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatAttributes {
    pub offense: u32,
    pub defense: u32,
    pub vitality: u32,
    pub level: u32,
}

impl CombatAttributes {
    pub fn new(offense: u32, defense: u32, vitality: u32, level: u32) -> Self {
        Self {
            offense,
            defense,
            vitality,
            level,
        }
    }

    /// Maximum hit points seeded from vitality plus a level bonus.
    pub fn max_hp(&self) -> u32 {
        self.vitality * EngineConfig::HP_PER_VITALITY + self.level * EngineConfig::HP_PER_LEVEL
    }
}

/// Oracle providing combat attributes per account.
///
/// Returns `None` when the account has no derived attributes; callers surface
/// that as a not-found condition without touching any state.
pub trait AttributeOracle: Send + Sync {
    fn attributes(&self, account: AccountId) -> Option<CombatAttributes>;
}
