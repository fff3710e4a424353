//! Boss descriptors, difficulty tiers, and the opponent catalog oracle.

/// Descriptor of a computer-controlled opponent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpponentDescriptor {
    /// Catalog identifier (e.g., "ironclad_colossus").
    pub id: String,
    pub name: String,
    pub level: u32,
    pub max_hp: u32,
}

impl OpponentDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, level: u32, max_hp: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level,
            max_hp,
        }
    }

    /// Offensive power derived from level and bulk.
    ///
    /// `power = level × 15 + max_hp / 100` keeps stronger and tankier bosses
    /// proportionally harder without a separate stat block.
    pub fn power(&self) -> u32 {
        self.level * 15 + self.max_hp / 100
    }

    /// Hit points after applying a difficulty tier, floored to an integer.
    pub fn scaled_hp(&self, tier: DifficultyTier) -> u32 {
        (f64::from(self.max_hp) * tier.hp_multiplier()) as u32
    }
}

/// Named difficulty multiplier scaling opponent HP and reward output.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DifficultyTier {
    /// Easier encounter: softer boss, halved rewards.
    Casual,
    /// Baseline difficulty.
    Standard,
    /// Harder encounter: bulkier boss, doubled rewards.
    Elite,
}

impl DifficultyTier {
    pub fn hp_multiplier(self) -> f64 {
        match self {
            Self::Casual => 0.7,
            Self::Standard => 1.0,
            Self::Elite => 1.5,
        }
    }

    pub fn reward_multiplier(self) -> f64 {
        match self {
            Self::Casual => 0.5,
            Self::Standard => 1.0,
            Self::Elite => 2.0,
        }
    }
}

impl Default for DifficultyTier {
    fn default() -> Self {
        Self::Standard
    }
}

/// Oracle providing opponent descriptors by catalog id.
///
/// Returns `None` for unknown ids; callers surface that as a not-found
/// condition.
pub trait OpponentOracle: Send + Sync {
    fn descriptor(&self, id: &str) -> Option<OpponentDescriptor>;
}
