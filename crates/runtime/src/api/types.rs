//! Structured records returned by the engine facade.
//!
//! Serializable so the transport layer can ship them as-is; no wire format
//! is mandated beyond that.

use arena_core::{
    AccountId, CombatState, DifficultyTier, OpponentDescriptor, PvpRating, RankTier, Reward,
};

/// A freshly started encounter.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EncounterView {
    pub state: CombatState,
    pub opponent: OpponentDescriptor,
    pub tier: DifficultyTier,
}

/// Result of one submitted action.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TurnReport {
    pub state: CombatState,
    /// Present exactly once, on the victorious turn.
    pub reward: Option<Reward>,
}

/// Result of a flee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FleeReport {
    pub cost_paid: u64,
    pub remaining_gold: u64,
}

/// A duel after a progress update or attack.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProgressReport {
    pub duel: arena_core::DuelChallenge,
    /// True when this very update decided the duel.
    pub resolved: bool,
}

/// Result of a ranked match submission, from the submitter's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchReport {
    pub rating: PvpRating,
    /// Signed change applied to the submitter.
    pub delta: i32,
    pub record: arena_core::MatchRecord,
}

/// Matchmaking candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RatedPlayer {
    pub account: AccountId,
    pub rating: i32,
    pub rank: RankTier,
}

/// One leaderboard row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position after sorting by rating.
    pub position: u32,
    pub account: AccountId,
    pub rating: i32,
    pub peak: i32,
    pub rank: RankTier,
    pub wins: u32,
    pub losses: u32,
}
