//! Deterministic rules of the combat and competitive ranking engine.
//!
//! `arena-core` defines the canonical domain logic: turn-based combat
//! resolution, duel records and their win conditions, ELO-style rating math,
//! rank labels, and reward calculation. Everything here is a pure function of
//! its inputs — clocks arrive as [`Timestamp`] values and randomness as
//! explicit [`combat::Rolls`] — so the runtime and offline tools can share
//! one rulebook and test it exhaustively.
pub mod attributes;
pub mod combat;
pub mod config;
pub mod duel;
pub mod ids;
pub mod opponent;
pub mod rating;
pub mod reward;
pub mod season;

pub use attributes::{AttributeOracle, CombatAttributes};
pub use combat::{CombatAction, CombatError, CombatPhase, CombatState, ResourceMeter, Rolls};
pub use config::EngineConfig;
pub use duel::{
    ActivityKind, DuelChallenge, DuelError, DuelProgress, DuelResolution, DuelSide, DuelStatus,
    DuelVariant, FinishSnapshot, ProgressDelta,
};
pub use ids::{AccountId, DuelId, MatchId, SeasonId, Timestamp};
pub use opponent::{DifficultyTier, OpponentDescriptor, OpponentOracle};
pub use rating::{
    MatchOutcome, MatchRecord, MatchTransaction, PvpRating, RankTier, expected_score, k_factor,
    prepare_match, rating_delta,
};
pub use reward::{Reward, duel_reward, pve_victory_reward};
pub use season::PvpSeason;
