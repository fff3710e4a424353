//! Rating rows, match records, and the prepared match transaction.

use crate::config::EngineConfig;
use crate::ids::{AccountId, MatchId, SeasonId, Timestamp};

use super::elo::rating_delta;
use super::rank::RankTier;

/// One account's ladder row for one season.
///
/// Created lazily at the base rating on first access. Mutated only inside the
/// rating engine's atomic transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PvpRating {
    pub account: AccountId,
    pub season: SeasonId,
    pub rating: i32,
    /// High-water mark; never decreases.
    pub peak: i32,
    pub wins: u32,
    pub losses: u32,
    pub rank: RankTier,
}

impl PvpRating {
    /// Fresh row at the base rating.
    pub fn fresh(account: AccountId, season: SeasonId) -> Self {
        Self {
            account,
            season,
            rating: EngineConfig::BASE_RATING,
            peak: EngineConfig::BASE_RATING,
            wins: 0,
            losses: 0,
            rank: RankTier::from_rating(EngineConfig::BASE_RATING),
        }
    }

    /// Apply a signed delta and the matching counter, clamping at the rating
    /// floor and advancing the peak and rank label.
    pub fn apply(&mut self, delta: i32, won: bool) {
        self.rating = (self.rating + delta).max(EngineConfig::RATING_FLOOR);
        self.peak = self.peak.max(self.rating);
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.rank = RankTier::from_rating(self.rating);
    }
}

/// Result of a ranked match from the submitting side's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchOutcome {
    Win,
    Loss,
}

/// Immutable record of one ranked match, capturing both pre-match ratings
/// and the applied delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchRecord {
    pub id: MatchId,
    pub season: SeasonId,
    pub winner: AccountId,
    pub loser: AccountId,
    pub winner_pre_rating: i32,
    pub loser_pre_rating: i32,
    /// Points transferred: winner gained this much, loser lost it.
    pub delta: i32,
    pub played_at: Timestamp,
}

/// Both updated rows plus the record, computed up front so storage backends
/// can commit the whole unit atomically.
///
/// `expected` carries the pre-match ratings the computation was based on; a
/// backend must refuse to commit if either row has moved since (optimistic
/// concurrency), because the deltas would no longer be the right ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchTransaction {
    pub season: SeasonId,
    pub expected: [(AccountId, i32); 2],
    pub rows: [PvpRating; 2],
    pub winner: AccountId,
    pub loser: AccountId,
    pub winner_pre_rating: i32,
    pub loser_pre_rating: i32,
    pub delta: i32,
    pub played_at: Timestamp,
}

/// Compute a match transaction from both current rows.
///
/// The delta is computed from the winner's perspective and applied
/// symmetrically, so the exchange is zero-sum (up to each side's rating
/// floor clamp).
pub fn prepare_match(
    winner: PvpRating,
    loser: PvpRating,
    played_at: Timestamp,
) -> MatchTransaction {
    debug_assert_eq!(winner.season, loser.season);

    let delta = rating_delta(winner.rating, loser.rating, 1.0);

    let mut winner_row = winner;
    let mut loser_row = loser;
    winner_row.apply(delta, true);
    loser_row.apply(-delta, false);

    MatchTransaction {
        season: winner.season,
        expected: [(winner.account, winner.rating), (loser.account, loser.rating)],
        rows: [winner_row, loser_row],
        winner: winner.account,
        loser: loser.account,
        winner_pre_rating: winner.rating,
        loser_pre_rating: loser.rating,
        delta,
        played_at,
    }
}
