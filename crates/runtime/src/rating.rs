//! Transactional rating updates, matchmaking, and the leaderboard
//! projection.

use std::sync::Arc;

use arena_core::{
    AccountId, EngineConfig, MatchOutcome, PvpRating, prepare_match,
};

use crate::api::errors::{EngineError, Result};
use crate::api::types::{LeaderboardEntry, MatchReport, RatedPlayer};
use crate::clock::unix_now;
use crate::repository::{RatingRepository, RepositoryError, SeasonRepository};

/// Attempts before a persistently contended submission surfaces as a
/// conflict.
const COMMIT_ATTEMPTS: u32 = 3;

pub struct RatingEngine {
    ratings: Arc<dyn RatingRepository>,
    seasons: Arc<dyn SeasonRepository>,
    config: EngineConfig,
}

impl RatingEngine {
    pub fn new(
        ratings: Arc<dyn RatingRepository>,
        seasons: Arc<dyn SeasonRepository>,
        config: EngineConfig,
    ) -> Self {
        Self {
            ratings,
            seasons,
            config,
        }
    }

    /// Submit a ranked result for the submitting account.
    ///
    /// Loads both rows (created at the base rating if absent), computes the
    /// full transaction, and commits it as one atomic unit. A concurrent
    /// submission touching either row invalidates the optimistic snapshot;
    /// the engine re-reads and retries a bounded number of times.
    pub fn submit_result(
        &self,
        account: AccountId,
        opponent: AccountId,
        outcome: MatchOutcome,
    ) -> Result<MatchReport> {
        if account == opponent {
            return Err(EngineError::SelfChallenge { account });
        }
        let now = unix_now();
        let season = self.seasons.get_or_create_active_season(now)?;

        let mut last_conflict: Option<RepositoryError> = None;
        for _ in 0..COMMIT_ATTEMPTS {
            let own = self.ratings.get_or_create_rating(season.id, account)?;
            let theirs = self.ratings.get_or_create_rating(season.id, opponent)?;
            let (winner, loser) = match outcome {
                MatchOutcome::Win => (own, theirs),
                MatchOutcome::Loss => (theirs, own),
            };

            let txn = prepare_match(winner, loser, now);
            match self.ratings.commit_match(&txn) {
                Ok(record) => {
                    let own_row = txn
                        .rows
                        .into_iter()
                        .find(|row| row.account == account)
                        .expect("submitter is one of the transaction rows");
                    let delta = match outcome {
                        MatchOutcome::Win => txn.delta,
                        MatchOutcome::Loss => -txn.delta,
                    };
                    tracing::info!(
                        "{} {} vs {}: rating {} ({:+})",
                        account,
                        outcome,
                        opponent,
                        own_row.rating,
                        delta
                    );
                    return Ok(MatchReport {
                        rating: own_row,
                        delta,
                        record,
                    });
                }
                Err(RepositoryError::RatingConflict) => {
                    tracing::debug!("rating commit contended, retrying");
                    last_conflict = Some(RepositoryError::RatingConflict);
                }
                Err(other) => return Err(other.into()),
            }
        }
        Err(last_conflict
            .map(EngineError::from)
            .unwrap_or(EngineError::RatingConflict))
    }

    /// Offer an opponent: the closest-rated candidate within the rating
    /// window, falling back to the single highest-rated account in the
    /// season. `None` only when nobody else is rated yet.
    pub fn find_opponent(&self, account: AccountId) -> Result<Option<RatedPlayer>> {
        let season = self.seasons.get_or_create_active_season(unix_now())?;
        let own = self.ratings.get_or_create_rating(season.id, account)?;

        let mut others: Vec<PvpRating> = self
            .ratings
            .season_ratings(season.id)?
            .into_iter()
            .filter(|row| row.account != account)
            .collect();
        if others.is_empty() {
            return Ok(None);
        }

        let window = self.config.matchmaking_window;
        let candidate = others
            .iter()
            .filter(|row| (row.rating - own.rating).abs() <= window)
            .min_by_key(|row| ((row.rating - own.rating).abs(), row.account))
            .copied();

        let chosen = match candidate {
            Some(row) => row,
            None => {
                others.sort_by_key(|row| (std::cmp::Reverse(row.rating), row.account));
                others[0]
            }
        };
        Ok(Some(RatedPlayer {
            account: chosen.account,
            rating: chosen.rating,
            rank: chosen.rank,
        }))
    }

    /// Season standings, best rating first. Recomputed on every read.
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let season = self.seasons.get_or_create_active_season(unix_now())?;
        let mut rows = self.ratings.season_ratings(season.id)?;
        rows.sort_by_key(|row| (std::cmp::Reverse(row.rating), row.account));
        Ok(rows
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(index, row)| LeaderboardEntry {
                position: index as u32 + 1,
                account: row.account,
                rating: row.rating,
                peak: row.peak,
                rank: row.rank,
                wins: row.wins,
                losses: row.losses,
            })
            .collect())
    }
}
