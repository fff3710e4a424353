//! In-memory repository implementation for tests and local runs.
//!
//! All tables live behind one `RwLock`, which is what makes the multi-record
//! operations (duel resolution with reward grants, the rating commit)
//! genuinely atomic: a writer holds the whole store or none of it. A
//! production deployment backs the same traits with a database transaction.

use std::collections::HashMap;
use std::sync::RwLock;

use arena_core::{
    AccountId, DuelChallenge, DuelId, DuelSide, DuelStatus, MatchId, MatchRecord,
    MatchTransaction, ProgressDelta, PvpRating, PvpSeason, Reward, SeasonId, Timestamp,
};

use super::error::{RepositoryError, Result};
use super::traits::{AccountRepository, DuelRepository, RatingRepository, SeasonRepository};
use super::types::PlayerAccount;

#[derive(Default)]
struct Tables {
    accounts: HashMap<AccountId, PlayerAccount>,
    duels: HashMap<DuelId, DuelChallenge>,
    next_duel: u64,
    ratings: HashMap<(SeasonId, AccountId), PvpRating>,
    matches: Vec<MatchRecord>,
    seasons: Vec<PvpSeason>,
}

impl Tables {
    fn account_entry(&mut self, account: AccountId) -> &mut PlayerAccount {
        self.accounts
            .entry(account)
            .or_insert_with(|| PlayerAccount::new(account))
    }

    fn duel_mut(&mut self, id: DuelId) -> Result<&mut DuelChallenge> {
        self.duels.get_mut(&id).ok_or(RepositoryError::UnknownDuel(id))
    }

    fn active_duel_mut(&mut self, id: DuelId) -> Result<&mut DuelChallenge> {
        let duel = self.duel_mut(id)?;
        if duel.status != DuelStatus::Active {
            return Err(RepositoryError::InvalidTransition {
                duel: id,
                expected: DuelStatus::Active,
                actual: duel.status,
            });
        }
        Ok(duel)
    }
}

/// In-memory implementation of every repository contract.
pub struct InMemoryArena {
    tables: RwLock<Tables>,
}

impl InMemoryArena {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| RepositoryError::LockPoisoned)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)
    }
}

impl Default for InMemoryArena {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountRepository for InMemoryArena {
    fn get_or_create_account(&self, account: AccountId) -> Result<PlayerAccount> {
        Ok(*self.write()?.account_entry(account))
    }

    fn grant(&self, account: AccountId, reward: &Reward) -> Result<PlayerAccount> {
        let mut tables = self.write()?;
        let wallet = tables.account_entry(account);
        wallet.credit(reward);
        Ok(*wallet)
    }

    fn spend_gold(&self, account: AccountId, cost: u64) -> Result<PlayerAccount> {
        let mut tables = self.write()?;
        let wallet = tables.account_entry(account);
        if wallet.gold < cost {
            return Err(RepositoryError::InsufficientGold {
                needed: cost,
                available: wallet.gold,
            });
        }
        wallet.gold -= cost;
        Ok(*wallet)
    }
}

impl DuelRepository for InMemoryArena {
    fn insert_challenge(&self, mut challenge: DuelChallenge) -> Result<DuelChallenge> {
        let mut tables = self.write()?;
        if tables
            .duels
            .values()
            .any(|existing| existing.blocks_pair(challenge.challenger, challenge.defender))
        {
            return Err(RepositoryError::DuplicateChallenge {
                challenger: challenge.challenger,
                defender: challenge.defender,
            });
        }
        tables.next_duel += 1;
        challenge.id = DuelId(tables.next_duel);
        tables.duels.insert(challenge.id, challenge.clone());
        tracing::debug!("stored challenge {} ({})", challenge.id, challenge.variant);
        Ok(challenge)
    }

    fn duel(&self, id: DuelId) -> Result<Option<DuelChallenge>> {
        Ok(self.read()?.duels.get(&id).cloned())
    }

    fn activate_duel(
        &self,
        id: DuelId,
        accepted_at: Timestamp,
        ends_at: Timestamp,
        titan_hp: Option<(u32, u32)>,
    ) -> Result<DuelChallenge> {
        let mut tables = self.write()?;
        let duel = tables.duel_mut(id)?;
        if duel.status != DuelStatus::Pending {
            return Err(RepositoryError::InvalidTransition {
                duel: id,
                expected: DuelStatus::Pending,
                actual: duel.status,
            });
        }
        duel.status = DuelStatus::Active;
        duel.accepted_at = Some(accepted_at);
        duel.ends_at = Some(ends_at);
        if let Some((challenger_hp, defender_hp)) = titan_hp {
            duel.challenger_progress.titan_hp = challenger_hp;
            duel.defender_progress.titan_hp = defender_hp;
        }
        Ok(duel.clone())
    }

    fn decline_duel(&self, id: DuelId) -> Result<DuelChallenge> {
        let mut tables = self.write()?;
        let duel = tables.duel_mut(id)?;
        if duel.status != DuelStatus::Pending {
            return Err(RepositoryError::InvalidTransition {
                duel: id,
                expected: DuelStatus::Pending,
                actual: duel.status,
            });
        }
        duel.status = DuelStatus::Declined;
        Ok(duel.clone())
    }

    fn apply_progress(
        &self,
        id: DuelId,
        side: DuelSide,
        delta: ProgressDelta,
        now: Timestamp,
    ) -> Result<DuelChallenge> {
        let mut tables = self.write()?;
        let duel = tables.active_duel_mut(id)?;
        duel.apply_progress(side, delta, now);
        Ok(duel.clone())
    }

    fn apply_attack(&self, id: DuelId, side: DuelSide, damage: u32) -> Result<DuelChallenge> {
        let mut tables = self.write()?;
        let duel = tables.active_duel_mut(id)?;
        duel.apply_attack(side, damage);
        Ok(duel.clone())
    }

    fn resolve_duel(
        &self,
        id: DuelId,
        winner: AccountId,
        completed_at: Timestamp,
        rewards: [(AccountId, Reward); 2],
    ) -> Result<Option<DuelChallenge>> {
        let mut tables = self.write()?;
        {
            let duel = tables.duel_mut(id)?;
            if duel.status != DuelStatus::Active {
                // Lost the race against a concurrent resolution.
                return Ok(None);
            }
            duel.status = DuelStatus::Completed;
            duel.winner = Some(winner);
            duel.completed_at = Some(completed_at);
        }
        for (account, reward) in &rewards {
            tables.account_entry(*account).credit(reward);
        }
        tracing::info!("duel {} resolved, winner {}", id, winner);
        Ok(tables.duels.get(&id).cloned())
    }

    fn open_between(&self, a: AccountId, b: AccountId) -> Result<Option<DuelChallenge>> {
        Ok(self
            .read()?
            .duels
            .values()
            .find(|duel| duel.blocks_pair(a, b))
            .cloned())
    }

    fn duels_for(&self, account: AccountId) -> Result<Vec<DuelChallenge>> {
        let tables = self.read()?;
        let mut duels: Vec<DuelChallenge> = tables
            .duels
            .values()
            .filter(|duel| duel.side_of(account).is_some())
            .cloned()
            .collect();
        duels.sort_by_key(|duel| duel.id);
        Ok(duels)
    }
}

impl RatingRepository for InMemoryArena {
    fn get_or_create_rating(&self, season: SeasonId, account: AccountId) -> Result<PvpRating> {
        let mut tables = self.write()?;
        Ok(*tables
            .ratings
            .entry((season, account))
            .or_insert_with(|| PvpRating::fresh(account, season)))
    }

    fn rating(&self, season: SeasonId, account: AccountId) -> Result<Option<PvpRating>> {
        Ok(self.read()?.ratings.get(&(season, account)).copied())
    }

    fn season_ratings(&self, season: SeasonId) -> Result<Vec<PvpRating>> {
        Ok(self
            .read()?
            .ratings
            .values()
            .filter(|row| row.season == season)
            .copied()
            .collect())
    }

    fn commit_match(&self, txn: &MatchTransaction) -> Result<MatchRecord> {
        let mut tables = self.write()?;

        // Validate the optimistic snapshot before touching anything.
        for (account, expected_rating) in txn.expected {
            let current = tables
                .ratings
                .get(&(txn.season, account))
                .copied()
                .unwrap_or_else(|| PvpRating::fresh(account, txn.season));
            if current.rating != expected_rating {
                return Err(RepositoryError::RatingConflict);
            }
        }

        for row in txn.rows {
            tables.ratings.insert((txn.season, row.account), row);
        }
        let record = MatchRecord {
            id: MatchId(tables.matches.len() as u64 + 1),
            season: txn.season,
            winner: txn.winner,
            loser: txn.loser,
            winner_pre_rating: txn.winner_pre_rating,
            loser_pre_rating: txn.loser_pre_rating,
            delta: txn.delta,
            played_at: txn.played_at,
        };
        tables.matches.push(record);
        tracing::debug!(
            "match {} committed: {} +{} over {}",
            record.id,
            record.winner,
            record.delta,
            record.loser
        );
        Ok(record)
    }

    fn match_history(&self, season: SeasonId, account: AccountId) -> Result<Vec<MatchRecord>> {
        Ok(self
            .read()?
            .matches
            .iter()
            .filter(|record| {
                record.season == season && (record.winner == account || record.loser == account)
            })
            .copied()
            .collect())
    }
}

impl SeasonRepository for InMemoryArena {
    fn active_season(&self, now: Timestamp) -> Result<Option<PvpSeason>> {
        Ok(self
            .read()?
            .seasons
            .iter()
            .find(|season| season.contains(now))
            .cloned())
    }

    fn get_or_create_active_season(&self, now: Timestamp) -> Result<PvpSeason> {
        let mut tables = self.write()?;
        // Re-check under the writer lock so concurrent bootstraps converge.
        if let Some(season) = tables.seasons.iter().find(|season| season.contains(now)) {
            return Ok(season.clone());
        }
        for stale in tables
            .seasons
            .iter_mut()
            .filter(|season| season.ends_at <= now)
        {
            stale.active = false;
        }
        let ordinal = tables.seasons.len() as u32 + 1;
        let season = PvpSeason::bootstrap(SeasonId(ordinal), ordinal, now);
        tracing::info!(
            "bootstrapped {} ({}..{})",
            season.name,
            season.starts_at,
            season.ends_at
        );
        tables.seasons.push(season.clone());
        Ok(season)
    }
}
