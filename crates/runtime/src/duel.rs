//! Duel lifecycle orchestration.
//!
//! Owns the PENDING → ACTIVE → COMPLETED / DECLINED machine on top of the
//! duel repository. Validation happens before any mutation; the decisive
//! write (completion plus both reward grants) is a single atomic repository
//! call guarded by a compare-and-swap on ACTIVE.

use std::sync::Arc;

use rand::Rng;

use arena_core::{
    AccountId, ActivityKind, AttributeOracle, DuelChallenge, DuelError, DuelId, DuelResolution,
    DuelSide, DuelStatus, DuelVariant, EngineConfig, ProgressDelta, Timestamp,
    combat::attack_damage, duel::evaluate, reward::duel_reward,
};

use crate::api::errors::{EngineError, Result};
use crate::api::types::ProgressReport;
use crate::clock::unix_now;
use crate::repository::{AccountRepository, DuelRepository, RatingRepository, SeasonRepository};

/// Creation parameters for a challenge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeParams {
    pub variant: DuelVariant,
    pub activity_filter: Option<ActivityKind>,
    /// Distance or elevation target in metres, depending on the variant.
    pub target: Option<u64>,
}

pub struct DuelManager {
    duels: Arc<dyn DuelRepository>,
    accounts: Arc<dyn AccountRepository>,
    ratings: Arc<dyn RatingRepository>,
    seasons: Arc<dyn SeasonRepository>,
    attributes: Arc<dyn AttributeOracle>,
}

impl DuelManager {
    pub fn new(
        duels: Arc<dyn DuelRepository>,
        accounts: Arc<dyn AccountRepository>,
        ratings: Arc<dyn RatingRepository>,
        seasons: Arc<dyn SeasonRepository>,
        attributes: Arc<dyn AttributeOracle>,
    ) -> Self {
        Self {
            duels,
            accounts,
            ratings,
            seasons,
            attributes,
        }
    }

    /// Issue a challenge. The defender must accept before progress counts.
    pub fn create(
        &self,
        challenger: AccountId,
        defender: AccountId,
        params: ChallengeParams,
    ) -> Result<DuelChallenge> {
        if challenger == defender {
            return Err(EngineError::SelfChallenge {
                account: challenger,
            });
        }
        let challenge = DuelChallenge::open(
            DuelId(0),
            challenger,
            defender,
            params.variant,
            params.activity_filter,
            params.target,
            unix_now(),
        )?;
        // Both wallets exist from here on; rewards at resolution can only
        // credit accounts the store already knows.
        self.accounts.get_or_create_account(challenger)?;
        self.accounts.get_or_create_account(defender)?;
        let stored = self.duels.insert_challenge(challenge)?;
        tracing::info!(
            "{} challenged {} to {} ({})",
            challenger,
            defender,
            stored.variant,
            stored.id
        );
        Ok(stored)
    }

    /// Defender accepts: the duel goes ACTIVE with a seven-day window, and
    /// titan duels seed both sides' hit points from their attributes.
    pub fn accept(&self, account: AccountId, id: DuelId) -> Result<DuelChallenge> {
        let duel = self.require_duel(id)?;
        self.require_participant(&duel, account)?;
        if account != duel.defender {
            return Err(EngineError::Validation(
                "only the defender may accept a challenge".to_string(),
            ));
        }

        let titan_hp = if duel.variant == DuelVariant::TitanVsTitan {
            let challenger_hp = self.titan_hp(duel.challenger)?;
            let defender_hp = self.titan_hp(duel.defender)?;
            Some((challenger_hp, defender_hp))
        } else {
            None
        };

        let now = unix_now();
        let ends = now.plus_days(EngineConfig::DUEL_WINDOW_DAYS);
        let active = self.duels.activate_duel(id, now, ends, titan_hp)?;
        tracing::info!("duel {} accepted, runs until {}", id, ends);
        Ok(active)
    }

    /// Defender declines: terminal, no rewards.
    pub fn decline(&self, account: AccountId, id: DuelId) -> Result<DuelChallenge> {
        let duel = self.require_duel(id)?;
        self.require_participant(&duel, account)?;
        if account != duel.defender {
            return Err(EngineError::Validation(
                "only the defender may decline a challenge".to_string(),
            ));
        }
        let declined = self.duels.decline_duel(id)?;
        tracing::info!("duel {} declined", id);
        Ok(declined)
    }

    /// Accumulate synced workout progress onto the reporter's side, then
    /// run the variant's win check.
    pub fn report_progress(
        &self,
        account: AccountId,
        id: DuelId,
        activity: Option<ActivityKind>,
        delta: ProgressDelta,
    ) -> Result<ProgressReport> {
        delta.validate()?;

        let duel = self.require_duel(id)?;
        let side = self.require_participant(&duel, account)?;
        self.require_active(&duel)?;
        if duel.variant == DuelVariant::TitanVsTitan {
            return Err(EngineError::Validation(
                "titan duels advance through attacks, not workout progress".to_string(),
            ));
        }
        if let Some(required) = duel.activity_filter {
            if activity != Some(required) {
                return Err(DuelError::ActivityMismatch.into());
            }
        }

        let now = unix_now();
        let updated = self.duels.apply_progress(id, side, delta, now)?;
        self.check_resolution(updated, now)
    }

    /// One titan attack: score offense-derived damage for the attacker,
    /// then run the win check.
    pub fn record_attack(&self, account: AccountId, id: DuelId) -> Result<ProgressReport> {
        let duel = self.require_duel(id)?;
        let side = self.require_participant(&duel, account)?;
        self.require_active(&duel)?;
        if duel.variant != DuelVariant::TitanVsTitan {
            return Err(EngineError::Validation(
                "attacks only apply to titan duels".to_string(),
            ));
        }

        let attributes = self
            .attributes
            .attributes(account)
            .ok_or(EngineError::AttributesUnavailable { account })?;
        let roll = rand::thread_rng().gen_range(0..100);
        let damage = attack_damage(attributes.offense, roll);

        let updated = self.duels.apply_attack(id, side, damage)?;
        self.check_resolution(updated, unix_now())
    }

    /// Read one duel; participants only.
    pub fn duel(&self, account: AccountId, id: DuelId) -> Result<DuelChallenge> {
        let duel = self.require_duel(id)?;
        self.require_participant(&duel, account)?;
        Ok(duel)
    }

    /// Full duel history for an account, oldest first.
    pub fn history(&self, account: AccountId) -> Result<Vec<DuelChallenge>> {
        Ok(self.duels.duels_for(account)?)
    }

    fn require_duel(&self, id: DuelId) -> Result<DuelChallenge> {
        self.duels
            .duel(id)?
            .ok_or(EngineError::DuelNotFound { id })
    }

    fn require_participant(&self, duel: &DuelChallenge, account: AccountId) -> Result<DuelSide> {
        duel.side_of(account).ok_or(EngineError::NotAParticipant {
            id: duel.id,
            account,
        })
    }

    fn require_active(&self, duel: &DuelChallenge) -> Result<()> {
        if duel.status != DuelStatus::Active {
            return Err(EngineError::DuelNotActive {
                id: duel.id,
                status: duel.status,
            });
        }
        Ok(())
    }

    fn titan_hp(&self, account: AccountId) -> Result<u32> {
        let attributes = self
            .attributes
            .attributes(account)
            .ok_or(EngineError::AttributesUnavailable { account })?;
        Ok(attributes.max_hp())
    }

    /// Run the win check; on a decisive result complete the duel and grant
    /// both sides' rewards in one atomic repository call.
    fn check_resolution(&self, duel: DuelChallenge, now: Timestamp) -> Result<ProgressReport> {
        let Some(resolution) = evaluate(&duel) else {
            return Ok(ProgressReport {
                duel,
                resolved: false,
            });
        };
        let rewards = self.side_rewards(&duel, resolution)?;
        match self
            .duels
            .resolve_duel(duel.id, resolution.winner, now, rewards)?
        {
            Some(completed) => Ok(ProgressReport {
                duel: completed,
                resolved: true,
            }),
            // A concurrent report won the compare-and-swap; serve the
            // record it produced.
            None => {
                let completed = self.require_duel(duel.id)?;
                Ok(ProgressReport {
                    duel: completed,
                    resolved: false,
                })
            }
        }
    }

    /// Winner and loser rewards, folding in the current rating differential.
    fn side_rewards(
        &self,
        duel: &DuelChallenge,
        resolution: DuelResolution,
    ) -> Result<[(AccountId, arena_core::Reward); 2]> {
        let season = self.seasons.get_or_create_active_season(unix_now())?;
        let winner = resolution.winner;
        let loser = duel.account_on(resolution.winning_side.opposite());
        let winner_rating = self.ratings.get_or_create_rating(season.id, winner)?;
        let loser_rating = self.ratings.get_or_create_rating(season.id, loser)?;
        Ok([
            (
                winner,
                duel_reward(true, winner_rating.rating, loser_rating.rating),
            ),
            (
                loser,
                duel_reward(false, loser_rating.rating, winner_rating.rating),
            ),
        ])
    }
}
