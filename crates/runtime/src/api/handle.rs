//! Cloneable façade over the engine's managers.
//!
//! [`ArenaHandle`] is what the surrounding application embeds: transports
//! resolve an [`AuthContext`](super::AuthContext) per request and call these
//! methods. Encounter operations are async because turns for one account
//! serialize on a keyed lock; everything else completes synchronously
//! against the stores.

use std::sync::Arc;

use arena_core::{
    AccountId, ActivityKind, AttributeOracle, CombatAction, DifficultyTier, DuelChallenge,
    DuelId, EngineConfig, MatchOutcome, OpponentOracle, ProgressDelta, PvpSeason,
};

use crate::duel::{ChallengeParams, DuelManager};
use crate::encounter::EncounterManager;
use crate::oracle::{CatalogOpponentOracle, StaticAttributeOracle};
use crate::rating::RatingEngine;
use crate::repository::{
    AccountRepository, DuelRepository, InMemoryArena, RatingRepository, SeasonRepository,
};
use crate::session::{InMemorySessionStore, SessionStore};

use super::AuthContext;
use super::errors::Result;
use super::types::{
    EncounterView, FleeReport, LeaderboardEntry, MatchReport, ProgressReport, RatedPlayer,
    TurnReport,
};

struct ArenaInner {
    encounters: EncounterManager,
    duels: DuelManager,
    ratings: RatingEngine,
    seasons: Arc<dyn SeasonRepository>,
}

/// Client-facing handle to the whole engine.
#[derive(Clone)]
pub struct ArenaHandle {
    inner: Arc<ArenaInner>,
}

impl ArenaHandle {
    pub fn builder() -> ArenaBuilder {
        ArenaBuilder::default()
    }

    // ===== encounters =====

    pub async fn start_encounter(
        &self,
        auth: &AuthContext,
        opponent_id: &str,
        tier: DifficultyTier,
    ) -> Result<EncounterView> {
        let account = auth.require()?;
        self.inner.encounters.start(account, opponent_id, tier).await
    }

    pub async fn submit_action(
        &self,
        auth: &AuthContext,
        action: CombatAction,
    ) -> Result<TurnReport> {
        let account = auth.require()?;
        self.inner.encounters.advance(account, action).await
    }

    pub async fn flee(&self, auth: &AuthContext, cost: u64) -> Result<FleeReport> {
        let account = auth.require()?;
        self.inner.encounters.flee(account, cost).await
    }

    // ===== duels =====

    pub fn create_challenge(
        &self,
        auth: &AuthContext,
        defender: AccountId,
        params: ChallengeParams,
    ) -> Result<DuelChallenge> {
        let account = auth.require()?;
        self.inner.duels.create(account, defender, params)
    }

    pub fn accept_challenge(&self, auth: &AuthContext, id: DuelId) -> Result<DuelChallenge> {
        let account = auth.require()?;
        self.inner.duels.accept(account, id)
    }

    pub fn decline_challenge(&self, auth: &AuthContext, id: DuelId) -> Result<DuelChallenge> {
        let account = auth.require()?;
        self.inner.duels.decline(account, id)
    }

    pub fn report_progress(
        &self,
        auth: &AuthContext,
        id: DuelId,
        activity: Option<ActivityKind>,
        delta: ProgressDelta,
    ) -> Result<ProgressReport> {
        let account = auth.require()?;
        self.inner
            .duels
            .report_progress(account, id, activity, delta)
    }

    pub fn record_attack(&self, auth: &AuthContext, id: DuelId) -> Result<ProgressReport> {
        let account = auth.require()?;
        self.inner.duels.record_attack(account, id)
    }

    /// Poll one duel's current state; participants only.
    pub fn duel(&self, auth: &AuthContext, id: DuelId) -> Result<DuelChallenge> {
        let account = auth.require()?;
        self.inner.duels.duel(account, id)
    }

    pub fn duel_history(&self, auth: &AuthContext) -> Result<Vec<DuelChallenge>> {
        let account = auth.require()?;
        self.inner.duels.history(account)
    }

    // ===== ranked ladder =====

    pub fn find_ranked_opponent(&self, auth: &AuthContext) -> Result<Option<RatedPlayer>> {
        let account = auth.require()?;
        self.inner.ratings.find_opponent(account)
    }

    pub fn submit_match_result(
        &self,
        auth: &AuthContext,
        opponent: AccountId,
        outcome: MatchOutcome,
    ) -> Result<MatchReport> {
        let account = auth.require()?;
        self.inner.ratings.submit_result(account, opponent, outcome)
    }

    /// Season standings for display; no authentication required.
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        self.inner.ratings.leaderboard(limit)
    }

    /// The season all rating lookups currently resolve to.
    pub fn active_season(&self) -> Result<PvpSeason> {
        Ok(self
            .inner
            .seasons
            .get_or_create_active_season(crate::clock::unix_now())?)
    }
}

/// Builder wiring stores and oracles into an [`ArenaHandle`].
///
/// Defaults: in-memory repositories and session store, the static attribute
/// oracle (empty until seeded), and the catalog opponent oracle.
pub struct ArenaBuilder {
    accounts: Option<Arc<dyn AccountRepository>>,
    duels: Option<Arc<dyn DuelRepository>>,
    ratings: Option<Arc<dyn RatingRepository>>,
    seasons: Option<Arc<dyn SeasonRepository>>,
    sessions: Option<Arc<dyn SessionStore>>,
    attributes: Option<Arc<dyn AttributeOracle>>,
    opponents: Option<Arc<dyn OpponentOracle>>,
    config: EngineConfig,
}

impl Default for ArenaBuilder {
    fn default() -> Self {
        Self {
            accounts: None,
            duels: None,
            ratings: None,
            seasons: None,
            sessions: None,
            attributes: None,
            opponents: None,
            config: EngineConfig::default(),
        }
    }
}

impl ArenaBuilder {
    /// Back every durable-record contract with one store.
    pub fn repository<R>(mut self, repository: Arc<R>) -> Self
    where
        R: AccountRepository
            + DuelRepository
            + RatingRepository
            + SeasonRepository
            + Send
            + Sync
            + 'static,
    {
        self.accounts = Some(repository.clone());
        self.duels = Some(repository.clone());
        self.ratings = Some(repository.clone());
        self.seasons = Some(repository);
        self
    }

    pub fn sessions(mut self, sessions: Arc<dyn SessionStore>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    pub fn attributes(mut self, attributes: Arc<dyn AttributeOracle>) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn opponents(mut self, opponents: Arc<dyn OpponentOracle>) -> Self {
        self.opponents = Some(opponents);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> ArenaHandle {
        let (accounts, duels, ratings, seasons) = match (
            self.accounts,
            self.duels,
            self.ratings,
            self.seasons,
        ) {
            (Some(accounts), Some(duels), Some(ratings), Some(seasons)) => {
                (accounts, duels, ratings, seasons)
            }
            _ => {
                let arena = Arc::new(InMemoryArena::new());
                (
                    arena.clone() as Arc<dyn AccountRepository>,
                    arena.clone() as Arc<dyn DuelRepository>,
                    arena.clone() as Arc<dyn RatingRepository>,
                    arena as Arc<dyn SeasonRepository>,
                )
            }
        };
        let sessions = self
            .sessions
            .unwrap_or_else(|| Arc::new(InMemorySessionStore::new()));
        let attributes = self
            .attributes
            .unwrap_or_else(|| Arc::new(StaticAttributeOracle::new()));
        let opponents = self
            .opponents
            .unwrap_or_else(|| Arc::new(CatalogOpponentOracle));

        let encounters = EncounterManager::new(
            sessions,
            attributes.clone(),
            opponents,
            accounts.clone(),
        );
        let duel_manager = DuelManager::new(
            duels,
            accounts,
            ratings.clone(),
            seasons.clone(),
            attributes,
        );
        let rating_engine = RatingEngine::new(ratings, seasons.clone(), self.config);

        ArenaHandle {
            inner: Arc::new(ArenaInner {
                encounters,
                duels: duel_manager,
                ratings: rating_engine,
                seasons,
            }),
        }
    }
}
