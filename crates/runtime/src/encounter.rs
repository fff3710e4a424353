//! Encounter orchestration: start, advance, flee.
//!
//! Serializes turns per account with a keyed `tokio::sync::Mutex` so two
//! near-simultaneous actions can never both read the same pre-turn HP, while
//! different accounts proceed fully in parallel.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use rand::Rng;

use arena_core::{
    AccountId, AttributeOracle, CombatAction, CombatPhase, CombatState, DifficultyTier,
    OpponentOracle, Rolls, combat::resolve_turn, reward::pve_victory_reward,
};

use crate::api::errors::{EngineError, Result};
use crate::api::types::{EncounterView, FleeReport, TurnReport};
use crate::clock::unix_now;
use crate::repository::AccountRepository;
use crate::session::{CombatSession, SessionStore};

pub struct EncounterManager {
    sessions: Arc<dyn SessionStore>,
    attributes: Arc<dyn AttributeOracle>,
    opponents: Arc<dyn OpponentOracle>,
    accounts: Arc<dyn AccountRepository>,
    /// One mutex per account with a live or recently live encounter.
    turn_locks: RwLock<HashMap<AccountId, Arc<tokio::sync::Mutex<()>>>>,
}

impl EncounterManager {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        attributes: Arc<dyn AttributeOracle>,
        opponents: Arc<dyn OpponentOracle>,
        accounts: Arc<dyn AccountRepository>,
    ) -> Self {
        Self {
            sessions,
            attributes,
            opponents,
            accounts,
            turn_locks: RwLock::new(HashMap::new()),
        }
    }

    fn turn_lock(&self, account: AccountId) -> Arc<tokio::sync::Mutex<()>> {
        if let Some(lock) = self
            .turn_locks
            .read()
            .ok()
            .and_then(|locks| locks.get(&account).cloned())
        {
            return lock;
        }
        let mut locks = match self.turn_locks.write() {
            Ok(locks) => locks,
            // A poisoned lock map degrades to a fresh mutex; the session
            // store still guards correctness of the stored state.
            Err(poisoned) => poisoned.into_inner(),
        };
        locks
            .entry(account)
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    fn rolls() -> Rolls {
        let mut rng = rand::thread_rng();
        Rolls::new(rng.gen_range(0..100), rng.gen_range(0..100))
    }

    /// Begin an encounter against a catalog opponent at the given tier.
    pub async fn start(
        &self,
        account: AccountId,
        opponent_id: &str,
        tier: DifficultyTier,
    ) -> Result<EncounterView> {
        let lock = self.turn_lock(account);
        let _guard = lock.lock().await;

        if self.sessions.contains(account) {
            return Err(EngineError::SessionAlreadyActive { account });
        }
        let attributes = self
            .attributes
            .attributes(account)
            .ok_or(EngineError::AttributesUnavailable { account })?;
        let opponent = self
            .opponents
            .descriptor(opponent_id)
            .ok_or_else(|| EngineError::OpponentNotFound {
                id: opponent_id.to_string(),
            })?;

        let state = CombatState::open(attributes.max_hp(), opponent.scaled_hp(tier));
        let session = CombatSession {
            account,
            opponent: opponent.clone(),
            tier,
            attributes,
            state: state.clone(),
            started_at: unix_now(),
        };
        self.sessions.store(&session)?;
        tracing::debug!("{} opened an encounter against {}", account, opponent.name);

        Ok(EncounterView {
            state,
            opponent,
            tier,
        })
    }

    /// Resolve one turn for the account's live encounter.
    ///
    /// On victory the reward is granted exactly once and the session is
    /// removed before this returns; a retry of the same call observes
    /// `NoActiveSession` rather than a second grant.
    pub async fn advance(&self, account: AccountId, action: CombatAction) -> Result<TurnReport> {
        let lock = self.turn_lock(account);
        let _guard = lock.lock().await;

        let session = self
            .sessions
            .load(account)?
            .ok_or(EngineError::NoActiveSession { account })?;

        let state = resolve_turn(
            &session.state,
            action,
            &session.attributes,
            &session.opponent,
            Self::rolls(),
        )?;

        match state.phase {
            CombatPhase::InProgress => {
                let mut updated = session;
                updated.state = state.clone();
                self.sessions.store(&updated)?;
                Ok(TurnReport {
                    state,
                    reward: None,
                })
            }
            CombatPhase::Victory => {
                let reward = pve_victory_reward(session.opponent.level, session.tier);
                // Grant first: if the grant fails the session survives at its
                // pre-turn state and the turn can be retried safely.
                self.accounts.grant(account, &reward)?;
                self.sessions.remove(account)?;
                tracing::info!(
                    "{} defeated {} on turn {}",
                    account,
                    session.opponent.name,
                    state.turn
                );
                Ok(TurnReport {
                    state,
                    reward: Some(reward),
                })
            }
            CombatPhase::Defeat => {
                self.sessions.remove(account)?;
                tracing::info!("{} fell to {}", account, session.opponent.name);
                Ok(TurnReport {
                    state,
                    reward: None,
                })
            }
        }
    }

    /// Abandon the live encounter for a flat gold cost.
    ///
    /// A shortfall deducts nothing and leaves the session intact.
    pub async fn flee(&self, account: AccountId, cost: u64) -> Result<FleeReport> {
        let lock = self.turn_lock(account);
        let _guard = lock.lock().await;

        if !self.sessions.contains(account) {
            return Err(EngineError::NoActiveSession { account });
        }
        let wallet = self.accounts.spend_gold(account, cost)?;
        self.sessions.remove(account)?;
        tracing::debug!("{} fled for {} gold", account, cost);

        Ok(FleeReport {
            cost_paid: cost,
            remaining_gold: wallet.gold,
        })
    }
}
