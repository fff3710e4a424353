//! Repository contracts for the durable, shared records.
//!
//! Every operation that touches more than one account's row (duel
//! resolution with its reward grants, the rating commit) is a single trait
//! method so implementations can make it atomic — two independent "update
//! account" calls are exactly the bug these contracts exist to prevent.

use arena_core::{
    AccountId, DuelChallenge, DuelId, DuelSide, MatchRecord, MatchTransaction, ProgressDelta,
    PvpRating, PvpSeason, Reward, SeasonId, Timestamp,
};

use super::Result;
use super::types::PlayerAccount;

/// Wallet storage, created lazily on first access.
pub trait AccountRepository: Send + Sync {
    fn get_or_create_account(&self, account: AccountId) -> Result<PlayerAccount>;

    /// Credit a reward and return the updated wallet.
    fn grant(&self, account: AccountId, reward: &Reward) -> Result<PlayerAccount>;

    /// Deduct gold, all-or-nothing. A shortfall deducts nothing and fails
    /// with [`RepositoryError::InsufficientGold`](super::RepositoryError).
    fn spend_gold(&self, account: AccountId, cost: u64) -> Result<PlayerAccount>;
}

/// Duel challenge storage.
///
/// Records are never deleted; terminal duels remain as match history.
pub trait DuelRepository: Send + Sync {
    /// Persist a new challenge. The caller's id is a placeholder; the store
    /// assigns the definitive one. Fails with `DuplicateChallenge` when an
    /// unresolved challenge already exists between the pair (either seat
    /// order) — the check and the insert are one atomic step.
    fn insert_challenge(&self, challenge: DuelChallenge) -> Result<DuelChallenge>;

    fn duel(&self, id: DuelId) -> Result<Option<DuelChallenge>>;

    /// Pending → Active, stamping acceptance and expiry. `titan_hp` seeds
    /// `(challenger, defender)` hit points for titan duels.
    fn activate_duel(
        &self,
        id: DuelId,
        accepted_at: Timestamp,
        ends_at: Timestamp,
        titan_hp: Option<(u32, u32)>,
    ) -> Result<DuelChallenge>;

    /// Pending → Declined. Terminal, no rewards.
    fn decline_duel(&self, id: DuelId) -> Result<DuelChallenge>;

    /// Atomically accumulate a progress delta onto one side of an ACTIVE
    /// duel and return the updated record. Addition happens under the
    /// store's write lock, so concurrent reports from both duelists commute.
    fn apply_progress(
        &self,
        id: DuelId,
        side: DuelSide,
        delta: ProgressDelta,
        now: Timestamp,
    ) -> Result<DuelChallenge>;

    /// Atomically add titan damage to one side's combat score.
    fn apply_attack(&self, id: DuelId, side: DuelSide, damage: u32) -> Result<DuelChallenge>;

    /// Active → Completed with winner and end timestamp, granting both
    /// sides' rewards in the same atomic unit. Returns `Ok(None)` when the
    /// duel is no longer Active — the compare-and-swap that makes
    /// double-resolution impossible under concurrent progress reports.
    fn resolve_duel(
        &self,
        id: DuelId,
        winner: AccountId,
        completed_at: Timestamp,
        rewards: [(AccountId, Reward); 2],
    ) -> Result<Option<DuelChallenge>>;

    /// The unresolved challenge between two accounts, if any (either order).
    fn open_between(&self, a: AccountId, b: AccountId) -> Result<Option<DuelChallenge>>;

    /// Every duel an account has taken part in, oldest first.
    fn duels_for(&self, account: AccountId) -> Result<Vec<DuelChallenge>>;
}

/// Seasonal ladder storage.
pub trait RatingRepository: Send + Sync {
    /// The account's row for the season, created at the base rating on
    /// first access.
    fn get_or_create_rating(&self, season: SeasonId, account: AccountId) -> Result<PvpRating>;

    fn rating(&self, season: SeasonId, account: AccountId) -> Result<Option<PvpRating>>;

    /// Every row in the season, unordered.
    fn season_ratings(&self, season: SeasonId) -> Result<Vec<PvpRating>>;

    /// Commit a prepared match: both rows and the immutable record succeed
    /// or fail together. Fails with `RatingConflict` — writing nothing —
    /// when either row's rating no longer matches the transaction's
    /// `expected` snapshot.
    fn commit_match(&self, txn: &MatchTransaction) -> Result<MatchRecord>;

    /// Match records involving the account in the season, oldest first.
    fn match_history(&self, season: SeasonId, account: AccountId) -> Result<Vec<MatchRecord>>;
}

/// Season storage.
pub trait SeasonRepository: Send + Sync {
    fn active_season(&self, now: Timestamp) -> Result<Option<PvpSeason>>;

    /// The season bracketing `now`, bootstrapping the next one if none does.
    /// Creation happens under the store's single writer lock, so concurrent
    /// calls converge on one season.
    fn get_or_create_active_season(&self, now: Timestamp) -> Result<PvpSeason>;
}
