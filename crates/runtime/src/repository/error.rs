//! Error types raised by repository and session-store implementations.

use arena_core::{AccountId, DuelId, DuelStatus};
use thiserror::Error;

/// Errors surfaced by storage implementations.
///
/// A few variants carry domain meaning (duplicate challenge, transition
/// refused, shortfall) because the store is where those checks are atomic;
/// the API layer maps them onto its taxonomy. Everything else is
/// infrastructure.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("no duel {0} exists")]
    UnknownDuel(DuelId),

    #[error("an unresolved challenge already exists between {challenger} and {defender}")]
    DuplicateChallenge {
        challenger: AccountId,
        defender: AccountId,
    },

    #[error("duel {duel} is {actual}, expected {expected}")]
    InvalidTransition {
        duel: DuelId,
        expected: DuelStatus,
        actual: DuelStatus,
    },

    #[error("insufficient gold: need {needed}, have {available}")]
    InsufficientGold { needed: u64, available: u64 },

    #[error("rating rows moved since the match was prepared")]
    RatingConflict,
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
