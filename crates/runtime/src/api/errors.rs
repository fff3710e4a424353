//! Unified error taxonomy surfaced by the engine API.
//!
//! Wraps failures from stores, the combat resolver, and duel records so
//! transports can map them uniformly. [`EngineError::kind`] classifies each
//! variant for status-code mapping and metrics.

use arena_core::{AccountId, CombatError, DuelError, DuelId, DuelStatus};
use thiserror::Error;

use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no authenticated account resolved")]
    Unauthorized,

    #[error("opponent not found: {id}")]
    OpponentNotFound { id: String },

    #[error("no combat attributes derived for {account}")]
    AttributesUnavailable { account: AccountId },

    #[error("duel not found: {id}")]
    DuelNotFound { id: DuelId },

    #[error("{account} has no active encounter")]
    NoActiveSession { account: AccountId },

    #[error("{account} already has a live encounter")]
    SessionAlreadyActive { account: AccountId },

    #[error("duel {id} is {status}, expected PENDING")]
    DuelNotPending { id: DuelId, status: DuelStatus },

    #[error("duel {id} is {status}, expected ACTIVE")]
    DuelNotActive { id: DuelId, status: DuelStatus },

    #[error("{account} is not a participant of duel {id}")]
    NotAParticipant { id: DuelId, account: AccountId },

    #[error("an unresolved challenge already exists between {challenger} and {defender}")]
    DuplicateChallenge {
        challenger: AccountId,
        defender: AccountId,
    },

    #[error("{account} cannot challenge itself")]
    SelfChallenge { account: AccountId },

    #[error("insufficient gold: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("rating rows changed concurrently; retry the submission")]
    RatingConflict,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("storage failure: {0}")]
    Repository(#[source] RepositoryError),
}

/// Taxonomy bucket of an error, independent of its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    NotFound,
    InvalidState,
    Conflict,
    InsufficientResource,
    Validation,
    Infrastructure,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::OpponentNotFound { .. }
            | Self::AttributesUnavailable { .. }
            | Self::DuelNotFound { .. } => ErrorKind::NotFound,
            Self::NoActiveSession { .. }
            | Self::DuelNotPending { .. }
            | Self::DuelNotActive { .. } => ErrorKind::InvalidState,
            Self::SessionAlreadyActive { .. }
            | Self::DuplicateChallenge { .. }
            | Self::SelfChallenge { .. }
            | Self::RatingConflict => ErrorKind::Conflict,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientResource,
            Self::NotAParticipant { .. } | Self::Validation(_) => ErrorKind::Validation,
            Self::Repository(_) => ErrorKind::Infrastructure,
        }
    }
}

impl From<RepositoryError> for EngineError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::UnknownDuel(id) => Self::DuelNotFound { id },
            RepositoryError::DuplicateChallenge {
                challenger,
                defender,
            } => Self::DuplicateChallenge {
                challenger,
                defender,
            },
            RepositoryError::InvalidTransition {
                duel,
                expected: DuelStatus::Pending,
                actual,
            } => Self::DuelNotPending {
                id: duel,
                status: actual,
            },
            RepositoryError::InvalidTransition { duel, actual, .. } => Self::DuelNotActive {
                id: duel,
                status: actual,
            },
            RepositoryError::InsufficientGold { needed, available } => Self::InsufficientFunds {
                needed,
                available,
            },
            RepositoryError::RatingConflict => Self::RatingConflict,
            other => Self::Repository(other),
        }
    }
}

impl From<CombatError> for EngineError {
    fn from(err: CombatError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<DuelError> for EngineError {
    fn from(err: DuelError) -> Self {
        Self::Validation(err.to_string())
    }
}
