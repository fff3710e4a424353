//! Asynchronous multi-day duels.
//!
//! A duel is a durable record shared by two accounts. This module defines the
//! record itself, the additive progress accumulation applied to it, and one
//! win-condition evaluator per variant. The evaluators are pure: they inspect
//! a challenge and report a winner, or nothing. Lifecycle orchestration
//! (creation, acceptance, persistence, rewards) lives in the runtime crate.

pub mod challenge;
pub mod win;

pub use challenge::{
    ActivityKind, DuelChallenge, DuelError, DuelProgress, DuelSide, DuelStatus, DuelVariant,
    FinishSnapshot, ProgressDelta,
};
pub use win::{DuelResolution, evaluate};
