//! Runtime orchestration for the combat and competitive ranking engine.
//!
//! This crate wires the pure rules of `arena-core` to storage and
//! concurrency: combat session stores, durable repositories, the duel
//! lifecycle, the transactional rating engine, and season bootstrap.
//! Consumers embed [`ArenaHandle`] and call it from whatever transport the
//! surrounding application uses; state is polled, never pushed.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the facade, auth context, views, and error taxonomy
//! - [`encounter`], [`duel`], [`rating`] host the managers
//! - [`session`] keeps live encounter state (in-memory or file-backed)
//! - [`repository`] holds the durable-record contracts and the in-memory
//!   implementation; [`oracle`] supplies attributes and opponents
pub mod api;
pub mod duel;
pub mod encounter;
pub mod oracle;
pub mod repository;
pub mod session;

mod clock;
mod rating;

pub use api::{
    ArenaBuilder, ArenaHandle, AuthContext, EncounterView, EngineError, ErrorKind, FleeReport,
    LeaderboardEntry, MatchReport, ProgressReport, RatedPlayer, Result, TurnReport,
};
pub use duel::{ChallengeParams, DuelManager};
pub use encounter::EncounterManager;
pub use oracle::{CatalogOpponentOracle, StaticAttributeOracle};
pub use rating::RatingEngine;
pub use repository::{
    AccountRepository, DuelRepository, InMemoryArena, PlayerAccount, RatingRepository,
    RepositoryError, SeasonRepository,
};
pub use session::{CombatSession, FileSessionStore, InMemorySessionStore, SessionStore};
