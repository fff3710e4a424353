//! Static opponent content for the arena engine.
//!
//! Ships the built-in boss roster and, behind the `loaders` feature, a RON
//! loader for deployments that curate their own roster files.
pub mod roster;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use roster::{BossEntry, find, roster};

#[cfg(feature = "loaders")]
pub use loaders::load_roster;
