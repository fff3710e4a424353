//! RON roster loading for curated deployments.

use anyhow::{Context, Result};
use serde::Deserialize;

use arena_core::OpponentDescriptor;

/// Serialized form of one boss in a roster file.
#[derive(Debug, Clone, Deserialize)]
pub struct BossDefinition {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub max_hp: u32,
}

#[derive(Debug, Deserialize)]
struct RosterFile {
    bosses: Vec<BossDefinition>,
}

/// Parse a RON roster document into opponent descriptors.
///
/// # Format
///
/// ```ron
/// (
///     bosses: [
///         (id: "ironclad_colossus", name: "Ironclad Colossus", level: 5, max_hp: 650),
///     ],
/// )
/// ```
pub fn load_roster(source: &str) -> Result<Vec<OpponentDescriptor>> {
    let file: RosterFile = ron::from_str(source).context("failed to parse roster RON")?;
    Ok(file
        .bosses
        .into_iter()
        .map(|boss| OpponentDescriptor::new(boss.id, boss.name, boss.level, boss.max_hp))
        .collect())
}
