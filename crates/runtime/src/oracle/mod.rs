//! Oracle implementations backing the engine's collaborator seams.
//!
//! Production deployments derive combat attributes from workout history in a
//! separate service; [`StaticAttributeOracle`] is the in-process stand-in
//! used by tests and local runs. Opponents come from the built-in catalog.

use std::collections::HashMap;
use std::sync::RwLock;

use arena_core::{AccountId, AttributeOracle, CombatAttributes, OpponentDescriptor, OpponentOracle};

/// Attribute oracle backed by a settable in-memory table.
pub struct StaticAttributeOracle {
    attributes: RwLock<HashMap<AccountId, CombatAttributes>>,
}

impl StaticAttributeOracle {
    pub fn new() -> Self {
        Self {
            attributes: RwLock::new(HashMap::new()),
        }
    }

    /// Seed or replace one account's attributes.
    pub fn set(&self, account: AccountId, attributes: CombatAttributes) {
        if let Ok(mut table) = self.attributes.write() {
            table.insert(account, attributes);
        }
    }
}

impl Default for StaticAttributeOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeOracle for StaticAttributeOracle {
    fn attributes(&self, account: AccountId) -> Option<CombatAttributes> {
        self.attributes
            .read()
            .ok()
            .and_then(|table| table.get(&account).copied())
    }
}

/// Opponent oracle serving the built-in boss roster.
pub struct CatalogOpponentOracle;

impl OpponentOracle for CatalogOpponentOracle {
    fn descriptor(&self, id: &str) -> Option<OpponentDescriptor> {
        arena_content::find(id)
    }
}
