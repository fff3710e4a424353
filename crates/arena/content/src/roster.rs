//! Built-in boss roster.
//!
//! Bosses are defined in a data-driven way so the runtime can serve them
//! through its opponent oracle without hard-coding stats at call sites.

use arena_core::OpponentDescriptor;

/// One roster entry. `const`-friendly; convert with [`BossEntry::descriptor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub level: u32,
    pub max_hp: u32,
}

impl BossEntry {
    pub fn descriptor(&self) -> OpponentDescriptor {
        OpponentDescriptor::new(self.id, self.name, self.level, self.max_hp)
    }
}

/// The built-in ladder of bosses, easiest first.
pub fn roster() -> &'static [BossEntry] {
    ROSTER
}

/// Look up a boss descriptor by catalog id.
pub fn find(id: &str) -> Option<OpponentDescriptor> {
    ROSTER
        .iter()
        .find(|entry| entry.id == id)
        .map(BossEntry::descriptor)
}

const ROSTER: &[BossEntry] = &[
    BossEntry {
        id: "sofa_shade",
        name: "The Sofa Shade",
        level: 1,
        max_hp: 120,
    },
    BossEntry {
        id: "alley_prowler",
        name: "Alley Prowler",
        level: 2,
        max_hp: 220,
    },
    BossEntry {
        id: "mile_eater",
        name: "Mile Eater",
        level: 3,
        max_hp: 340,
    },
    BossEntry {
        id: "cramp_fiend",
        name: "Cramp Fiend",
        level: 4,
        max_hp: 480,
    },
    BossEntry {
        id: "ironclad_colossus",
        name: "Ironclad Colossus",
        level: 5,
        max_hp: 650,
    },
    BossEntry {
        id: "tempo_wraith",
        name: "Tempo Wraith",
        level: 6,
        max_hp: 820,
    },
    BossEntry {
        id: "summit_warden",
        name: "Summit Warden",
        level: 8,
        max_hp: 1_100,
    },
    BossEntry {
        id: "marathon_revenant",
        name: "Marathon Revenant",
        level: 10,
        max_hp: 1_500,
    },
    BossEntry {
        id: "storm_of_plateaus",
        name: "Storm of Plateaus",
        level: 12,
        max_hp: 2_000,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for entry in roster() {
            assert!(seen.insert(entry.id), "duplicate boss id {}", entry.id);
        }
    }

    #[test]
    fn roster_escalates() {
        for pair in roster().windows(2) {
            assert!(pair[0].level <= pair[1].level);
            assert!(pair[0].max_hp < pair[1].max_hp);
        }
    }

    #[test]
    fn find_resolves_known_ids() {
        let boss = find("ironclad_colossus").unwrap();
        assert_eq!(boss.name, "Ironclad Colossus");
        assert_eq!(boss.level, 5);
        assert!(find("does_not_exist").is_none());
    }
}
