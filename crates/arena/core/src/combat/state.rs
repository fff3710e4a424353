//! Combat state owned by a live encounter session.

use core::fmt;

use crate::config::EngineConfig;

/// Integer resource meter (hit points) tracked per combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    /// A meter starting at full.
    pub fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Apply damage, clamped at zero.
    pub fn damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Restore points, capped at the maximum. Returns the amount actually
    /// restored.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.maximum - self.current);
        self.current += healed;
        healed
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

impl fmt::Display for ResourceMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.maximum)
    }
}

/// Phase of an encounter.
///
/// Replaces a pair of boolean terminal flags: a state is either in progress
/// or in exactly one terminal phase, by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatPhase {
    InProgress,
    Victory,
    Defeat,
}

impl CombatPhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Ephemeral state of one player-versus-boss encounter.
///
/// Owned exclusively by the session store for the duration of the encounter;
/// once the phase turns terminal the owning session is removed and the state
/// is never resolved again.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    pub player_hp: ResourceMeter,
    pub opponent_hp: ResourceMeter,
    /// Completed resolver calls; increments exactly once per call.
    pub turn: u32,
    /// Attacks banked toward the next ultimate.
    pub ultimate_charge: u8,
    pub phase: CombatPhase,
    /// Narrative log, most recent last, trimmed to a fixed window.
    pub log: Vec<String>,
}

impl CombatState {
    /// Open a fresh encounter with both combatants at full HP.
    pub fn open(player_max_hp: u32, opponent_max_hp: u32) -> Self {
        Self {
            player_hp: ResourceMeter::full(player_max_hp),
            opponent_hp: ResourceMeter::full(opponent_max_hp),
            turn: 0,
            ultimate_charge: 0,
            phase: CombatPhase::InProgress,
            log: Vec::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Append a narrative line, discarding the oldest beyond the window.
    pub(crate) fn push_log(&mut self, line: String) {
        if self.log.len() >= EngineConfig::MAX_COMBAT_LOG {
            self.log.remove(0);
        }
        self.log.push(line);
    }
}
