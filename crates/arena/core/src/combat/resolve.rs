//! Turn resolution: one player action plus the boss's retaliation.

use crate::attributes::CombatAttributes;
use crate::config::EngineConfig;
use crate::opponent::OpponentDescriptor;

use super::action::CombatAction;
use super::state::{CombatPhase, CombatState};

/// Random rolls for one turn, supplied by the caller.
///
/// Each roll is reduced modulo 100; the resolver itself never touches an RNG.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rolls {
    /// Drives the variance of the player's strike.
    pub attack: u32,
    /// Drives the variance of the boss's retaliation.
    pub retaliation: u32,
}

impl Rolls {
    pub fn new(attack: u32, retaliation: u32) -> Self {
        Self {
            attack,
            retaliation,
        }
    }

    /// Fixed midpoint rolls, useful for reproducible scenarios.
    pub fn flat() -> Self {
        Self::new(50, 50)
    }
}

/// Errors raised by the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    /// The state is already terminal; callers must check before resolving.
    #[error("encounter already resolved")]
    AlreadyResolved,

    /// Ultimate submitted before enough attacks were banked.
    #[error("ultimate not charged: {charge}/{required} attacks banked")]
    UltimateNotReady { charge: u8, required: u8 },
}

/// Bounded multiplier in [0.85, 1.15) derived from a roll.
fn variance(roll: u32) -> f64 {
    0.85 + f64::from(roll % 100) * 0.003
}

/// Damage of a basic attack for the given offense attribute and roll.
///
/// Also used to score attack exchanges in titan duels.
pub fn attack_damage(offense: u32, roll: u32) -> u32 {
    let base = f64::from(offense * EngineConfig::ATTACK_SCALE) * variance(roll);
    (base as u32).max(1)
}

fn ultimate_damage(offense: u32, roll: u32) -> u32 {
    let base = f64::from(offense * EngineConfig::ATTACK_SCALE)
        * EngineConfig::ULTIMATE_SCALE
        * variance(roll);
    (base as u32).max(1)
}

/// Retaliation damage dealt by the boss, mitigated by the player's defense
/// attribute and halved while the player is guarding.
fn retaliation_damage(power: u32, defense: u32, roll: u32, guarding: bool) -> u32 {
    let raw = f64::from(power) * variance(roll);
    let mitigated = (raw as u32).saturating_sub(defense / 2).max(1);
    if guarding {
        ((f64::from(mitigated) * (1.0 - EngineConfig::GUARD_FRACTION)) as u32).max(1)
    } else {
        mitigated
    }
}

/// Resolve one turn: the player's action, then the boss's retaliation.
///
/// Returns the successor state; the input state is never mutated. The turn
/// counter increments exactly once per call and exactly one narrative line is
/// appended per actor that acted. Victory is checked before the retaliation,
/// so a lethal strike on the boss wins even when the player would have
/// dropped on the answer.
pub fn resolve_turn(
    state: &CombatState,
    action: CombatAction,
    attributes: &CombatAttributes,
    opponent: &OpponentDescriptor,
    rolls: Rolls,
) -> Result<CombatState, CombatError> {
    if state.is_terminal() {
        return Err(CombatError::AlreadyResolved);
    }
    if action == CombatAction::Ultimate
        && state.ultimate_charge < EngineConfig::ULTIMATE_CHARGE_REQUIRED
    {
        return Err(CombatError::UltimateNotReady {
            charge: state.ultimate_charge,
            required: EngineConfig::ULTIMATE_CHARGE_REQUIRED,
        });
    }

    let mut next = state.clone();
    next.turn += 1;

    let mut guarding = false;
    match action {
        CombatAction::Attack => {
            let dealt = attack_damage(attributes.offense, rolls.attack);
            next.opponent_hp.damage(dealt);
            next.ultimate_charge =
                (next.ultimate_charge + 1).min(EngineConfig::ULTIMATE_CHARGE_REQUIRED);
            next.push_log(format!("You strike {} for {} damage.", opponent.name, dealt));
        }
        CombatAction::Defend => {
            guarding = true;
            next.push_log("You raise your guard.".to_string());
        }
        CombatAction::Heal => {
            let amount =
                (f64::from(next.player_hp.maximum) * EngineConfig::HEAL_FRACTION) as u32;
            let healed = next.player_hp.restore(amount);
            next.push_log(format!("You catch your breath and recover {healed} HP."));
        }
        CombatAction::Ultimate => {
            let dealt = ultimate_damage(attributes.offense, rolls.attack);
            next.opponent_hp.damage(dealt);
            next.ultimate_charge = 0;
            next.push_log(format!(
                "You unleash your ultimate on {} for {} damage!",
                opponent.name, dealt
            ));
        }
    }

    if next.opponent_hp.is_depleted() {
        next.phase = CombatPhase::Victory;
        return Ok(next);
    }

    let taken = retaliation_damage(opponent.power(), attributes.defense, rolls.retaliation, guarding);
    next.player_hp.damage(taken);
    next.push_log(format!("{} hits back for {} damage.", opponent.name, taken));

    if next.player_hp.is_depleted() {
        next.phase = CombatPhase::Defeat;
    }

    Ok(next)
}
