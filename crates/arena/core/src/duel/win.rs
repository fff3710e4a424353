//! Win-condition evaluators, one per duel variant.
//!
//! Each evaluator inspects an active challenge and reports the winner, or
//! `None` while the duel is still undecided. Keeping the variants behind one
//! dispatch point means adding a variant touches exactly one place.

use crate::ids::AccountId;

use super::challenge::{DuelChallenge, DuelSide, DuelVariant};

/// Decisive result of a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuelResolution {
    pub winner: AccountId,
    pub winning_side: DuelSide,
}

impl DuelResolution {
    fn on(challenge: &DuelChallenge, side: DuelSide) -> Self {
        Self {
            winner: challenge.account_on(side),
            winning_side: side,
        }
    }
}

/// Evaluate the challenge's variant after a progress update.
pub fn evaluate(challenge: &DuelChallenge) -> Option<DuelResolution> {
    match challenge.variant {
        DuelVariant::DistanceRace => distance_race(challenge),
        DuelVariant::SpeedDemon => speed_demon(challenge),
        DuelVariant::ElevationGrind => elevation_grind(challenge),
        DuelVariant::TitanVsTitan => titan_vs_titan(challenge),
    }
}

/// First side at or beyond the target distance wins immediately.
///
/// Both sides can only cross in separate progress reports (accumulation is
/// serialized per duel), so the first crossing report decides.
fn distance_race(challenge: &DuelChallenge) -> Option<DuelResolution> {
    let target = challenge.target_metres();
    first_at_threshold(challenge, |p| p.distance_m >= target)
}

/// First side at or beyond the elevation target wins immediately.
fn elevation_grind(challenge: &DuelChallenge) -> Option<DuelResolution> {
    let target = challenge.target_metres();
    first_at_threshold(challenge, |p| p.elevation_m >= target)
}

/// Completes only once both sides have finished; the lower accumulated
/// duration at the crossing wins. Ties break to the earlier finish, then to
/// the challenger.
fn speed_demon(challenge: &DuelChallenge) -> Option<DuelResolution> {
    let challenger = challenge.challenger_progress.finish?;
    let defender = challenge.defender_progress.finish?;

    let side = if challenger.duration_s != defender.duration_s {
        if challenger.duration_s < defender.duration_s {
            DuelSide::Challenger
        } else {
            DuelSide::Defender
        }
    } else if challenger.at != defender.at {
        if challenger.at < defender.at {
            DuelSide::Challenger
        } else {
            DuelSide::Defender
        }
    } else {
        DuelSide::Challenger
    };
    Some(DuelResolution::on(challenge, side))
}

/// A side wins the moment its accumulated score reaches the opponent's titan
/// hit points. Only one score moves per attack, so crossings cannot tie.
fn titan_vs_titan(challenge: &DuelChallenge) -> Option<DuelResolution> {
    let challenger = &challenge.challenger_progress;
    let defender = &challenge.defender_progress;
    if defender.titan_hp > 0 && challenger.combat_score >= defender.titan_hp {
        return Some(DuelResolution::on(challenge, DuelSide::Challenger));
    }
    if challenger.titan_hp > 0 && defender.combat_score >= challenger.titan_hp {
        return Some(DuelResolution::on(challenge, DuelSide::Defender));
    }
    None
}

/// Challenger-first scan shared by the immediate-threshold variants.
fn first_at_threshold(
    challenge: &DuelChallenge,
    reached: impl Fn(&super::challenge::DuelProgress) -> bool,
) -> Option<DuelResolution> {
    for side in [DuelSide::Challenger, DuelSide::Defender] {
        if reached(challenge.progress(side)) {
            return Some(DuelResolution::on(challenge, side));
        }
    }
    None
}
