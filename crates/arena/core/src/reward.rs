//! Reward calculation for encounters and duels.

use crate::config::EngineConfig;
use crate::opponent::DifficultyTier;

/// Currency and experience granted for an outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reward {
    pub experience: u64,
    pub gold: u64,
    /// Secondary currency, granted for competitive wins.
    pub crystals: u64,
}

impl Reward {
    pub fn is_empty(&self) -> bool {
        self.experience == 0 && self.gold == 0 && self.crystals == 0
    }
}

/// Reward for defeating a boss, scaled by the encounter's difficulty tier.
///
/// Baseline: `xp = level × 50`, `gold = level × 25`, floored after the tier
/// multiplier.
pub fn pve_victory_reward(boss_level: u32, tier: DifficultyTier) -> Reward {
    let multiplier = tier.reward_multiplier();
    let level = u64::from(boss_level);
    Reward {
        experience: ((level * EngineConfig::XP_PER_BOSS_LEVEL) as f64 * multiplier) as u64,
        gold: ((level * EngineConfig::GOLD_PER_BOSS_LEVEL) as f64 * multiplier) as u64,
        crystals: 0,
    }
}

/// Per-side duel reward.
///
/// Losers receive a smaller but non-zero grant to soften variance. The
/// rating differential folds in as a clamped factor so beating (or even
/// chasing) a higher-rated opponent pays more than farming a lower-rated
/// one.
pub fn duel_reward(won: bool, own_rating: i32, opponent_rating: i32) -> Reward {
    let factor =
        (1.0 + f64::from(opponent_rating - own_rating) / 400.0).clamp(0.5, 2.0);
    if won {
        Reward {
            experience: (100.0 * factor) as u64,
            gold: (50.0 * factor) as u64,
            crystals: 5,
        }
    } else {
        Reward {
            experience: (25.0 * factor) as u64,
            gold: (10.0 * factor) as u64,
            crystals: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_five_baseline_regression() {
        let reward = pve_victory_reward(5, DifficultyTier::Standard);
        assert_eq!(reward.experience, 250);
        assert_eq!(reward.gold, 125);
        assert_eq!(reward.crystals, 0);
    }

    #[test]
    fn tier_multipliers_scale_and_floor() {
        let casual = pve_victory_reward(5, DifficultyTier::Casual);
        assert_eq!(casual.experience, 125);
        assert_eq!(casual.gold, 62); // floor(125 × 0.5)

        let elite = pve_victory_reward(5, DifficultyTier::Elite);
        assert_eq!(elite.experience, 500);
        assert_eq!(elite.gold, 250);
    }

    #[test]
    fn upset_wins_pay_more() {
        let upset = duel_reward(true, 1_200, 1_600);
        let farm = duel_reward(true, 1_600, 1_200);
        let even = duel_reward(true, 1_400, 1_400);
        assert!(upset.experience > even.experience);
        assert!(farm.experience < even.experience);
    }

    #[test]
    fn differential_factor_is_clamped() {
        // A 2000-point gap would double (or halve) without the clamp biting
        // harder; at ±400 the factor saturates.
        let capped = duel_reward(true, 1_000, 3_000);
        assert_eq!(capped.experience, 200);
        let floored = duel_reward(true, 3_000, 1_000);
        assert_eq!(floored.experience, 50);
    }

    #[test]
    fn loser_grant_is_smaller_but_non_zero() {
        let loss = duel_reward(false, 1_200, 1_200);
        let win = duel_reward(true, 1_200, 1_200);
        assert!(!loss.is_empty());
        assert!(loss.experience < win.experience);
        assert!(loss.gold < win.gold);
        assert_eq!(loss.crystals, 0);
    }
}
