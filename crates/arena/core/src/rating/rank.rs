//! Rank labels derived from rating via fixed thresholds.

/// Display tier for a rating. Derived, never stored authoritatively.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RankTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
    Grandmaster,
}

impl RankTier {
    /// Fixed lookup from rating to label.
    pub fn from_rating(rating: i32) -> Self {
        match rating {
            i32::MIN..=1_099 => Self::Bronze,
            1_100..=1_299 => Self::Silver,
            1_300..=1_499 => Self::Gold,
            1_500..=1_699 => Self::Platinum,
            1_700..=1_899 => Self::Diamond,
            1_900..=2_099 => Self::Master,
            _ => Self::Grandmaster,
        }
    }
}
