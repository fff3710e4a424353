//! Competitive seasons: fixed calendar windows for the rating ladder.

use crate::config::EngineConfig;
use crate::ids::{SeasonId, Timestamp};

/// One competitive season.
///
/// While a season is running, every rating lookup resolves to it. Boundary
/// policy (reset or carry-over) is external to this engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PvpSeason {
    pub id: SeasonId,
    pub name: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub active: bool,
}

impl PvpSeason {
    /// Bootstrap the `ordinal`-th season (1-based) starting now, with the
    /// standard duration.
    pub fn bootstrap(id: SeasonId, ordinal: u32, now: Timestamp) -> Self {
        Self {
            id,
            name: format!("Season {ordinal}"),
            starts_at: now,
            ends_at: now.plus_days(EngineConfig::SEASON_LENGTH_DAYS),
            active: true,
        }
    }

    /// Whether this season brackets the given instant.
    pub fn contains(&self, now: Timestamp) -> bool {
        self.active && self.starts_at <= now && now < self.ends_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_spans_the_standard_window() {
        let season = PvpSeason::bootstrap(SeasonId(1), 1, Timestamp::new(1_000));
        assert_eq!(season.name, "Season 1");
        assert!(season.active);
        assert_eq!(
            season.ends_at,
            Timestamp::new(1_000 + 28 * Timestamp::SECONDS_PER_DAY)
        );
    }

    #[test]
    fn contains_is_half_open() {
        let season = PvpSeason::bootstrap(SeasonId(1), 1, Timestamp::new(1_000));
        assert!(season.contains(Timestamp::new(1_000)));
        assert!(season.contains(season.ends_at.plus_days(-1)));
        assert!(!season.contains(season.ends_at));
        assert!(!season.contains(Timestamp::new(999)));
    }

    #[test]
    fn inactive_season_never_contains() {
        let mut season = PvpSeason::bootstrap(SeasonId(1), 1, Timestamp::new(0));
        season.active = false;
        assert!(!season.contains(Timestamp::new(10)));
    }
}
