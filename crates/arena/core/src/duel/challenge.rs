//! The durable duel record and its progress accumulators.

use crate::config::EngineConfig;
use crate::ids::{AccountId, DuelId, Timestamp};

/// Lifecycle status of a duel challenge.
///
/// `Declined` and `Completed` are terminal; the record is frozen there and
/// kept as match history, never deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuelStatus {
    Pending,
    Active,
    Declined,
    Completed,
}

impl DuelStatus {
    /// Pending and active challenges block a new one between the same pair.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Active)
    }
}

/// Closed set of duel variants, each with its own win condition.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuelVariant {
    /// Direct combat: attack exchanges scored against the opponent's titan HP.
    TitanVsTitan,
    /// First side to accumulate the target distance wins.
    DistanceRace,
    /// Both sides run to the target distance; the faster accumulated time wins.
    SpeedDemon,
    /// First side to accumulate the target elevation gain wins.
    ElevationGrind,
}

impl DuelVariant {
    /// Whether this variant requires an explicit numeric target at creation.
    pub fn requires_target(self) -> bool {
        matches!(self, Self::DistanceRace | Self::SpeedDemon)
    }
}

/// Activity filter a duel may restrict progress to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivityKind {
    Run,
    Ride,
    Hike,
    Swim,
    Walk,
}

/// Additive progress from one synced workout.
///
/// All fields are unsigned: progress only ever accumulates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressDelta {
    pub distance_m: u64,
    pub duration_s: u64,
    pub elevation_m: u64,
}

impl ProgressDelta {
    pub fn is_empty(&self) -> bool {
        self.distance_m == 0 && self.duration_s == 0 && self.elevation_m == 0
    }

    /// Rejects deltas beyond the per-report limits before any mutation.
    pub fn validate(&self) -> Result<(), DuelError> {
        if self.is_empty() {
            return Err(DuelError::EmptyDelta);
        }
        if self.distance_m > EngineConfig::MAX_DISTANCE_DELTA_M
            || self.duration_s > EngineConfig::MAX_DURATION_DELTA_S
            || self.elevation_m > EngineConfig::MAX_ELEVATION_DELTA_M
        {
            return Err(DuelError::DeltaOutOfRange);
        }
        Ok(())
    }
}

/// Snapshot taken the instant a side reaches the duel target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinishSnapshot {
    /// Total duration accumulated when the target was reached.
    pub duration_s: u64,
    /// When the crossing progress report arrived.
    pub at: Timestamp,
}

/// One side's accumulators. Monotonically non-decreasing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuelProgress {
    pub distance_m: u64,
    pub duration_s: u64,
    pub elevation_m: u64,
    /// Damage scored against the opponent (titan duels only).
    pub combat_score: u32,
    /// This side's titan hit points, seeded at acceptance (titan duels only).
    pub titan_hp: u32,
    /// Set once the side reaches the duel target (speed duels only).
    pub finish: Option<FinishSnapshot>,
}

/// Which seat an account occupies in a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuelSide {
    Challenger,
    Defender,
}

impl DuelSide {
    pub fn opposite(self) -> Self {
        match self {
            Self::Challenger => Self::Defender,
            Self::Defender => Self::Challenger,
        }
    }
}

/// Structural errors raised by duel records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DuelError {
    #[error("an account cannot challenge itself")]
    SelfChallenge,

    #[error("this duel variant requires a numeric target")]
    MissingTarget,

    #[error("progress delta is empty")]
    EmptyDelta,

    #[error("progress delta exceeds the per-report limit")]
    DeltaOutOfRange,

    #[error("activity does not match the duel's filter")]
    ActivityMismatch,
}

/// Durable record of one duel between two accounts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuelChallenge {
    pub id: DuelId,
    pub challenger: AccountId,
    pub defender: AccountId,
    pub status: DuelStatus,
    pub variant: DuelVariant,
    /// When set, only progress from this activity counts.
    pub activity_filter: Option<ActivityKind>,
    /// Distance or elevation target in metres, depending on the variant.
    pub target: Option<u64>,
    pub challenger_progress: DuelProgress,
    pub defender_progress: DuelProgress,
    /// Set exactly once, when the duel completes.
    pub winner: Option<AccountId>,
    pub created_at: Timestamp,
    pub accepted_at: Option<Timestamp>,
    /// Acceptance plus the seven-day window; expiry enforcement is external.
    pub ends_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
}

impl DuelChallenge {
    /// Build a pending challenge. Fails on self-challenges and on variants
    /// whose target is required but absent.
    pub fn open(
        id: DuelId,
        challenger: AccountId,
        defender: AccountId,
        variant: DuelVariant,
        activity_filter: Option<ActivityKind>,
        target: Option<u64>,
        now: Timestamp,
    ) -> Result<Self, DuelError> {
        if challenger == defender {
            return Err(DuelError::SelfChallenge);
        }
        if variant.requires_target() && target.unwrap_or(0) == 0 {
            return Err(DuelError::MissingTarget);
        }
        Ok(Self {
            id,
            challenger,
            defender,
            status: DuelStatus::Pending,
            variant,
            activity_filter,
            target,
            challenger_progress: DuelProgress::default(),
            defender_progress: DuelProgress::default(),
            winner: None,
            created_at: now,
            accepted_at: None,
            ends_at: None,
            completed_at: None,
        })
    }

    /// The seat an account holds, if any.
    pub fn side_of(&self, account: AccountId) -> Option<DuelSide> {
        if account == self.challenger {
            Some(DuelSide::Challenger)
        } else if account == self.defender {
            Some(DuelSide::Defender)
        } else {
            None
        }
    }

    pub fn account_on(&self, side: DuelSide) -> AccountId {
        match side {
            DuelSide::Challenger => self.challenger,
            DuelSide::Defender => self.defender,
        }
    }

    pub fn progress(&self, side: DuelSide) -> &DuelProgress {
        match side {
            DuelSide::Challenger => &self.challenger_progress,
            DuelSide::Defender => &self.defender_progress,
        }
    }

    pub fn progress_mut(&mut self, side: DuelSide) -> &mut DuelProgress {
        match side {
            DuelSide::Challenger => &mut self.challenger_progress,
            DuelSide::Defender => &mut self.defender_progress,
        }
    }

    /// True when this record is the unresolved challenge between `a` and `b`,
    /// in either seat order.
    pub fn blocks_pair(&self, a: AccountId, b: AccountId) -> bool {
        self.status.is_open()
            && ((self.challenger == a && self.defender == b)
                || (self.challenger == b && self.defender == a))
    }

    /// Effective numeric target, applying the elevation default.
    pub fn target_metres(&self) -> u64 {
        match self.variant {
            DuelVariant::ElevationGrind => self
                .target
                .unwrap_or(EngineConfig::DEFAULT_ELEVATION_TARGET_M),
            _ => self.target.unwrap_or(0),
        }
    }

    /// Accumulate a progress delta onto one side.
    ///
    /// Purely additive, so concurrent reports commute regardless of arrival
    /// order. For speed duels, the first report that carries a side across
    /// the target freezes that side's finish snapshot; a finished side keeps
    /// accumulating but its snapshot never changes.
    pub fn apply_progress(&mut self, side: DuelSide, delta: ProgressDelta, now: Timestamp) {
        let target = self.target_metres();
        let variant = self.variant;
        let progress = self.progress_mut(side);

        progress.distance_m += delta.distance_m;
        progress.duration_s += delta.duration_s;
        progress.elevation_m += delta.elevation_m;

        if variant == DuelVariant::SpeedDemon
            && progress.finish.is_none()
            && progress.distance_m >= target
        {
            progress.finish = Some(FinishSnapshot {
                duration_s: progress.duration_s,
                at: now,
            });
        }
    }

    /// Add titan damage to one side's score.
    pub fn apply_attack(&mut self, side: DuelSide, damage: u32) {
        self.progress_mut(side).combat_score += damage;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn race(target: u64) -> DuelChallenge {
        DuelChallenge::open(
            DuelId(1),
            AccountId(10),
            AccountId(20),
            DuelVariant::DistanceRace,
            None,
            Some(target),
            Timestamp::new(0),
        )
        .unwrap()
    }

    #[test]
    fn self_challenge_is_rejected() {
        let err = DuelChallenge::open(
            DuelId(1),
            AccountId(5),
            AccountId(5),
            DuelVariant::DistanceRace,
            None,
            Some(10_000),
            Timestamp::new(0),
        )
        .unwrap_err();
        assert_eq!(err, DuelError::SelfChallenge);
    }

    #[test]
    fn distance_variants_require_a_target() {
        for variant in [DuelVariant::DistanceRace, DuelVariant::SpeedDemon] {
            let err = DuelChallenge::open(
                DuelId(1),
                AccountId(1),
                AccountId(2),
                variant,
                None,
                None,
                Timestamp::new(0),
            )
            .unwrap_err();
            assert_eq!(err, DuelError::MissingTarget);
        }
        // Elevation falls back to its default target.
        let duel = DuelChallenge::open(
            DuelId(1),
            AccountId(1),
            AccountId(2),
            DuelVariant::ElevationGrind,
            None,
            None,
            Timestamp::new(0),
        )
        .unwrap();
        assert_eq!(duel.target_metres(), 1_000);
    }

    #[test]
    fn progress_accumulates_additively() {
        let mut duel = race(10_000);
        let d1 = ProgressDelta {
            distance_m: 3_000,
            duration_s: 900,
            elevation_m: 40,
        };
        let d2 = ProgressDelta {
            distance_m: 2_500,
            duration_s: 700,
            elevation_m: 10,
        };
        duel.apply_progress(DuelSide::Challenger, d1, Timestamp::new(1));
        duel.apply_progress(DuelSide::Challenger, d2, Timestamp::new(2));
        let p = duel.progress(DuelSide::Challenger);
        assert_eq!(p.distance_m, 5_500);
        assert_eq!(p.duration_s, 1_600);
        assert_eq!(p.elevation_m, 50);
        // The other seat is untouched.
        assert_eq!(duel.progress(DuelSide::Defender).distance_m, 0);
    }

    #[test]
    fn speed_demon_freezes_finish_snapshot_at_crossing() {
        let mut duel = race(10_000);
        duel.variant = DuelVariant::SpeedDemon;

        duel.apply_progress(
            DuelSide::Challenger,
            ProgressDelta {
                distance_m: 9_000,
                duration_s: 2_000,
                elevation_m: 0,
            },
            Timestamp::new(100),
        );
        assert!(duel.challenger_progress.finish.is_none());

        duel.apply_progress(
            DuelSide::Challenger,
            ProgressDelta {
                distance_m: 1_000,
                duration_s: 300,
                elevation_m: 0,
            },
            Timestamp::new(200),
        );
        let finish = duel.challenger_progress.finish.unwrap();
        assert_eq!(finish.duration_s, 2_300);
        assert_eq!(finish.at, Timestamp::new(200));

        // Further reports keep accumulating but never move the snapshot.
        duel.apply_progress(
            DuelSide::Challenger,
            ProgressDelta {
                distance_m: 5_000,
                duration_s: 1_000,
                elevation_m: 0,
            },
            Timestamp::new(300),
        );
        assert_eq!(duel.challenger_progress.finish.unwrap(), finish);
        assert_eq!(duel.challenger_progress.distance_m, 15_000);
    }

    #[test]
    fn blocks_pair_is_unordered_and_only_while_open() {
        let mut duel = race(10_000);
        assert!(duel.blocks_pair(AccountId(10), AccountId(20)));
        assert!(duel.blocks_pair(AccountId(20), AccountId(10)));
        assert!(!duel.blocks_pair(AccountId(10), AccountId(30)));

        duel.status = DuelStatus::Completed;
        assert!(!duel.blocks_pair(AccountId(10), AccountId(20)));
    }

    #[test]
    fn delta_validation_rejects_empty_and_oversized() {
        assert_eq!(
            ProgressDelta::default().validate(),
            Err(DuelError::EmptyDelta)
        );
        let oversized = ProgressDelta {
            distance_m: EngineConfig::MAX_DISTANCE_DELTA_M + 1,
            duration_s: 0,
            elevation_m: 0,
        };
        assert_eq!(oversized.validate(), Err(DuelError::DeltaOutOfRange));
        let fine = ProgressDelta {
            distance_m: 5_000,
            duration_s: 1_200,
            elevation_m: 30,
        };
        assert_eq!(fine.validate(), Ok(()));
    }
}
