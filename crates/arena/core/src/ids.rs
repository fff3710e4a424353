//! Identifier newtypes shared across the engine.

use core::fmt;

/// Unique identifier for a player account.
///
/// Resolution of an authenticated account to an `AccountId` happens outside
/// this engine; every entry point receives one already resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "acct#{}", self.0)
    }
}

/// Unique identifier for a duel challenge, assigned by the duel store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuelId(pub u64);

impl fmt::Display for DuelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duel#{}", self.0)
    }
}

/// Unique identifier for a competitive season.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonId(pub u32);

impl fmt::Display for SeasonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "season#{}", self.0)
    }
}

/// Unique identifier for an immutable match record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchId(pub u64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "match#{}", self.0)
    }
}

/// Wall-clock instant as unix seconds.
///
/// The engine never reads a clock itself; callers acquire the current time at
/// the boundary and thread it through, which keeps every rule deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub const SECONDS_PER_DAY: i64 = 86_400;

    pub fn new(unix_seconds: i64) -> Self {
        Self(unix_seconds)
    }

    /// This instant advanced by whole days.
    pub fn plus_days(self, days: i64) -> Self {
        Self(self.0 + days * Self::SECONDS_PER_DAY)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_day_arithmetic() {
        let t = Timestamp::new(1_000);
        assert_eq!(t.plus_days(7), Timestamp::new(1_000 + 7 * 86_400));
        assert_eq!(t.plus_days(0), t);
    }

    #[test]
    fn display_formats() {
        assert_eq!(AccountId(7).to_string(), "acct#7");
        assert_eq!(DuelId(3).to_string(), "duel#3");
        assert_eq!(SeasonId(1).to_string(), "season#1");
    }
}
