/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Rating distance used by matchmaking to window candidates.
    pub matchmaking_window: i32,
}

impl EngineConfig {
    // ===== combat tuning =====
    /// Hit points granted per point of vitality.
    pub const HP_PER_VITALITY: u32 = 10;
    /// Flat hit-point bonus granted per player level.
    pub const HP_PER_LEVEL: u32 = 5;
    /// Multiplier applied to the offense attribute for a basic attack.
    pub const ATTACK_SCALE: u32 = 2;
    /// Damage multiplier of an ultimate relative to a basic attack.
    pub const ULTIMATE_SCALE: f64 = 2.5;
    /// Attacks required before an ultimate is charged.
    pub const ULTIMATE_CHARGE_REQUIRED: u8 = 3;
    /// Fraction of max HP restored by a heal action.
    pub const HEAL_FRACTION: f64 = 0.25;
    /// Fraction of retaliation damage absorbed while defending.
    pub const GUARD_FRACTION: f64 = 0.5;
    /// Narrative log entries retained per combat state.
    pub const MAX_COMBAT_LOG: usize = 50;

    // ===== duel tuning =====
    /// Days a duel stays open once accepted.
    pub const DUEL_WINDOW_DAYS: i64 = 7;
    /// Default elevation target (metres) when an elevation duel sets none.
    pub const DEFAULT_ELEVATION_TARGET_M: u64 = 1_000;
    /// Largest distance delta (metres) accepted in one progress report.
    pub const MAX_DISTANCE_DELTA_M: u64 = 500_000;
    /// Largest duration delta (seconds) accepted in one progress report.
    pub const MAX_DURATION_DELTA_S: u64 = 86_400;
    /// Largest elevation delta (metres) accepted in one progress report.
    pub const MAX_ELEVATION_DELTA_M: u64 = 10_000;

    // ===== rating tuning =====
    /// Rating assigned to a freshly created ladder row.
    pub const BASE_RATING: i32 = 1_200;
    /// K-factor below the high-rating threshold.
    pub const K_STANDARD: f64 = 32.0;
    /// K-factor at or above the high-rating threshold.
    pub const K_HIGH: f64 = 16.0;
    /// Rating at which the smaller K-factor takes over.
    pub const K_THRESHOLD: i32 = 2_000;
    /// Ratings never drop below this floor when a transaction commits.
    pub const RATING_FLOOR: i32 = 0;

    // ===== season tuning =====
    /// Length of a bootstrapped season.
    pub const SEASON_LENGTH_DAYS: i64 = 28;

    // ===== reward tuning =====
    /// Experience granted per boss level on a PvE victory.
    pub const XP_PER_BOSS_LEVEL: u64 = 50;
    /// Gold granted per boss level on a PvE victory.
    pub const GOLD_PER_BOSS_LEVEL: u64 = 25;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MATCHMAKING_WINDOW: i32 = 200;

    pub fn new() -> Self {
        Self {
            matchmaking_window: Self::DEFAULT_MATCHMAKING_WINDOW,
        }
    }

    pub fn with_matchmaking_window(matchmaking_window: i32) -> Self {
        Self { matchmaking_window }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
