//! Player actions accepted by the combat resolver.

/// One action per resolver call, chosen by the player.
///
/// Parses from the wire form used by clients (`"ATTACK"`, `"DEFEND"`, ...);
/// unknown strings are a validation failure at the API boundary.
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
pub enum CombatAction {
    /// Basic strike; builds one point of ultimate charge.
    Attack,
    /// Brace: the boss's retaliation this turn is partially absorbed.
    Defend,
    /// Restore a fraction of max HP; the boss still retaliates.
    Heal,
    /// Charged strike at a damage multiple; resets the charge counter.
    Ultimate,
}
