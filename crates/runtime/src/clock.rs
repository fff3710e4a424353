//! Wall-clock acquisition at the runtime boundary.

use arena_core::Timestamp;

/// Current wall-clock instant as an engine timestamp.
///
/// The only place the runtime reads a clock; everything below takes the
/// instant as a parameter.
pub(crate) fn unix_now() -> Timestamp {
    Timestamp::new(chrono::Utc::now().timestamp())
}
