//! Resolution of local wall-clock times to absolute instants across DST transitions.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, SlotError};

/// Longest look-back when searching for the offset in force before a gap.
const GAP_PROBE_LIMIT_MINUTES: i64 = 24 * 60;
const GAP_PROBE_STEP_MINUTES: i64 = 15;

/// Resolve a local wall-clock datetime in `tz` to a UTC instant.
///
/// - Unambiguous times map directly.
/// - Ambiguous times (fall back, the hour happens twice) take the earlier instant.
/// - Times inside a spring-forward gap are shifted forward by the gap length,
///   i.e. they are read with the offset that was in force just before the gap.
///   In `America/New_York`, 02:30 on the spring-forward day resolves to 03:30 EDT.
///
/// # Errors
/// Returns `SlotError::InvalidTime` if no offset can be found before a gap.
pub fn resolve_local(tz: &Tz, local: NaiveDateTime) -> Result<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            let before = (1..=GAP_PROBE_LIMIT_MINUTES / GAP_PROBE_STEP_MINUTES)
                .map(|step| local - Duration::minutes(step * GAP_PROBE_STEP_MINUTES))
                .find_map(|probe| tz.offset_from_local_datetime(&probe).earliest())
                .ok_or_else(|| {
                    SlotError::InvalidTime(format!("{} does not exist in {}", local, tz))
                })?;
            let offset_seconds = i64::from(before.fix().local_minus_utc());
            Ok((local - Duration::seconds(offset_seconds)).and_utc())
        }
    }
}
