//! Timezone-of-day conversion for lesson schedules.
//!
//! Course times are stored as wall-clock `"HH:MM"` strings in the course's
//! own zone. Display and filtering need those times in the viewer's zone,
//! resolved for a concrete reference date so DST transitions are honored
//! (the same named zone has different offsets in January and July).
//!
//! Conversion failures degrade to the unconverted input: an unknown zone id
//! or a malformed time must never take down a render path.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use chrono_tz::Tz;

const MINUTES_PER_DAY: i32 = 24 * 60;

/// Check whether `id` names a known IANA timezone, without side effects.
#[must_use]
pub fn is_valid_timezone(id: &str) -> bool {
    id.parse::<Tz>().is_ok()
}

/// Convert a wall-clock time between two IANA zones for a reference date.
///
/// `time` is `"HH:MM"` in `from_zone`; the result is `"HH:MM"` in `to_zone`,
/// wrapped into the 24-hour clock (the caller interprets day rollover if it
/// matters). Offsets are resolved for `reference_date`, not "today".
///
/// If either zone id is unknown or the time string is malformed, the input
/// is returned unchanged.
#[must_use]
pub fn convert_time_of_day(
    time: &str,
    from_zone: &str,
    to_zone: &str,
    reference_date: NaiveDate,
) -> String {
    let (Some(minutes), Ok(source), Ok(target)) = (
        parse_minutes(time),
        from_zone.parse::<Tz>(),
        to_zone.parse::<Tz>(),
    ) else {
        return time.to_string();
    };

    let source_offset = offset_minutes(source, reference_date);
    let target_offset = offset_minutes(target, reference_date);

    let converted = (minutes - source_offset + target_offset).rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", converted / 60, converted % 60)
}

/// UTC offset of `zone` in signed minutes, resolved at noon UTC of the
/// reference date. Noon keeps the probe away from the transition hours
/// around local midnight.
fn offset_minutes(zone: Tz, reference_date: NaiveDate) -> i32 {
    let probe = NaiveDateTime::new(reference_date, NaiveTime::MIN) + Duration::hours(12);
    zone.offset_from_utc_datetime(&probe)
        .fix()
        .local_minus_utc()
        / 60
}

/// Parse `"HH:MM"` into minutes since midnight. Rejects out-of-range parts.
fn parse_minutes(time: &str) -> Option<i32> {
    let (hours, minutes) = time.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    Some(hours * 60 + minutes)
}
