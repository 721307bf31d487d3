use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use crate::error::AppError;

/// Format used by `datetime-local` form inputs.
pub const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub fn to_local_input_format(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format(LOCAL_INPUT_FORMAT).to_string()
}

/// Interprets `value` as wall-clock time in `tz` and returns the instant.
///
/// The offset is discovered for the specific date by comparing the wall clock
/// of a trial instant in `tz` against UTC. A second pass at the corrected
/// instant picks up a DST transition that falls between the two. Wall-clock
/// times skipped by spring-forward resolve with the daylight offset (one hour
/// earlier on the standard clock); repeated times at fall-back resolve to the
/// earlier occurrence.
pub fn from_local_input_format(value: &str, tz: Tz) -> Result<DateTime<Utc>, AppError> {
    let invalid = || AppError::Validation(format!("Invalid local date/time '{}'", value));

    let wall = NaiveDateTime::parse_from_str(value.trim(), LOCAL_INPUT_FORMAT)
        .map_err(|_| invalid())?;

    // Offsets never exceed a day; keep the trial instants inside chrono's range.
    let margin = TimeDelta::days(1);
    if wall.checked_sub_signed(margin).is_none() || wall.checked_add_signed(margin).is_none() {
        return Err(invalid());
    }

    let first = utc_offset_at(wall.and_utc(), tz);
    let candidate = wall.checked_sub_signed(first).ok_or_else(invalid)?.and_utc();

    let second = utc_offset_at(candidate, tz);
    if second == first {
        return Ok(candidate);
    }
    Ok(wall.checked_sub_signed(second).ok_or_else(invalid)?.and_utc())
}

/// Accepts the local input format (in `tz`) or an RFC 3339 timestamp.
pub fn parse_form_datetime(value: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    from_local_input_format(trimmed, tz).ok()
}

fn utc_offset_at(instant: DateTime<Utc>, tz: Tz) -> TimeDelta {
    instant.with_timezone(&tz).naive_local() - instant.naive_utc()
}

/// "October 19, 2026"
pub fn format_long_date(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%B %-d, %Y").to_string()
}

/// "Oct 19"
pub fn format_short_date(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%b %-d").to_string()
}

/// "7:30 PM"
pub fn format_clock_time(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%-I:%M %p").to_string()
}

/// "7:00 PM to 9:00 PM PT"
pub fn format_time_range(start: DateTime<Utc>, end: DateTime<Utc>, tz: Tz) -> String {
    format!(
        "{} to {} {}",
        format_clock_time(start, tz),
        format_clock_time(end, tz),
        zone_label(tz)
    )
}

fn zone_label(tz: Tz) -> &'static str {
    match tz.name() {
        "America/Los_Angeles" => "PT",
        "America/Denver" => "MT",
        "America/Chicago" => "CT",
        "America/New_York" => "ET",
        other => other,
    }
}
