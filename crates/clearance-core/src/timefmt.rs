//! Date and time display helpers.
//!
//! Centralized formatting rules for submission timestamps:
//! - Deadlines: long form ("March 05, 2026")
//! - Section activity: short form ("Mar 05, 2026")
//! - List freshness: relative form ("3 days ago", "in 2 hours")
//!
//! Parsing is deliberately forgiving: the backend emits a mix of RFC 3339,
//! naive datetimes, and bare dates depending on which service wrote the field.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;
/// Mean Gregorian month, same constant date libraries use for strict distances.
const MONTH: i64 = 2_629_746;
const YEAR: i64 = 31_556_952;

/// Parse a backend timestamp string into UTC.
///
/// Accepts RFC 3339 (with offset or `Z`), naive `YYYY-MM-DDTHH:MM:SS[.frac]`,
/// and bare `YYYY-MM-DD`. Returns `None` for anything else.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }

    None
}

/// Format as a long date: "March 05, 2026".
pub fn format_long_date(ts: DateTime<Utc>) -> String {
    ts.format("%B %d, %Y").to_string()
}

/// Format as a short date: "Mar 05, 2026".
pub fn format_short_date(ts: DateTime<Utc>) -> String {
    ts.format("%b %d, %Y").to_string()
}

/// Format a strict single-unit relative time ("3 days ago", "in 2 hours").
///
/// `now` is injected so callers stay referentially transparent; display code
/// passes `Utc::now()`. Timestamps within five seconds of `now` render as
/// "just now". Larger distances pick the largest whole unit and round.
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(then).num_seconds();
    let magnitude = diff.abs();

    if magnitude <= 5 {
        return "just now".to_string();
    }

    let (count, unit) = if magnitude < MINUTE {
        (magnitude, "second")
    } else if magnitude < HOUR {
        (div_round(magnitude, MINUTE), "minute")
    } else if magnitude < DAY {
        (div_round(magnitude, HOUR), "hour")
    } else if magnitude < MONTH {
        (div_round(magnitude, DAY), "day")
    } else if magnitude < YEAR {
        (div_round(magnitude, MONTH), "month")
    } else {
        (div_round(magnitude, YEAR), "year")
    };

    let plural = if count == 1 { "" } else { "s" };
    if diff >= 0 {
        format!("{} {}{} ago", count, unit, plural)
    } else {
        format!("in {} {}{}", count, unit, plural)
    }
}

fn div_round(value: i64, divisor: i64) -> i64 {
    (value + divisor / 2) / divisor
}
