//! Helpers for the textual timestamps stored alongside every row.
//!
//! Timestamps are persisted as plain strings rather than native date types.
//! Anything that compares or formats them re-parses the string here; a value
//! that cannot be parsed is displayed verbatim.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// Storage format for `created_at` / `updated_at` (always UTC).
pub const DB_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Storage format for date-only values.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Display format with date and time.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Display format with the date only.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Current UTC time in [`DB_FORMAT`].
pub fn now_string() -> String {
    Utc::now().format(DB_FORMAT).to_string()
}

/// Current UTC date in [`DATE_FORMAT`].
pub fn today_string() -> String {
    Utc::now().format(DATE_FORMAT).to_string()
}

/// Parse a stored timestamp.
///
/// Accepts the full [`DB_FORMAT`] and the date-only [`DATE_FORMAT`]
/// (interpreted as midnight UTC). Returns `None` for anything else.
pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    if value.contains('T') && value.ends_with('Z') {
        return NaiveDateTime::parse_from_str(value, DB_FORMAT)
            .ok()
            .map(|dt| dt.and_utc());
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Format for display as `dd/mm/YYYY HH:MM`.
pub fn format_for_display(value: &str) -> String {
    match parse(value) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => value.to_string(),
    }
}

/// Format for display as `dd/mm/YYYY`.
pub fn format_date_only(value: &str) -> String {
    match parse(value) {
        Some(dt) => dt.format(DISPLAY_DATE_FORMAT).to_string(),
        None => value.to_string(),
    }
}

/// Relative label for `value` measured against the current time.
pub fn format_relative(value: &str) -> String {
    format_relative_at(value, Utc::now())
}

/// Relative label for `value` measured against `now`.
///
/// Future timestamps are labelled "Today".
pub fn format_relative_at(value: &str, now: DateTime<Utc>) -> String {
    let Some(dt) = parse(value) else {
        return value.to_string();
    };

    let days = (now - dt).num_days();
    match days {
        i64::MIN..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => format!("{} weeks ago", days / 7),
        30..=364 => dt.format("%b %Y").to_string(),
        _ => format!("{} years ago", days / 365),
    }
}

/// Whether `value` falls on the same calendar day as `now`.
pub fn is_today_at(value: &str, now: DateTime<Utc>) -> bool {
    parse(value).is_some_and(|dt| dt.date_naive() == now.date_naive())
}

/// Whether `value` falls in the same ISO week as `now`.
pub fn is_this_week_at(value: &str, now: DateTime<Utc>) -> bool {
    parse(value).is_some_and(|dt| dt.iso_week() == now.iso_week())
}

pub fn is_today(value: &str) -> bool {
    is_today_at(value, Utc::now())
}

pub fn is_this_week(value: &str) -> bool {
    is_this_week_at(value, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn parses_full_and_date_only_values() {
        assert_eq!(
            parse("2024-01-15T10:30:00Z"),
            Some(at(2024, 1, 15, 10) + chrono::Duration::minutes(30))
        );
        assert_eq!(parse("2024-01-01"), Some(at(2024, 1, 1, 0)));
        assert_eq!(parse("yesterday"), None);
        assert_eq!(parse("2024-13-01"), None);
    }

    #[test]
    fn now_string_round_trips() {
        assert!(parse(&now_string()).is_some());
        assert!(parse(&today_string()).is_some());
    }

    #[test]
    fn display_formats() {
        assert_eq!(format_for_display("2024-01-15T10:30:00Z"), "15/01/2024 10:30");
        assert_eq!(format_date_only("2024-01-15T10:30:00Z"), "15/01/2024");
        assert_eq!(format_for_display("not a date"), "not a date");
    }

    #[test]
    fn relative_labels() {
        let now = at(2024, 6, 20, 12);
        assert_eq!(format_relative_at("2024-06-20T08:00:00Z", now), "Today");
        assert_eq!(format_relative_at("2024-06-19T08:00:00Z", now), "Yesterday");
        assert_eq!(format_relative_at("2024-06-16T08:00:00Z", now), "4 days ago");
        assert_eq!(format_relative_at("2024-06-01T08:00:00Z", now), "2 weeks ago");
        assert_eq!(format_relative_at("2024-02-10T08:00:00Z", now), "Feb 2024");
        assert_eq!(format_relative_at("2021-06-01T08:00:00Z", now), "3 years ago");
        assert_eq!(format_relative_at("2024-07-01T08:00:00Z", now), "Today");
        assert_eq!(format_relative_at("garbage", now), "garbage");
    }

    #[test]
    fn same_day_and_week() {
        // 2024-06-20 is a Thursday.
        let now = at(2024, 6, 20, 12);
        assert!(is_today_at("2024-06-20T01:00:00Z", now));
        assert!(!is_today_at("2024-06-19T23:00:00Z", now));
        assert!(is_this_week_at("2024-06-17", now));
        assert!(!is_this_week_at("2024-06-16", now));
        assert!(!is_this_week_at("garbage", now));
    }
}
