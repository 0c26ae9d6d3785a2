//! Time utility functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Offset-free datetime layouts accepted for stored timestamps
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a stored timestamp string into its calendar date.
///
/// Accepts RFC 3339 / ISO 8601 with offset, `YYYY-MM-DD HH:MM:SS` (optionally
/// with fractional seconds or a `T` separator) and bare `YYYY-MM-DD`. The date
/// is taken as written; offsets are not converted to UTC.
pub fn parse_record_date(ts: &str) -> Option<NaiveDate> {
    let ts = ts.trim();
    if ts.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.date_naive());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(ts, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(ts, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_record_date_rfc3339() {
        assert_eq!(
            parse_record_date("2024-01-15T10:30:00Z"),
            Some(ymd(2024, 1, 15))
        );
    }

    #[test]
    fn test_parse_record_date_keeps_local_date_with_offset() {
        // 23:30 at +05:00 is still the 15th where it was recorded
        assert_eq!(
            parse_record_date("2024-01-15T23:30:00+05:00"),
            Some(ymd(2024, 1, 15))
        );
    }

    #[test]
    fn test_parse_record_date_sql_datetime() {
        assert_eq!(
            parse_record_date("2024-02-10 08:00:00"),
            Some(ymd(2024, 2, 10))
        );
        assert_eq!(
            parse_record_date("2024-02-10 08:00:00.123456"),
            Some(ymd(2024, 2, 10))
        );
    }

    #[test]
    fn test_parse_record_date_bare_date() {
        assert_eq!(parse_record_date(" 2024-03-15 "), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn test_parse_record_date_invalid() {
        assert_eq!(parse_record_date(""), None);
        assert_eq!(parse_record_date("not-a-timestamp"), None);
        assert_eq!(parse_record_date("2024-13-01"), None);
        assert_eq!(parse_record_date("15/01/2024"), None);
    }
}
