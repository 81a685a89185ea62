//! Best-effort date/time parsing without a fixed format

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Date-time layouts, tried in order. Month-first wins over day-first.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M",
    "%m/%d/%y %H:%M:%S%.f",
    "%m/%d/%y %H:%M",
];

/// Offset-bearing layouts not covered by RFC 3339
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%m/%d/%y",
];

/// Parse `text` as a date or date-time. Offsets are converted to UTC.
/// Returns `None` when no known layout matches.
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let s = text.trim();
    // Shortest accepted date is "1/1/24"; plain numbers are never dates
    if s.len() < 6 || s.parse::<f64>().is_ok() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_utc());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_utc());
        }
    }

    DATETIME_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .find(|dt| plausible_year(dt.year()))
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .filter_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .find(|d| plausible_year(d.year()))
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn plausible_year(year: i32) -> bool {
    (1000..=9999).contains(&year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_iso_dates() {
        assert_eq!(parse_datetime("2024-01-05"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_datetime("2024/1/5"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_datetime("2024.01.05"), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn test_month_first_preferred() {
        assert_eq!(parse_datetime("03/04/2024"), Some(ymd(2024, 3, 4)));
        // Day 25 cannot be a month, so day-first applies
        assert_eq!(parse_datetime("25/04/2024"), Some(ymd(2024, 4, 25)));
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(parse_datetime("1/5/24"), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(parse_datetime("Jan 5, 2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_datetime("January 5, 2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_datetime("5 March 2024"), Some(ymd(2024, 3, 5)));
    }

    #[test]
    fn test_datetimes() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(parse_datetime("2024-01-05 10:30:00"), Some(expected));
        assert_eq!(parse_datetime("2024-01-05T10:30"), Some(expected));
        assert_eq!(parse_datetime("2024-01-05T12:30:00+02:00"), Some(expected));
        assert_eq!(parse_datetime("2024-01-05T10:30:00Z"), Some(expected));
    }

    #[test]
    fn test_rejects_non_dates() {
        assert_eq!(parse_datetime("hello"), None);
        assert_eq!(parse_datetime("2024-13-01"), None);
        assert_eq!(parse_datetime("12345"), None);
        assert_eq!(parse_datetime("3.14159"), None);
        assert_eq!(parse_datetime("20240105"), None);
        assert_eq!(parse_datetime(""), None);
        assert_eq!(parse_datetime("ORDER-2024-001"), None);
    }
}
