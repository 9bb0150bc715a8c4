//! Formatting utilities for human-readable output
//!
//! Provides the fixed, non-localized formats shown in the detail view.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Bytes per megabyte constant
pub const MB: u64 = 1024 * 1024;

/// Display format for repository timestamps
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a byte count as megabytes with two decimals (e.g., "2.00 MB")
///
/// Halfway values round up, so 131072 bytes (0.125 MB) shows as
/// "0.13 MB". A missing size is shown as zero. Zero itself is a real value
/// and formats the same way.
pub fn format_megabytes(bytes: Option<u64>) -> String {
    let mb = u128::from(MB);
    let hundredths = (u128::from(bytes.unwrap_or(0)) * 100 + mb / 2) / mb;
    format!("{}.{:02} MB", hundredths / 100, hundredths % 100)
}

/// Parse a repository timestamp
///
/// Accepts RFC 3339 (`2021-03-04T10:15:30.000Z`, with any offset) and
/// offset-less ISO timestamps, which are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format a repository timestamp as `YYYY-MM-DD HH:mm:ss` in UTC
///
/// Missing or unparseable timestamps become an empty string.
pub fn format_timestamp(value: Option<&str>) -> String {
    value
        .and_then(parse_timestamp)
        .map(|dt| dt.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Join the repository base URL and a server-relative path
///
/// Plain concatenation; only a trailing slash on the base is dropped.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_megabytes() {
        assert_eq!(format_megabytes(Some(2_097_152)), "2.00 MB");
        assert_eq!(format_megabytes(Some(0)), "0.00 MB");
        assert_eq!(format_megabytes(None), "0.00 MB");
        assert_eq!(format_megabytes(Some(1_572_864)), "1.50 MB");
        assert_eq!(format_megabytes(Some(123_456)), "0.12 MB");
    }

    #[test]
    fn test_format_megabytes_rounds_half_up() {
        assert_eq!(format_megabytes(Some(131_072)), "0.13 MB");
        assert_eq!(format_megabytes(Some(655_360)), "0.63 MB");
        assert_eq!(format_megabytes(Some(5_242)), "0.00 MB");
        assert_eq!(format_megabytes(Some(5_243)), "0.01 MB");
        assert_eq!(format_megabytes(Some(u64::MAX)), "17592186044416.00 MB");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(Some("2021-03-04T10:15:30.000Z")),
            "2021-03-04 10:15:30"
        );
        assert_eq!(
            format_timestamp(Some("2021-03-04T12:15:30+02:00")),
            "2021-03-04 10:15:30"
        );
        assert_eq!(
            format_timestamp(Some("2021-03-04T10:15:30")),
            "2021-03-04 10:15:30"
        );
    }

    #[test]
    fn test_format_timestamp_degrades_to_empty() {
        assert_eq!(format_timestamp(None), "");
        assert_eq!(format_timestamp(Some("")), "");
        assert_eq!(format_timestamp(Some("yesterday")), "");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://demo.example.com", "/Root/a.jpg"),
            "https://demo.example.com/Root/a.jpg"
        );
        assert_eq!(
            join_url("https://demo.example.com/", "/Root/a.jpg"),
            "https://demo.example.com/Root/a.jpg"
        );
        assert_eq!(
            join_url("https://demo.example.com", "binaryhandler.ashx?id=1"),
            "https://demo.example.combinaryhandler.ashx?id=1"
        );
    }
}
