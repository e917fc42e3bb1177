//! Beacon record URL construction.

use beacon_types::TimeRange;
use chrono::{DateTime, Utc};

/// Base URL for beacon records.
pub const BASE_URL: &str = "https://beacon.nist.gov/rest/record";

/// Builds the URL for the record published at `minute`.
///
/// URL format: `{base}/{EPOCH_SECONDS}`
///
/// # Example
///
/// ```
/// use beacon_fetch::url::{BASE_URL, record_url};
/// use chrono::DateTime;
///
/// let minute = DateTime::from_timestamp(1_483_746_000, 0).unwrap();
/// assert_eq!(
///     record_url(BASE_URL, minute),
///     "https://beacon.nist.gov/rest/record/1483746000"
/// );
/// ```
#[must_use]
pub fn record_url(base: &str, minute: DateTime<Utc>) -> String {
    format!("{}/{}", base.trim_end_matches('/'), minute.timestamp())
}

/// Returns the record URLs for every minute between `from` and `to`.
///
/// Both timestamps are truncated to the minute and both ends are inclusive.
/// URLs come out in increasing timestamp order; if `from` is after `to` the
/// sequence is empty.
pub fn generate_urls(from: DateTime<Utc>, to: DateTime<Utc>) -> impl Iterator<Item = String> {
    generate_urls_with_base(BASE_URL, TimeRange::new(from, to))
}

/// Like [`generate_urls`], against a different base URL.
pub fn generate_urls_with_base(
    base: &str,
    range: TimeRange,
) -> impl Iterator<Item = String> + '_ {
    range.minutes().map(move |minute| record_url(base, minute))
}

/// Extracts the record minute from a record URL.
#[must_use]
pub fn minute_from_url(url: &str) -> Option<DateTime<Utc>> {
    let last = url.trim_end_matches('/').rsplit('/').next()?;
    DateTime::from_timestamp(last.parse().ok()?, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn urls(from: i64, to: i64) -> Vec<String> {
        generate_urls(at(from), at(to)).collect()
    }

    #[test]
    fn test_generate_urls_single_timestamp() {
        assert_eq!(
            urls(1_483_746_016, 1_483_746_016),
            vec!["https://beacon.nist.gov/rest/record/1483746000"]
        );
    }

    #[test]
    fn test_generate_urls_same_minute() {
        assert_eq!(
            urls(1_483_746_001, 1_483_746_059),
            vec!["https://beacon.nist.gov/rest/record/1483746000"]
        );
    }

    #[test]
    fn test_generate_urls_crossing_minute() {
        assert_eq!(
            urls(1_483_746_001, 1_483_746_061),
            vec![
                "https://beacon.nist.gov/rest/record/1483746000",
                "https://beacon.nist.gov/rest/record/1483746060",
            ]
        );
        assert_eq!(
            urls(1_483_746_000, 1_483_746_119),
            vec![
                "https://beacon.nist.gov/rest/record/1483746000",
                "https://beacon.nist.gov/rest/record/1483746060",
            ]
        );
    }

    #[test]
    fn test_generate_urls_three_minutes() {
        assert_eq!(
            urls(1_483_746_001, 1_483_746_121),
            vec![
                "https://beacon.nist.gov/rest/record/1483746000",
                "https://beacon.nist.gov/rest/record/1483746060",
                "https://beacon.nist.gov/rest/record/1483746120",
            ]
        );
    }

    #[test]
    fn test_generate_urls_reversed() {
        assert!(urls(1_483_746_121, 1_483_746_001).is_empty());
    }

    #[test]
    fn test_generate_urls_before_min_epoch() {
        let generated = urls(0, 60);
        assert_eq!(generated.len(), 2);
        assert_eq!(generated[0], "https://beacon.nist.gov/rest/record/0");
    }

    #[test]
    fn test_custom_base_trailing_slash() {
        let range = TimeRange::single_minute(at(1_483_746_030));
        let generated: Vec<_> = generate_urls_with_base("http://localhost:8080/rest/record/", range)
            .collect();
        assert_eq!(generated, vec!["http://localhost:8080/rest/record/1483746000"]);
    }

    #[test]
    fn test_minute_from_url() {
        let url = "https://beacon.nist.gov/rest/record/1483746060";
        assert_eq!(minute_from_url(url), Some(at(1_483_746_060)));
        assert_eq!(minute_from_url("https://beacon.nist.gov/rest/record/"), None);
        assert_eq!(minute_from_url("https://fake/abc"), None);
    }
}
