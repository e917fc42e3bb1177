//! Benchmark fixtures for the beacon pipeline.

use beacon_types::TimeRange;
use chrono::{DateTime, TimeDelta, Utc};

/// Start of the fixture ranges (2017-01-06 23:40 UTC).
pub const FIXTURE_START: i64 = 1_483_746_000;

/// Returns a range covering `minutes` whole minutes from [`FIXTURE_START`].
pub fn fixture_range(minutes: i64) -> TimeRange {
    let start = DateTime::<Utc>::from_timestamp(FIXTURE_START, 0).unwrap_or_default();
    TimeRange::new(start, start + TimeDelta::minutes(minutes - 1))
}

/// Returns a record document shaped like the ones the service publishes.
pub fn fixture_record(timestamp: i64) -> String {
    let hex = "3E3F13AB4786C101BEFE153B25F40490821B78B6AA77C5E76A2C912073A91866";
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<record xmlns="http://beacon.nist.gov/record/0.1/">"#,
            "<version>Version 1.0</version><frequency>60</frequency>",
            "<timeStamp>{ts}</timeStamp><seedValue>{hex}{hex}</seedValue>",
            "<previousOutputValue>{hex}{hex}</previousOutputValue>",
            "<signatureValue>{hex}{hex}{hex}{hex}{hex}{hex}{hex}{hex}</signatureValue>",
            "<outputValue>{hex}{hex}</outputValue><statusCode>0</statusCode></record>"
        ),
        ts = timestamp,
        hex = hex
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_range_size() {
        assert_eq!(fixture_range(1_440).total_minutes(), 1_440);
    }

    #[test]
    fn test_fixture_record_has_timestamp() {
        assert!(fixture_record(60).contains("<timeStamp>60</timeStamp>"));
    }
}
