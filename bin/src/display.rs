//! Time parsing and output formatting for the beacon CLI.

use anyhow::{Context, Result, bail};
use beacon_lib::Record;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use clap::ValueEnum;
use std::io::Write;

/// Output format for fetched records.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Json,
    Ndjson,
}

/// Formats accepted for naive (UTC) date-times.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parses a time argument.
///
/// Accepts epoch seconds, RFC 3339, a date-time without offset (taken as
/// UTC) or a bare date (UTC midnight).
pub(crate) fn parse_time(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(secs) = input.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0)
            .with_context(|| format!("Timestamp out of range: {input}"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    bail!(
        "Invalid time: {input} (expected RFC 3339, YYYY-MM-DD HH:MM[:SS], YYYY-MM-DD or epoch seconds)"
    )
}

/// Writes records in the given format.
pub(crate) fn write_records<W: Write>(records: &[Record], mut writer: W, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut writer, records)?;
            writeln!(writer)?;
        }
        Format::Ndjson => {
            for record in records {
                serde_json::to_writer(&mut writer, record)?;
                writeln!(writer)?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}
