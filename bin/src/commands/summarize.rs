//! Summarize command implementation.
//!
//! Fetches a range and reports coverage and status codes instead of the
//! records themselves.

use anyhow::Result;
use beacon_lib::prelude::*;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

use super::fetch_range;
use crate::FetchArgs;

/// Maximum number of missing minutes listed individually.
const MAX_LISTED_MISSING: usize = 10;

/// Coverage statistics for a fetched range.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    expected: usize,
    records: usize,
    undecodable: usize,
    first: Option<DateTime<Utc>>,
    last: Option<DateTime<Utc>>,
    status_codes: BTreeMap<String, usize>,
    missing: Vec<DateTime<Utc>>,
}

impl Summary {
    fn new(range: TimeRange, records: &[Record], undecodable: usize) -> Self {
        let timestamps: BTreeSet<_> = records
            .iter()
            .filter_map(Record::timestamp)
            .map(truncate_to_minute)
            .collect();

        let mut status_codes = BTreeMap::new();
        for record in records {
            let code = record.get(field::STATUS_CODE).unwrap_or("missing");
            *status_codes.entry(code.to_string()).or_insert(0) += 1;
        }

        Self {
            expected: range.total_minutes(),
            records: records.len(),
            undecodable,
            first: timestamps.first().copied(),
            last: timestamps.last().copied(),
            status_codes,
            missing: range.minutes().filter(|m| !timestamps.contains(m)).collect(),
        }
    }

    fn print(&self, range: TimeRange) {
        println!("{:<18} {range}", "Range:");
        println!(
            "{:<18} {} of {} minutes",
            "Records:", self.records, self.expected
        );
        if self.undecodable > 0 {
            println!("{:<18} {}", "Undecodable:", self.undecodable);
        }
        if let (Some(first), Some(last)) = (self.first, self.last) {
            println!("{:<18} {first}", "First timestamp:");
            println!("{:<18} {last}", "Last timestamp:");
        }

        let codes: Vec<_> = self
            .status_codes
            .iter()
            .map(|(code, count)| format!("{code}: {count}"))
            .collect();
        println!("{:<18} {}", "Status codes:", codes.join(", "));

        if self.missing.is_empty() {
            println!("{:<18} none", "Missing minutes:");
            return;
        }
        println!("{:<18} {}", "Missing minutes:", self.missing.len());
        for minute in self.missing.iter().take(MAX_LISTED_MISSING) {
            println!("  {minute}");
        }
        if self.missing.len() > MAX_LISTED_MISSING {
            println!("  ... and {} more", self.missing.len() - MAX_LISTED_MISSING);
        }
    }
}

/// Fetch a range and print a coverage summary.
pub(crate) async fn summarize(args: &FetchArgs) -> Result<()> {
    let (range, beacons) = fetch_range(args).await?;

    let mut records = Vec::with_capacity(beacons.len());
    let mut undecodable = 0;
    for result in beacons {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("{e}");
                undecodable += 1;
            }
        }
    }

    Summary::new(range, &records, undecodable).print(range);
    Ok(())
}
