//! Fetch command implementation.
//!
//! Downloads every record in a range and writes them as JSON.

use anyhow::{Context, Result};
use beacon_lib::Record;
use std::fs::File;
use std::io::{BufWriter, stdout};
use std::path::PathBuf;
use tracing::info;

use super::fetch_range;
use crate::FetchArgs;
use crate::display::{Format, write_records};

/// Fetch records and write them to `output` (or stdout), sorted by timestamp.
pub(crate) async fn fetch(args: &FetchArgs, format: Format, output: Option<PathBuf>) -> Result<()> {
    let (range, beacons) = fetch_range(args).await?;

    let mut records = beacons
        .collect::<Result<Vec<Record>, _>>()
        .context("Failed to decode beacon record")?;
    records.sort_by_key(Record::timestamp);
    info!(%range, count = records.len(), "Fetched beacon records");

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_records(&records, BufWriter::new(file), format)
        }
        None => write_records(&records, stdout().lock(), format),
    }
}
