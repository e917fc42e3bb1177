//! CLI command implementations.

use anyhow::{Context, Result};
use beacon_lib::prelude::*;
use chrono::Utc;
use std::time::Duration;
use tracing::error;

use crate::FetchArgs;
use crate::display::parse_time;

pub(crate) mod fetch;
pub(crate) mod summarize;

impl FetchArgs {
    /// Resolves the requested range; a missing end means now.
    fn range(&self) -> Result<TimeRange> {
        let from = parse_time(&self.from).context("Invalid --from")?;
        let to = match &self.to {
            Some(to) => parse_time(to).context("Invalid --to")?,
            None => Utc::now(),
        };
        Ok(TimeRange::new(from, to))
    }

    fn fetcher(&self) -> Result<BeaconFetcher> {
        let timeout = Duration::try_from_secs_f64(self.timeout)
            .with_context(|| format!("Invalid timeout: {}", self.timeout))?;
        let config = FetchConfig::default()
            .with_timeout(timeout)
            .with_concurrency(self.concurrency)
            .with_base_url(&self.base_url);
        Ok(BeaconFetcher::new(config)?)
    }
}

/// Fetches every record in the requested range.
///
/// Decode failures are left in place for the caller to handle.
async fn fetch_range(args: &FetchArgs) -> Result<(TimeRange, Beacons)> {
    let range = args.range()?;
    let fetcher = args.fetcher()?;

    match fetcher.get_beacons(range).await {
        Ok(beacons) => Ok((range, beacons)),
        Err(BeaconError::Fetch(batch)) => {
            for failure in batch.failures() {
                error!(url = failure.url(), minute = ?failure.minute(), "{failure}");
            }
            Err(BeaconError::Fetch(batch)).context("Failed to fetch beacon records")
        }
        Err(e) => Err(e).context("Failed to fetch beacon records"),
    }
}
