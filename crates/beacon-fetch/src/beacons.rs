//! Composed fetch-and-decode pipeline.

use beacon_types::{ConfigError, MIN_EPOCH, Record, TimeRange};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    BeaconError, BeaconFetcher, FetchConfig, Response, decode_record,
    url::generate_urls_with_base,
};

/// Records of one completed batch, decoded as they are consumed.
///
/// Every response has already been fetched; decoding happens on each call to
/// `next`, so a malformed body only surfaces when its item is reached.
/// Items come out in completion order, not timestamp order.
#[derive(Debug)]
pub struct Beacons {
    responses: std::vec::IntoIter<Response>,
}

impl Beacons {
    fn new(responses: Vec<Response>) -> Self {
        Self {
            responses: responses.into_iter(),
        }
    }
}

impl Iterator for Beacons {
    type Item = Result<Record, BeaconError>;

    fn next(&mut self) -> Option<Self::Item> {
        let response = self.responses.next()?;
        Some(decode_record(&response.body).map_err(BeaconError::from))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.responses.size_hint()
    }
}

impl ExactSizeIterator for Beacons {}

impl BeaconFetcher {
    /// Fetches every record in `range` and returns them for lazy decoding.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BatchTooLarge`] if the range covers more
    /// minutes than the configured batch limit, and otherwise the errors of
    /// [`BeaconFetcher::fetch_all`].
    pub async fn get_beacons(&self, range: TimeRange) -> Result<Beacons, BeaconError> {
        let requested = range.total_minutes();
        let limit = self.config().max_batch;
        if requested > limit {
            return Err(ConfigError::BatchTooLarge { requested, limit }.into());
        }
        if range.precedes_min_epoch() {
            warn!(%range, min_epoch = MIN_EPOCH, "Range starts before the first published record");
        }

        let urls: Vec<String> = generate_urls_with_base(&self.config().base_url, range).collect();
        debug!(
            count = urls.len(),
            first = urls.first().map(String::as_str),
            last = urls.last().map(String::as_str),
            "Generated record URLs"
        );

        let responses = self.fetch_all(urls).await?;
        Ok(Beacons::new(responses))
    }
}

/// Fetches the beacon records published between `from` and `to`.
///
/// Both timestamps are truncated to the minute and both ends are inclusive.
/// All records are fetched with at most `concurrency` requests in flight,
/// each limited to `timeout`, before the first record is returned.
///
/// # Example
///
/// ```no_run
/// use beacon_fetch::get_beacons;
/// use chrono::{TimeDelta, Utc};
/// use std::time::Duration;
///
/// # async fn run() -> beacon_fetch::Result<()> {
/// let to = Utc::now();
/// let from = to - TimeDelta::minutes(10);
/// for record in get_beacons(from, to, Duration::from_secs(5), 4).await? {
///     println!("{:?}", record?.output_value());
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`BeaconError::Config`] for a zero timeout or concurrency,
/// [`BeaconError::Fetch`] if any request fails. Decode failures are returned
/// per item by the [`Beacons`] iterator.
pub async fn get_beacons(
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    timeout: Duration,
    concurrency: usize,
) -> Result<Beacons, BeaconError> {
    let config = FetchConfig::default()
        .with_timeout(timeout)
        .with_concurrency(concurrency);
    BeaconFetcher::new(config)?
        .get_beacons(TimeRange::new(from, to))
        .await
}
