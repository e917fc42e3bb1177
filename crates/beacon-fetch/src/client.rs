//! Bounded concurrent HTTP client for record URLs.

use beacon_types::ConfigError;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{BeaconError, url::BASE_URL, url::minute_from_url};

/// Configuration for the fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Maximum number of requests in flight.
    pub concurrency: usize,
    /// Per-request timeout, covering connect, send and body read.
    pub timeout: Duration,
    /// Connection timeout (also bounded by `timeout`).
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
    /// Base URL that record timestamps are appended to.
    pub base_url: String,
    /// Maximum number of minutes a single range may cover.
    pub max_batch: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency: 10,
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("beacon/{}", env!("CARGO_PKG_VERSION")),
            base_url: BASE_URL.to_string(),
            max_batch: 100_000, // ~69 days of records
        }
    }
}

impl FetchConfig {
    /// Sets the concurrency limit.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the maximum number of minutes per range.
    #[must_use]
    pub fn with_max_batch(mut self, max_batch: usize) -> Self {
        self.max_batch = max_batch;
        self
    }

    /// Checks the configuration for usage errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the concurrency limit or the timeout is zero.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

/// A completed HTTP response for one record URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The requested URL.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

impl Response {
    /// Returns true if the status code is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A single request that failed.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport error (connect, send or body read).
    #[error("Error while fetching '{url}': {source}")]
    Request {
        /// The requested URL.
        url: String,
        /// The underlying HTTP error.
        #[source]
        source: reqwest::Error,
    },

    /// The request did not complete within the timeout.
    #[error("Request for '{url}' timed out after {timeout:?}")]
    Timeout {
        /// The requested URL.
        url: String,
        /// The configured timeout.
        timeout: Duration,
        /// The underlying HTTP error.
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    fn from_reqwest(url: String, timeout: Duration, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url,
                timeout,
                source,
            }
        } else {
            Self::Request { url, source }
        }
    }

    /// Returns the URL that failed.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Request { url, .. } | Self::Timeout { url, .. } => url,
        }
    }

    /// Returns the record minute of the failed URL, if it is a record URL.
    #[must_use]
    pub fn minute(&self) -> Option<DateTime<Utc>> {
        minute_from_url(self.url())
    }

    /// Returns true if the request timed out.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// One or more requests in a batch failed.
///
/// Failures are kept in request order. None of the batch's successful
/// responses are retained.
#[derive(Debug)]
pub struct BatchFetchError {
    total: usize,
    first: FetchError,
    others: Vec<FetchError>,
}

impl BatchFetchError {
    /// Returns `None` if `failures` is empty.
    fn new(total: usize, failures: Vec<FetchError>) -> Option<Self> {
        let mut failures = failures.into_iter();
        let first = failures.next()?;
        Some(Self {
            total,
            first,
            others: failures.collect(),
        })
    }

    /// Returns the number of requests in the batch.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns the number of failed requests.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.others.len() + 1
    }

    /// Returns the first failure in request order.
    #[must_use]
    pub const fn first(&self) -> &FetchError {
        &self.first
    }

    /// Iterates over all failures in request order.
    pub fn failures(&self) -> impl Iterator<Item = &FetchError> {
        std::iter::once(&self.first).chain(&self.others)
    }
}

impl std::fmt::Display for BatchFetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} requests failed; first failure: {}",
            self.failed(),
            self.total,
            self.first
        )
    }
}

impl std::error::Error for BatchFetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.first)
    }
}

/// Fetches record URLs with bounded concurrency.
///
/// Each call to [`BeaconFetcher::fetch_all`] builds its own connection pool
/// and drops it when the batch completes.
#[derive(Debug, Clone)]
pub struct BeaconFetcher {
    config: FetchConfig,
}

impl BeaconFetcher {
    /// Creates a new fetcher with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: FetchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the fetcher configuration.
    #[must_use]
    pub const fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn build_client(&self) -> Result<Client, reqwest::Error> {
        Client::builder()
            // One idle connection per worker is enough for a single host
            .pool_max_idle_per_host(self.config.concurrency)
            .tcp_nodelay(true)
            .timeout(self.config.timeout)
            .connect_timeout(self.config.connect_timeout)
            .user_agent(&self.config.user_agent)
            .gzip(true)
            .build()
    }

    /// Fetches every URL, with at most `concurrency` requests in flight.
    ///
    /// Waits for every request to finish before returning. Responses come
    /// back in completion order, not request order. A non-2xx status is not
    /// a failure; the response is returned with its status.
    ///
    /// An empty `urls` returns immediately without touching the network.
    ///
    /// # Errors
    ///
    /// Returns [`BeaconError::Fetch`] if any request failed or timed out, in
    /// which case no responses are returned, and [`BeaconError::Client`] if
    /// the HTTP client cannot be created.
    pub async fn fetch_all<I>(&self, urls: I) -> Result<Vec<Response>, BeaconError>
    where
        I: IntoIterator<Item = String>,
    {
        let urls: Vec<String> = urls.into_iter().collect();
        if urls.is_empty() {
            return Ok(Vec::new());
        }

        let client = self.build_client().map_err(BeaconError::Client)?;
        let timeout = self.config.timeout;
        let total = urls.len();
        info!(
            total,
            concurrency = self.config.concurrency,
            "Fetching beacon records"
        );

        let results: Vec<(usize, Result<Response, FetchError>)> =
            stream::iter(urls.into_iter().enumerate())
                .map(|(index, url)| {
                    let client = client.clone();
                    async move { (index, fetch_one(&client, url, timeout).await) }
                })
                .buffer_unordered(self.config.concurrency)
                .collect()
                .await;

        let mut responses = Vec::with_capacity(total);
        let mut failures = Vec::new();
        for (index, result) in results {
            match result {
                Ok(response) => responses.push(response),
                Err(e) => failures.push((index, e)),
            }
        }

        failures.sort_by_key(|(index, _)| *index);
        let failures = failures.into_iter().map(|(_, e)| e).collect();
        if let Some(batch) = BatchFetchError::new(total, failures) {
            warn!(
                failed = batch.failed(),
                total,
                first_url = batch.first().url(),
                "Beacon batch failed"
            );
            return Err(batch.into());
        }

        debug!(total, "Beacon batch complete");
        Ok(responses)
    }
}

async fn fetch_one(client: &Client, url: String, timeout: Duration) -> Result<Response, FetchError> {
    debug!(%url, "GET");
    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => return Err(FetchError::from_reqwest(url, timeout, e)),
    };

    let status = response.status();
    if !status.is_success() {
        warn!(%url, status = status.as_u16(), "Beacon service returned non-success status");
    }

    match response.text().await {
        Ok(body) => Ok(Response {
            url,
            status: status.as_u16(),
            body,
        }),
        Err(e) => Err(FetchError::from_reqwest(url, timeout, e)),
    }
}

/// Fetches every URL with the given timeout and concurrency limit.
///
/// Uses [`FetchConfig::default`] for everything else. See
/// [`BeaconFetcher::fetch_all`].
///
/// # Errors
///
/// Returns [`BeaconError::Config`] if `concurrency` or `timeout` is zero, and
/// otherwise the errors of [`BeaconFetcher::fetch_all`].
pub async fn fetch_all<I>(
    urls: I,
    timeout: Duration,
    concurrency: usize,
) -> Result<Vec<Response>, BeaconError>
where
    I: IntoIterator<Item = String>,
{
    let config = FetchConfig::default()
        .with_timeout(timeout)
        .with_concurrency(concurrency);
    BeaconFetcher::new(config)?.fetch_all(urls).await
}
