//! Error type for the beacon pipeline.

use beacon_types::ConfigError;
use thiserror::Error;

use crate::{BatchFetchError, DecodeError};

/// Result type alias for beacon operations.
pub type Result<T> = std::result::Result<T, BeaconError>;

/// Errors surfaced by [`crate::get_beacons`] and [`crate::fetch_all`].
#[derive(Error, Debug)]
pub enum BeaconError {
    /// Invalid concurrency, timeout or range size.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be created.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// At least one request in the batch failed.
    #[error(transparent)]
    Fetch(#[from] BatchFetchError),

    /// A response body was not well-formed XML.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
