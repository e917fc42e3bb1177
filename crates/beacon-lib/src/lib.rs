//! Rust library for retrieving NIST randomness beacon records.
//!
//! This is a facade crate that re-exports functionality from the beacon
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use beacon_lib::prelude::*;
//! use chrono::{TimeDelta, Utc};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let to = Utc::now();
//!     let from = to - TimeDelta::hours(1);
//!
//!     for record in get_beacons(from, to, Duration::from_secs(10), 8).await? {
//!         let record = record?;
//!         println!("{:?} {:?}", record.timestamp(), record.output_value());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use beacon_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use beacon_fetch::{
    BatchFetchError, BeaconError, BeaconFetcher, Beacons, DecodeError, FetchConfig, FetchError,
    Response, decode_record, fetch_all, get_beacons, url,
};

/// Prelude module for convenient imports.
///
/// ```
/// use beacon_lib::prelude::*;
/// ```
pub mod prelude {
    pub use beacon_types::{ConfigError, MIN_EPOCH, Record, TimeRange, field, truncate_to_minute};

    #[cfg(feature = "fetch")]
    pub use beacon_fetch::{
        BeaconError, BeaconFetcher, Beacons, FetchConfig, decode_record, fetch_all, get_beacons,
    };
}
