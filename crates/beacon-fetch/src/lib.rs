//! Bounded concurrent fetching of NIST randomness beacon records.
//!
//! This crate provides the retrieval pipeline:
//!
//! - [`url::generate_urls`] - One record URL per minute of a time range
//! - [`BeaconFetcher`] - HTTP fetcher with a concurrency cap and join-all failure
//! - [`decode_record`] - XML record decoding
//! - [`get_beacons`] - The composed pipeline, yielding records lazily

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod beacons;
mod client;
mod decode;
mod error;
pub mod url;

pub use beacons::{Beacons, get_beacons};
pub use client::{BatchFetchError, BeaconFetcher, FetchConfig, FetchError, Response, fetch_all};
pub use decode::{DecodeError, decode_record};
pub use error::{BeaconError, Result};
