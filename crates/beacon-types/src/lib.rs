//! Core types for the NIST randomness beacon client.
//!
//! This crate provides the fundamental data structures used throughout the workspace:
//!
//! - [`Record`] - A decoded beacon record (field name to text value)
//! - [`TimeRange`] - Minute-resolution time range, inclusive on both ends
//! - [`MinuteIterator`] - Iterator over every minute in a range
//! - [`ConfigError`] - Usage errors for fetch configuration

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod record;
mod time_range;

pub use error::ConfigError;
pub use record::{Record, field};
pub use time_range::{MIN_EPOCH, MinuteIterator, TimeRange, truncate_to_minute};
