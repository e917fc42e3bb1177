//! Error types shared across the beacon crates.

use thiserror::Error;

/// Invalid fetch configuration or request size.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Concurrency limit was zero.
    #[error("Concurrency must be at least 1")]
    ZeroConcurrency,

    /// Per-request timeout was zero.
    #[error("Request timeout must be greater than zero")]
    ZeroTimeout,

    /// The requested range needs more requests than the configured batch limit.
    #[error("Range covers {requested} minutes, exceeding the batch limit of {limit}")]
    BatchTooLarge {
        /// Number of record URLs the range would produce.
        requested: usize,
        /// The configured limit.
        limit: usize,
    },
}
