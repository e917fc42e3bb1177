//! Time range and minute iteration.

use chrono::{DateTime, TimeDelta, Timelike, Utc};
use std::iter::FusedIterator;

/// Unix timestamp of the earliest record published by the beacon service.
///
/// Earlier minutes may still be requested; the service rejects them.
pub const MIN_EPOCH: i64 = 1_378_395_540;

/// Truncates a timestamp to the start of its minute.
///
/// Seconds and sub-second components are zeroed. Truncating an already
/// truncated timestamp returns it unchanged.
#[must_use]
pub fn truncate_to_minute(ts: DateTime<Utc>) -> DateTime<Utc> {
    // Both setters are infallible for UTC values.
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

/// A range of minutes for record retrieval.
///
/// Both endpoints are truncated to the minute on construction and are
/// inclusive. A range whose start is after its end is empty rather than
/// invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    /// Creates a new range, truncating both endpoints to the minute.
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: truncate_to_minute(start),
            end: truncate_to_minute(end),
        }
    }

    /// Creates a range covering the single minute that contains `ts`.
    #[must_use]
    pub fn single_minute(ts: DateTime<Utc>) -> Self {
        Self::new(ts, ts)
    }

    /// Returns the truncated start of the range.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the truncated end of the range.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns true if the range contains no minutes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Returns an iterator over every minute in the range, in increasing order.
    #[must_use]
    pub const fn minutes(&self) -> MinuteIterator {
        MinuteIterator {
            current: Some(self.start),
            end: self.end,
        }
    }

    /// Returns the number of minutes in the range.
    #[must_use]
    pub fn total_minutes(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        usize::try_from((self.end - self.start).num_minutes())
            .map_or(usize::MAX, |n| n.saturating_add(1))
    }

    /// Returns true if the minute containing `ts` lies within the range.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        let minute = truncate_to_minute(ts);
        minute >= self.start && minute <= self.end
    }

    /// Returns true if the range starts before the service's first record.
    #[must_use]
    pub fn precedes_min_epoch(&self) -> bool {
        !self.is_empty() && self.start.timestamp() < MIN_EPOCH
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Iterator over all minutes in a time range.
#[derive(Debug, Clone)]
pub struct MinuteIterator {
    current: Option<DateTime<Utc>>,
    end: DateTime<Utc>,
}

impl Iterator for MinuteIterator {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.filter(|c| *c <= self.end)?;
        self.current = current.checked_add_signed(TimeDelta::minutes(1));
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.current {
            Some(current) if current <= self.end => {
                usize::try_from((self.end - current).num_minutes()).map_or(0, |n| n + 1)
            }
            _ => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MinuteIterator {}

impl FusedIterator for MinuteIterator {}
