//! Saturating discretization of unbounded counters.

use serde::{Deserialize, Serialize};

/// Map `value` to its band of width `bucket_size`, capped at `max_buckets`.
///
/// Values past the last band collapse into it rather than wrapping, so the
/// number of distinct results is at most `max_buckets + 1`. A zero
/// `bucket_size` saturates straight to `max_buckets`.
///
/// # Examples
///
/// ```
/// use civil_zones_ai::encoding::bucket;
///
/// assert_eq!(bucket(0, 10, 5), 0);
/// assert_eq!(bucket(19, 10, 5), 1);
/// assert_eq!(bucket(10_000, 10, 5), 5);
/// ```
pub fn bucket(value: u32, bucket_size: u32, max_buckets: u32) -> u32 {
    value
        .checked_div(bucket_size)
        .map_or(max_buckets, |band| band.min(max_buckets))
}

/// Width and ceiling of one bucketed observation field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSpec {
    pub size: u32,
    pub max: u32,
}

impl BucketSpec {
    pub const fn new(size: u32, max: u32) -> Self {
        Self { size, max }
    }

    /// A unit-width spec: the raw count itself, capped at `max`.
    pub const fn capped(max: u32) -> Self {
        Self { size: 1, max }
    }

    pub fn apply(&self, value: u32) -> u32 {
        bucket(value, self.size, self.max)
    }
}

/// Three-way banding at two cut points: below `low` is 0, below `high`
/// is 1, anything else is 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub low: u32,
    pub high: u32,
}

impl Thresholds {
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    pub fn apply(&self, value: u32) -> u32 {
        if value < self.low {
            0
        } else if value < self.high {
            1
        } else {
            2
        }
    }
}
