//! State encoders
//!
//! Observations from the game loop carry raw counters (population, food
//! stocks, building counts, map position) whose range is effectively
//! unbounded. The encoders squash every field through [`bucket`] (thirst
//! through fixed [`Thresholds`]) and concatenate short tagged fields in a
//! fixed order, giving a finite, deterministic [`StateKey`] per regime:
//!
//! - `W|...` keys for the open-world wander phase ([`WanderEncoder`])
//! - `C|...` keys for the city-management phase ([`CityEncoder`])
//!
//! The key is a pure function of the bucketed fields: observations that
//! agree bucket-for-bucket encode identically.

pub mod bucket;
pub mod city;
pub mod wander;

use std::fmt::Write;

use serde::{Deserialize, Serialize};

pub use bucket::{BucketSpec, Thresholds, bucket};
pub use city::{BuildingCounts, CityBuckets, CityEncoder, CityObservation};
pub use wander::{TileFeature, WanderBuckets, WanderEncoder, WanderObservation};

use crate::identifiers::StateKey;

/// Bucket layouts for both regimes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    pub wander: WanderBuckets,
    pub city: CityBuckets,
}

/// Accumulates `|tag<value>` segments behind a regime prefix.
pub(crate) struct KeyBuilder {
    key: String,
}

impl KeyBuilder {
    pub(crate) fn new(regime: &str) -> Self {
        let mut key = String::with_capacity(64);
        key.push_str(regime);
        Self { key }
    }

    pub(crate) fn field(mut self, tag: &str, value: u32) -> Self {
        // Writing into a String cannot fail.
        let _ = write!(self.key, "|{tag}{value}");
        self
    }

    pub(crate) fn flag(self, tag: &str, value: bool) -> Self {
        self.field(tag, u32::from(value))
    }

    pub(crate) fn text(mut self, tag: &str, value: &str) -> Self {
        self.key.push('|');
        self.key.push_str(tag);
        self.key.push_str(value);
        self
    }

    pub(crate) fn finish(self) -> StateKey {
        StateKey::new(self.key)
    }
}
