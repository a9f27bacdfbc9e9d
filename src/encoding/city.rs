//! Encoder for the city-management regime.

use serde::{Deserialize, Serialize};

use super::{BucketSpec, KeyBuilder};
use crate::identifiers::StateKey;

/// Number of standing buildings of each kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingCounts {
    pub residential: u32,
    pub commercial: u32,
    pub industrial: u32,
    pub wells: u32,
    pub roads: u32,
}

/// Snapshot of a settled city, as reported by the game loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityObservation {
    pub stage: u32,
    pub unlocked_tier: u32,
    pub population: u32,
    pub food: u32,
    pub wood: u32,
    pub stone: u32,
    pub buildings: BuildingCounts,
    pub famine: bool,
    pub drought: bool,
    pub collapse_risk: bool,
    /// Radius, in tiles, of the built-up area around the city centre.
    pub expansion_radius: u32,
    /// Buildable tiles on the edge of the built-up area.
    pub frontier_tiles: u32,
    pub quadrants_reached: u32,
    pub turn: u32,
}

/// Bucket layout for city observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityBuckets {
    pub stage: BucketSpec,
    pub unlocked_tier: BucketSpec,
    pub population: BucketSpec,
    pub food: BucketSpec,
    pub wood: BucketSpec,
    pub stone: BucketSpec,
    pub residential: BucketSpec,
    pub commercial: BucketSpec,
    pub industrial: BucketSpec,
    pub wells: BucketSpec,
    pub roads: BucketSpec,
    pub expansion: BucketSpec,
    pub frontier: BucketSpec,
    pub quadrants: BucketSpec,
    pub turn: BucketSpec,
}

impl Default for CityBuckets {
    fn default() -> Self {
        Self {
            stage: BucketSpec::capped(10),
            unlocked_tier: BucketSpec::capped(10),
            population: BucketSpec::new(5, 20),
            food: BucketSpec::new(20, 10),
            wood: BucketSpec::new(20, 10),
            stone: BucketSpec::new(20, 10),
            residential: BucketSpec::capped(10),
            commercial: BucketSpec::capped(5),
            industrial: BucketSpec::capped(5),
            wells: BucketSpec::capped(3),
            roads: BucketSpec::new(5, 4),
            expansion: BucketSpec::new(5, 6),
            frontier: BucketSpec::new(10, 5),
            quadrants: BucketSpec::capped(4),
            turn: BucketSpec::new(10, 20),
        }
    }
}

/// Turns [`CityObservation`]s into `C|...` state keys.
#[derive(Debug, Clone, Default)]
pub struct CityEncoder {
    buckets: CityBuckets,
}

impl CityEncoder {
    pub fn new(buckets: CityBuckets) -> Self {
        Self { buckets }
    }

    pub fn encode(&self, obs: &CityObservation) -> StateKey {
        let b = &self.buckets;
        let counts = &obs.buildings;

        KeyBuilder::new("C")
            .field("s", b.stage.apply(obs.stage))
            .field("u", b.unlocked_tier.apply(obs.unlocked_tier))
            .field("p", b.population.apply(obs.population))
            .field("f", b.food.apply(obs.food))
            .field("w", b.wood.apply(obs.wood))
            .field("st", b.stone.apply(obs.stone))
            .field("r", b.residential.apply(counts.residential))
            .field("c", b.commercial.apply(counts.commercial))
            .field("i", b.industrial.apply(counts.industrial))
            .field("wl", b.wells.apply(counts.wells))
            .field("rd", b.roads.apply(counts.roads))
            .flag("fm", obs.famine)
            .flag("dr", obs.drought)
            .flag("cl", obs.collapse_risk)
            .field("e", b.expansion.apply(obs.expansion_radius))
            .field("fr", b.frontier.apply(obs.frontier_tiles))
            .field("q", b.quadrants.apply(obs.quadrants_reached))
            .field("t", b.turn.apply(obs.turn))
            .finish()
    }
}
