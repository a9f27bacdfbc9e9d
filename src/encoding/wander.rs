//! Encoder for the open-world wander regime.

use serde::{Deserialize, Serialize};

use super::{BucketSpec, KeyBuilder, Thresholds};
use crate::identifiers::StateKey;

/// What occupies a tile next to the tribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileFeature {
    Berry,
    PoisonBerry,
    Nomad,
    Animal,
    Water,
    Stone,
    Tree,
    #[default]
    Empty,
    Blocked,
}

impl TileFeature {
    /// Single-character code used inside state keys.
    pub fn code(&self) -> char {
        match self {
            TileFeature::Berry => 'B',
            TileFeature::PoisonBerry => 'P',
            TileFeature::Nomad => 'N',
            TileFeature::Animal => 'A',
            TileFeature::Water => 'W',
            TileFeature::Stone => 'S',
            TileFeature::Tree => 'T',
            TileFeature::Empty => '.',
            TileFeature::Blocked => 'X',
        }
    }
}

/// Snapshot of the wandering tribe, as reported by the game loop.
///
/// `neighbours` lists the eight surrounding tiles clockwise from north.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WanderObservation {
    pub stage: u32,
    pub unlocked_tier: u32,
    pub population: u32,
    pub food: u32,
    pub wood: u32,
    /// Thirst meter, 0 to 100; banded at 30 and 70.
    pub thirst: u32,
    pub x: u32,
    pub y: u32,
    /// Map quadrant index (0-3) the tribe currently stands in.
    pub quadrant: u32,
    pub neighbours: [TileFeature; 8],
    pub can_settle: bool,
    pub dehydrated: bool,
    pub starving: bool,
}

/// Bucket layout for wander observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WanderBuckets {
    pub stage: BucketSpec,
    pub unlocked_tier: BucketSpec,
    pub population: BucketSpec,
    pub food: BucketSpec,
    pub wood: BucketSpec,
    pub thirst: Thresholds,
    pub zone: BucketSpec,
    pub quadrant: BucketSpec,
}

impl Default for WanderBuckets {
    fn default() -> Self {
        Self {
            stage: BucketSpec::capped(10),
            unlocked_tier: BucketSpec::capped(10),
            population: BucketSpec::new(5, 10),
            food: BucketSpec::new(10, 5),
            wood: BucketSpec::new(10, 5),
            thirst: Thresholds::new(30, 70),
            zone: BucketSpec::new(10, 25),
            quadrant: BucketSpec::capped(3),
        }
    }
}

/// Turns [`WanderObservation`]s into `W|...` state keys.
#[derive(Debug, Clone, Default)]
pub struct WanderEncoder {
    buckets: WanderBuckets,
}

impl WanderEncoder {
    pub fn new(buckets: WanderBuckets) -> Self {
        Self { buckets }
    }

    pub fn encode(&self, obs: &WanderObservation) -> StateKey {
        let b = &self.buckets;
        let nearby: String = obs.neighbours.iter().map(TileFeature::code).collect();

        KeyBuilder::new("W")
            .field("s", b.stage.apply(obs.stage))
            .field("u", b.unlocked_tier.apply(obs.unlocked_tier))
            .field("p", b.population.apply(obs.population))
            .field("f", b.food.apply(obs.food))
            .field("w", b.wood.apply(obs.wood))
            .field("t", b.thirst.apply(obs.thirst))
            .field("zx", b.zone.apply(obs.x))
            .field("zy", b.zone.apply(obs.y))
            .field("q", b.quadrant.apply(obs.quadrant))
            .text("n", &nearby)
            .flag("cs", obs.can_settle)
            .flag("dh", obs.dehydrated)
            .flag("sv", obs.starving)
            .finish()
    }
}
