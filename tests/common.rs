//! Common test utilities for the civil_zones_ai test suite.
//!
//! Builders for observations and outcomes shared across integration tests.

#![allow(dead_code)]

use civil_zones_ai::{
    DeathCause, SessionConfig, TrainingSession, TransitionOutcome,
    encoding::{BuildingCounts, CityObservation, TileFeature, WanderObservation},
};

/// A seeded session with default settings.
pub fn seeded_session(seed: u64) -> TrainingSession {
    TrainingSession::new(SessionConfig::default().with_seed(seed))
}

/// A mid-game wander observation near a river.
pub fn wander_observation() -> WanderObservation {
    WanderObservation {
        stage: 1,
        unlocked_tier: 0,
        population: 12,
        food: 30,
        wood: 8,
        thirst: 40,
        x: 64,
        y: 200,
        quadrant: 2,
        neighbours: [
            TileFeature::Water,
            TileFeature::Empty,
            TileFeature::Empty,
            TileFeature::Tree,
            TileFeature::Empty,
            TileFeature::Berry,
            TileFeature::Empty,
            TileFeature::Empty,
        ],
        can_settle: true,
        dehydrated: false,
        starving: false,
    }
}

/// A young city with a handful of buildings.
pub fn city_observation(turn: u32) -> CityObservation {
    CityObservation {
        stage: 1,
        unlocked_tier: 1,
        population: 15,
        food: 60,
        wood: 40,
        stone: 5,
        buildings: BuildingCounts {
            residential: 3,
            commercial: 0,
            industrial: 1,
            wells: 1,
            roads: 4,
        },
        famine: false,
        drought: false,
        collapse_risk: false,
        expansion_radius: 3,
        frontier_tiles: 6,
        quadrants_reached: 1,
        turn,
    }
}

/// Outcome of a productive city turn.
pub fn growth_outcome() -> TransitionOutcome {
    TransitionOutcome {
        pop_gained: 2,
        resources_gained: 50.0,
        years_survived: 1,
        buildings_built: 1,
        ..TransitionOutcome::default()
    }
}

/// Outcome of a turn that killed the tribe.
pub fn death_outcome(cause: DeathCause) -> TransitionOutcome {
    TransitionOutcome {
        death: Some(cause),
        ..TransitionOutcome::default()
    }
}
