//! Transition outcomes reported by the game loop.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Why a tribe or city died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeathCause {
    Thirst,
    Starvation,
    Collapse,
    Unknown,
}

impl DeathCause {
    pub const ALL: [DeathCause; 4] = [
        DeathCause::Thirst,
        DeathCause::Starvation,
        DeathCause::Collapse,
        DeathCause::Unknown,
    ];
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeathCause::Thirst => "thirst",
            DeathCause::Starvation => "starvation",
            DeathCause::Collapse => "collapse",
            DeathCause::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

impl FromStr for DeathCause {
    type Err = std::convert::Infallible;

    /// Unrecognised causes map to [`DeathCause::Unknown`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "thirst" | "dehydration" => DeathCause::Thirst,
            "starvation" | "hunger" => DeathCause::Starvation,
            "collapse" => DeathCause::Collapse,
            _ => DeathCause::Unknown,
        })
    }
}

/// Result of applying one action, scored by the reward function.
///
/// Deltas may be negative (a lost villager, spent stockpiles).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransitionOutcome {
    pub pop_gained: i32,
    pub resources_gained: f64,
    pub years_survived: u32,
    pub buildings_built: u32,
    /// Set when the transition ended the run.
    pub death: Option<DeathCause>,
    /// Whether the strategy layer judged the resulting city balanced.
    pub balanced: bool,
    pub new_quadrant: bool,
    pub level_up: bool,
}

impl TransitionOutcome {
    pub fn died(&self) -> bool {
        self.death.is_some()
    }
}
