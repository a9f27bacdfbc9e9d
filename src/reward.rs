//! Reward function
//!
//! A transition is scored as a weighted sum of independent signals. No
//! signal is clamped; the weights keep their magnitudes comparable.

use serde::{Deserialize, Serialize};

use crate::outcome::{DeathCause, TransitionOutcome};

/// Per-signal weights and flat bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardWeights {
    pub per_pop_gained: f64,
    pub per_resource_gained: f64,
    pub per_year_survived: f64,
    pub per_building_built: f64,
    /// Applied on any death.
    pub death_penalty: f64,
    /// Added on top of `death_penalty` for thirst deaths.
    pub thirst_penalty: f64,
    /// Added on top of `death_penalty` for starvation deaths.
    pub starvation_penalty: f64,
    pub balanced_bonus: f64,
    pub new_quadrant_bonus: f64,
    pub level_up_bonus: f64,
}

impl Default for RewardWeights {
    fn default() -> Self {
        Self {
            per_pop_gained: 10.0,
            per_resource_gained: 0.01,
            per_year_survived: 2.0,
            per_building_built: 5.0,
            death_penalty: -100.0,
            thirst_penalty: -50.0,
            starvation_penalty: -30.0,
            balanced_bonus: 20.0,
            new_quadrant_bonus: 15.0,
            level_up_bonus: 50.0,
        }
    }
}

impl RewardWeights {
    /// Score a transition. The result may be negative.
    pub fn score(&self, outcome: &TransitionOutcome) -> f64 {
        let mut reward = f64::from(outcome.pop_gained) * self.per_pop_gained
            + outcome.resources_gained * self.per_resource_gained
            + f64::from(outcome.years_survived) * self.per_year_survived
            + f64::from(outcome.buildings_built) * self.per_building_built;

        if let Some(cause) = outcome.death {
            reward += self.death_penalty;
            reward += match cause {
                DeathCause::Thirst => self.thirst_penalty,
                DeathCause::Starvation => self.starvation_penalty,
                DeathCause::Collapse | DeathCause::Unknown => 0.0,
            };
        }

        if outcome.balanced {
            reward += self.balanced_bonus;
        }
        if outcome.new_quadrant {
            reward += self.new_quadrant_bonus;
        }
        if outcome.level_up {
            reward += self.level_up_bonus;
        }

        reward
    }
}

/// Score a transition with the default weights.
pub fn compute_reward(outcome: &TransitionOutcome) -> f64 {
    RewardWeights::default().score(outcome)
}
