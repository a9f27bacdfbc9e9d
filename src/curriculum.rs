//! Curriculum scheduling
//!
//! Training moves through three phases as the agent accumulates cities:
//! first learning to survive and settle, then to build balanced cities,
//! then optimizing. Earlier phases keep a higher exploration rate even
//! after the per-episode decay has run its course.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Exploration never decays below this rate.
pub const MIN_EXPLORATION_RATE: f64 = 0.1;
/// Multiplicative decay of the base rate per episode.
pub const EXPLORATION_DECAY: f64 = 0.99;
/// Extra exploration per phase still ahead of the agent.
pub const PHASE_BONUS: f64 = 0.1;

/// Stage of the training curriculum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Phase {
    /// Learning to survive and found a city.
    Survive = 1,
    /// Learning balanced city construction.
    Balance = 2,
    /// Refining an already competent policy.
    Optimize = 3,
}

impl Phase {
    pub fn number(self) -> u8 {
        self as u8
    }
}

impl From<Phase> for u8 {
    fn from(phase: Phase) -> Self {
        phase.number()
    }
}

impl TryFrom<u8> for Phase {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Phase::Survive),
            2 => Ok(Phase::Balance),
            3 => Ok(Phase::Optimize),
            other => Err(format!("curriculum phase must be 1-3, got {other}")),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Survive => "survive",
            Phase::Balance => "balance",
            Phase::Optimize => "optimize",
        };
        write!(f, "{} ({label})", self.number())
    }
}

/// Phase thresholds and the base exploration rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurriculumConfig {
    /// Cities to found before leaving phase 1.
    pub phase1_threshold: u64,
    /// Balanced cities to build before leaving phase 2.
    pub phase2_threshold: u64,
    pub base_exploration_rate: f64,
}

impl Default for CurriculumConfig {
    fn default() -> Self {
        Self {
            phase1_threshold: 10,
            phase2_threshold: 5,
            base_exploration_rate: 0.5,
        }
    }
}

impl CurriculumConfig {
    pub fn phase(&self, cities_built: u64, balanced_cities: u64) -> Phase {
        phase(
            cities_built,
            balanced_cities,
            self.phase1_threshold,
            self.phase2_threshold,
        )
    }

    pub fn exploration_rate(&self, phase: Phase, episode: u64) -> f64 {
        exploration_rate(phase, self.base_exploration_rate, episode)
    }
}

/// Curriculum phase for the given progress counters.
pub fn phase(
    cities_built: u64,
    balanced_cities: u64,
    phase1_threshold: u64,
    phase2_threshold: u64,
) -> Phase {
    if cities_built < phase1_threshold {
        Phase::Survive
    } else if balanced_cities < phase2_threshold {
        Phase::Balance
    } else {
        Phase::Optimize
    }
}

/// `max(0.1, base_rate × 0.99^episode + (3 − phase) × 0.1)`
pub fn exploration_rate(phase: Phase, base_rate: f64, episode: u64) -> f64 {
    let decayed = base_rate * EXPLORATION_DECAY.powf(episode as f64);
    let bonus = f64::from(3 - phase.number()) * PHASE_BONUS;
    (decayed + bonus).max(MIN_EXPLORATION_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_phase_thresholds() {
        assert_eq!(phase(9, 0, 10, 5), Phase::Survive);
        assert_eq!(phase(10, 2, 10, 5), Phase::Balance);
        assert_eq!(phase(10, 5, 10, 5), Phase::Optimize);
        assert_eq!(phase(0, 50, 10, 5), Phase::Survive);
    }

    #[test]
    fn test_exploration_starts_with_phase_bonus() {
        assert!(close(exploration_rate(Phase::Survive, 0.5, 0), 0.7));
        assert!(close(exploration_rate(Phase::Balance, 0.5, 0), 0.6));
        assert!(close(exploration_rate(Phase::Optimize, 0.5, 0), 0.5));
    }

    #[test]
    fn test_exploration_decays_to_floor() {
        assert!(close(exploration_rate(Phase::Optimize, 0.5, 2_000), 0.1));
        let late_phase_one = exploration_rate(Phase::Survive, 0.5, 2_000);
        assert!(close(late_phase_one, 0.2));
    }

    #[test]
    fn test_exploration_is_non_increasing_in_episodes() {
        let mut previous = f64::INFINITY;
        for episode in 0..300 {
            let rate = exploration_rate(Phase::Balance, 0.8, episode);
            assert!(rate <= previous);
            previous = rate;
        }
    }

    #[test]
    fn test_phase_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Phase::Balance).unwrap(), "2");
        assert!(serde_json::from_str::<Phase>("4").is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = CurriculumConfig::default();
        assert_eq!(config.phase(10, 4), Phase::Balance);
        assert!(close(config.exploration_rate(Phase::Survive, 0), 0.7));
    }
}
