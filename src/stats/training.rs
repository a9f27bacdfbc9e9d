//! Rolling training statistics.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Length of the long reward history.
pub const REWARD_HISTORY_LEN: usize = 100;
/// Length of the short window kept for graphs.
pub const RECENT_REWARDS_LEN: usize = 20;

/// End-of-episode summary handed to [`TrainingStats::record_episode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub reward: f64,
    pub final_population: u32,
    pub years_survived: u32,
    pub balanced: bool,
    pub smart_settlement: bool,
}

/// Counters and running bests across all episodes.
///
/// Everything here only grows, apart from the two reward windows which
/// drop their oldest entry once full.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrainingStats {
    pub episodes: u64,
    pub games_played: u64,
    pub total_reward: f64,
    pub reward_history: VecDeque<f64>,
    pub recent_rewards: VecDeque<f64>,
    /// Unset until the first episode completes.
    pub best_reward: Option<f64>,
    pub best_population: u32,
    pub best_survival_years: u32,
    pub cities_built: u64,
    pub balanced_cities: u64,
    pub smart_settlements: u64,
}

impl TrainingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_episode(&mut self, episode: &EpisodeSummary) {
        self.episodes += 1;
        self.games_played += 1;
        self.total_reward += episode.reward;

        push_bounded(&mut self.reward_history, episode.reward, REWARD_HISTORY_LEN);
        push_bounded(&mut self.recent_rewards, episode.reward, RECENT_REWARDS_LEN);

        if self.best_reward.is_none_or(|best| episode.reward > best) {
            self.best_reward = Some(episode.reward);
        }
        self.best_population = self.best_population.max(episode.final_population);
        self.best_survival_years = self.best_survival_years.max(episode.years_survived);

        if episode.balanced {
            self.balanced_cities += 1;
        }
        if episode.smart_settlement {
            self.smart_settlements += 1;
        }
    }

    /// Count a newly founded city toward curriculum progress.
    pub fn record_city_founded(&mut self) {
        self.cities_built += 1;
    }

    /// Mean of the long reward history, 0 when empty.
    pub fn average_reward(&self) -> f64 {
        mean(&self.reward_history)
    }

    /// Mean of the short reward window, 0 when empty.
    pub fn recent_average_reward(&self) -> f64 {
        mean(&self.recent_rewards)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn push_bounded(window: &mut VecDeque<f64>, value: f64, capacity: usize) {
    window.push_back(value);
    while window.len() > capacity {
        window.pop_front();
    }
}

fn mean(values: &VecDeque<f64>) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(reward: f64) -> EpisodeSummary {
        EpisodeSummary {
            reward,
            ..EpisodeSummary::default()
        }
    }

    #[test]
    fn test_windows_keep_most_recent_in_order() {
        let mut stats = TrainingStats::new();
        for i in 0..105 {
            stats.record_episode(&episode(i as f64));
        }

        assert_eq!(stats.episodes, 105);
        assert_eq!(stats.games_played, 105);
        assert_eq!(stats.reward_history.len(), REWARD_HISTORY_LEN);
        let expected: Vec<f64> = (5..105).map(|i| i as f64).collect();
        assert!(stats.reward_history.iter().copied().eq(expected));

        assert_eq!(stats.recent_rewards.len(), RECENT_REWARDS_LEN);
        assert_eq!(stats.recent_rewards.front(), Some(&85.0));
    }

    #[test]
    fn test_best_reward_starts_unset_and_accepts_negative() {
        let mut stats = TrainingStats::new();
        assert_eq!(stats.best_reward, None);
        stats.record_episode(&episode(-40.0));
        assert_eq!(stats.best_reward, Some(-40.0));
        stats.record_episode(&episode(-60.0));
        assert_eq!(stats.best_reward, Some(-40.0));
        stats.record_episode(&episode(12.0));
        assert_eq!(stats.best_reward, Some(12.0));
    }

    #[test]
    fn test_bests_and_achievements() {
        let mut stats = TrainingStats::new();
        stats.record_episode(&EpisodeSummary {
            reward: 10.0,
            final_population: 30,
            years_survived: 12,
            balanced: true,
            smart_settlement: false,
        });
        stats.record_episode(&EpisodeSummary {
            reward: 5.0,
            final_population: 18,
            years_survived: 20,
            balanced: false,
            smart_settlement: true,
        });

        assert_eq!(stats.best_population, 30);
        assert_eq!(stats.best_survival_years, 20);
        assert_eq!(stats.balanced_cities, 1);
        assert_eq!(stats.smart_settlements, 1);
        assert!((stats.total_reward - 15.0).abs() < 1e-12);
        assert!((stats.average_reward() - 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_averages_are_zero() {
        let stats = TrainingStats::new();
        assert_eq!(stats.average_reward(), 0.0);
        assert_eq!(stats.recent_average_reward(), 0.0);
    }

    #[test]
    fn test_missing_fields_default_on_load() {
        let stats: TrainingStats = serde_json::from_str(r#"{"episodes":3}"#).unwrap();
        assert_eq!(stats.episodes, 3);
        assert!(stats.reward_history.is_empty());
    }
}
