//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{actions::Action, identifiers::StateKey};

/// Estimate assumed for any (state, action) pair never written.
pub const DEFAULT_Q: f64 = 0.0;

/// Fraction of `max_size` the table must reach before pruning kicks in.
const PRUNE_TRIGGER_RATIO: f64 = 0.9;
/// Fraction of states evicted by a prune.
const PRUNE_FRACTION: f64 = 0.2;

/// Learning rate and discount factor for the Bellman update.
///
/// Both are expected in `[0, 1]`; values outside that range are not
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningParams {
    /// α: how far each update moves toward the target
    pub learning_rate: f64,
    /// γ: weight of the best successor estimate
    pub discount_factor: f64,
}

impl Default for LearningParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.95,
        }
    }
}

/// Q-table mapping states to per-action quality estimates.
///
/// Serializes as `{state_key: {action_id: value, ...}, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QTable {
    q_values: HashMap<StateKey, HashMap<String, f64>>,
}

impl QTable {
    /// Create an empty Q-table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get Q-value for a state-action pair, creating the entry if absent.
    ///
    /// Unwritten pairs read as [`DEFAULT_Q`] and are stored with that value,
    /// so later scans of the state see them like any other action.
    pub fn read(&mut self, state: &StateKey, action: &str) -> f64 {
        if let Some(value) = self.peek(state, action) {
            return value;
        }
        self.q_values
            .entry(state.clone())
            .or_default()
            .insert(action.to_string(), DEFAULT_Q);
        DEFAULT_Q
    }

    /// Get Q-value for a state-action pair without materializing it.
    pub fn peek(&self, state: &StateKey, action: &str) -> Option<f64> {
        self.q_values
            .get(state)
            .and_then(|actions| actions.get(action))
            .copied()
    }

    /// Set Q-value for a state-action pair
    pub fn write(&mut self, state: &StateKey, action: &str, value: f64) {
        match self.q_values.get_mut(state) {
            Some(actions) => {
                actions.insert(action.to_string(), value);
            }
            None => {
                self.q_values
                    .insert(state.clone(), HashMap::from([(action.to_string(), value)]));
            }
        }
    }

    /// Get maximum Q-value over the given actions in a state
    pub fn max_q<A: Action>(&mut self, state: &StateKey, actions: &[A]) -> f64 {
        actions
            .iter()
            .map(|action| self.read(state, action.id()))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Select greedy action (highest Q-value) from legal actions
    ///
    /// Ties go to whichever action appears first in `legal_actions`.
    pub fn greedy_action<A: Action>(&mut self, state: &StateKey, legal_actions: &[A]) -> Option<A> {
        let mut best: Option<(A, f64)> = None;
        for &action in legal_actions {
            let value = self.read(state, action.id());
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((action, value)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// The max ranges over every action of the regime, not only the ones
    /// legal in `next_state`. Returns the written value.
    pub fn q_learning_update<A: Action>(
        &mut self,
        state: &StateKey,
        action: A,
        reward: f64,
        next_state: &StateKey,
        params: &LearningParams,
    ) -> f64 {
        let current_q = self.read(state, action.id());
        let max_next_q = self.max_q(next_state, A::ALL);
        let td_target = reward + params.discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + params.learning_rate * td_error;
        self.write(state, action.id(), new_q);
        new_q
    }

    /// Evict the least valuable states once the table nears `max_size`.
    ///
    /// Nothing happens until the state count reaches 90% of `max_size`.
    /// Past that, states are ranked by their best recorded action value and
    /// the lowest-ranked 20% are dropped with all their actions. Returns
    /// the number of states removed.
    pub fn prune(&mut self, max_size: usize) -> usize {
        let count = self.q_values.len();
        if (count as f64) < max_size as f64 * PRUNE_TRIGGER_RATIO {
            return 0;
        }

        let to_remove = (count as f64 * PRUNE_FRACTION).floor() as usize;
        if to_remove == 0 {
            return 0;
        }

        let mut scored: Vec<(f64, &StateKey)> = self
            .q_values
            .iter()
            .map(|(state, actions)| (state_score(actions), state))
            .collect();
        scored.sort_by(|(a_score, a_state), (b_score, b_state)| {
            a_score.total_cmp(b_score).then_with(|| a_state.cmp(b_state))
        });

        let doomed: Vec<StateKey> = scored
            .into_iter()
            .take(to_remove)
            .map(|(_, state)| state.clone())
            .collect();
        for state in &doomed {
            self.q_values.remove(state);
        }
        doomed.len()
    }

    /// Best recorded action value for a state, if the state is known.
    pub fn state_value(&self, state: &StateKey) -> Option<f64> {
        self.q_values.get(state).map(state_score)
    }

    /// Action values recorded for a state.
    pub fn actions(&self, state: &StateKey) -> Option<&HashMap<String, f64>> {
        self.q_values.get(state)
    }

    /// Iterate over every known state.
    pub fn states(&self) -> impl Iterator<Item = &StateKey> {
        self.q_values.keys()
    }

    /// Iterate over every stored (state, action, value) triple.
    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &str, f64)> {
        self.q_values.iter().flat_map(|(state, actions)| {
            actions
                .iter()
                .map(move |(action, value)| (state, action.as_str(), *value))
        })
    }

    pub fn contains_state(&self, state: &StateKey) -> bool {
        self.q_values.contains_key(state)
    }

    /// Number of distinct states
    pub fn state_count(&self) -> usize {
        self.q_values.len()
    }

    /// Get total number of Q-values stored
    pub fn size(&self) -> usize {
        self.q_values.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    /// Reset all Q-values
    pub fn reset(&mut self) {
        self.q_values.clear();
    }
}

fn state_score(actions: &HashMap<String, f64>) -> f64 {
    actions
        .values()
        .copied()
        .reduce(f64::max)
        .unwrap_or(DEFAULT_Q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{CityAction, WanderAction};

    fn key(s: &str) -> StateKey {
        StateKey::new(s)
    }

    #[test]
    fn test_read_defaults_to_zero_and_materializes() {
        let mut qtable = QTable::new();
        let state = key("C|p0");
        assert_eq!(qtable.peek(&state, "WAIT"), None);
        assert_eq!(qtable.read(&state, "WAIT"), 0.0);
        assert_eq!(qtable.peek(&state, "WAIT"), Some(0.0));
        assert_eq!(qtable.state_count(), 1);
        assert_eq!(qtable.size(), 1);
    }

    #[test]
    fn test_write_overwrites() {
        let mut qtable = QTable::new();
        let state = key("C|p1");
        qtable.write(&state, "BUILD_RES", 1.5);
        qtable.write(&state, "BUILD_RES", -2.0);
        assert_eq!(qtable.read(&state, "BUILD_RES"), -2.0);
    }

    #[test]
    fn test_max_q() {
        let mut qtable = QTable::new();
        let state = key("C|p2");
        qtable.write(&state, "BUILD_RES", 0.5);
        qtable.write(&state, "BUILD_COM", 1.5);
        qtable.write(&state, "BUILD_IND", 0.8);

        let legal = [CityAction::BuildRes, CityAction::BuildCom, CityAction::BuildInd];
        assert_eq!(qtable.max_q(&state, &legal), 1.5);
    }

    #[test]
    fn test_max_q_counts_unwritten_actions_as_zero() {
        let mut qtable = QTable::new();
        let state = key("C|p3");
        qtable.write(&state, "BUILD_RES", -4.0);
        assert_eq!(qtable.max_q(&state, CityAction::ALL), 0.0);
    }

    #[test]
    fn test_greedy_action() {
        let mut qtable = QTable::new();
        let state = key("W|p0");
        qtable.write(&state, "MOVE_N", 0.5);
        qtable.write(&state, "MOVE_S", 1.5);
        qtable.write(&state, "MOVE_E", 0.8);

        let legal = [WanderAction::MoveN, WanderAction::MoveS, WanderAction::MoveE];
        assert_eq!(qtable.greedy_action(&state, &legal), Some(WanderAction::MoveS));
    }

    #[test]
    fn test_greedy_ties_follow_list_order() {
        let mut qtable = QTable::new();
        let state = key("W|p1");
        qtable.write(&state, "WAIT", 2.0);
        qtable.write(&state, "INTERACT", 2.0);

        let forward = [WanderAction::Wait, WanderAction::Interact];
        let backward = [WanderAction::Interact, WanderAction::Wait];
        assert_eq!(qtable.greedy_action(&state, &forward), Some(WanderAction::Wait));
        assert_eq!(
            qtable.greedy_action(&state, &backward),
            Some(WanderAction::Interact)
        );
        assert_eq!(qtable.greedy_action::<WanderAction>(&state, &[]), None);
    }

    #[test]
    fn test_q_learning_update() {
        let mut qtable = QTable::new();
        let params = LearningParams {
            learning_rate: 0.5,
            discount_factor: 0.99,
        };
        let state = key("C|a");
        let next_state = key("C|b");

        qtable.write(&next_state, "BUILD_RES", 1.0);
        qtable.write(&next_state, "DEMOLISH", 2.0);

        let written = qtable.q_learning_update(&state, CityAction::Wait, 0.0, &next_state, &params);

        // Q(s,WAIT) = 0.0 + 0.5 * (0.0 + 0.99 * 2.0 - 0.0) = 0.99
        assert!((written - 0.99).abs() < 1e-12);
        assert!((qtable.read(&state, "WAIT") - 0.99).abs() < 1e-12);
    }

    #[test]
    fn test_update_uses_full_action_set_for_next_state() {
        let mut qtable = QTable::new();
        let params = LearningParams {
            learning_rate: 1.0,
            discount_factor: 1.0,
        };
        let state = key("C|a");
        let next_state = key("C|b");
        qtable.write(&next_state, "DEMOLISH", 10.0);

        qtable.q_learning_update(&state, CityAction::Wait, 1.0, &next_state, &params);
        assert!((qtable.read(&state, "WAIT") - 11.0).abs() < 1e-12);
        assert_eq!(
            qtable.actions(&next_state).map(HashMap::len),
            Some(CityAction::ALL.len())
        );
    }

    #[test]
    fn test_prune_below_trigger_is_noop() {
        let mut qtable = QTable::new();
        for i in 0..8 {
            qtable.write(&key(&format!("s{i}")), "WAIT", i as f64);
        }
        assert_eq!(qtable.prune(10), 0);
        assert_eq!(qtable.state_count(), 8);
    }

    #[test]
    fn test_prune_removes_lowest_valued_fifth() {
        let mut qtable = QTable::new();
        for i in 0..10 {
            let state = key(&format!("s{i}"));
            qtable.write(&state, "WAIT", -(i as f64));
            qtable.write(&state, "NEXT_TURN", (i as f64) * 0.5);
        }

        assert_eq!(qtable.prune(10), 2);
        assert_eq!(qtable.state_count(), 8);
        assert!(!qtable.contains_state(&key("s0")));
        assert!(!qtable.contains_state(&key("s1")));
        assert!(qtable.contains_state(&key("s2")));
    }

    #[test]
    fn test_serializes_as_nested_map() {
        let mut qtable = QTable::new();
        qtable.write(&key("C|x"), "WAIT", 1.25);
        let json = serde_json::to_string(&qtable).unwrap();
        assert_eq!(json, r#"{"C|x":{"WAIT":1.25}}"#);

        let back: QTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, qtable);
    }
}
