//! ε-greedy action selection over a Q-table.

use rand::{Rng, seq::IndexedRandom};

use crate::{actions::Action, identifiers::StateKey, q_learning::q_table::QTable};

/// Pick an action for `state` from `available`.
///
/// With probability `exploration_rate` a uniformly random available action
/// is returned; otherwise the greedy action, ties resolved by list order.
/// Rates at or above 1.0 always explore. Returns `None` only when
/// `available` is empty.
pub fn choose<A, R>(
    table: &mut QTable,
    state: &StateKey,
    available: &[A],
    exploration_rate: f64,
    rng: &mut R,
) -> Option<A>
where
    A: Action,
    R: Rng,
{
    if rng.random::<f64>() < exploration_rate {
        // Explore: random action
        available.choose(rng).copied()
    } else {
        // Exploit: greedy action based on Q-values
        table.greedy_action(state, available)
    }
}
