//! Tabular Q-learning
//!
//! The learner keeps a sparse table of quality estimates keyed by encoded
//! state and action id, explores with an ε-greedy policy, and moves
//! estimates toward the one-step Bellman target after every transition:
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//! ```
//!
//! ## Usage Example
//!
//! ```
//! use civil_zones_ai::{
//!     actions::CityAction,
//!     identifiers::StateKey,
//!     q_learning::{LearningParams, QTable},
//! };
//!
//! let mut table = QTable::new();
//! let params = LearningParams::default();
//! let here = StateKey::new("C|p1");
//! let there = StateKey::new("C|p2");
//!
//! table.q_learning_update(&here, CityAction::BuildRes, 10.0, &there, &params);
//! assert!(table.read(&here, "BUILD_RES") > 0.0);
//! ```

pub mod policy;
pub mod q_table;

// Public re-exports
pub use policy::choose;
pub use q_table::{DEFAULT_Q, LearningParams, QTable};
