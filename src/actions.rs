//! Fixed action sets for the two game regimes.
//!
//! The game loop decides which of these are legal at any moment; the
//! learner only ever sees them through their stable string ids, which are
//! also the inner keys of the persisted Q-table.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// An enumerated action the learner can choose.
pub trait Action: Copy + Eq + fmt::Debug + 'static {
    /// Every action of the regime, in canonical order.
    const ALL: &'static [Self];

    /// Stable identifier used as the Q-table action key.
    fn id(&self) -> &'static str;

    /// Look up an action by its identifier.
    fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|action| action.id() == id)
    }
}

/// Actions available while the tribe wanders the open world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WanderAction {
    MoveN,
    MoveS,
    MoveE,
    MoveW,
    MoveNe,
    MoveNw,
    MoveSe,
    MoveSw,
    Interact,
    Settle,
    Wait,
}

impl Action for WanderAction {
    const ALL: &'static [Self] = &[
        WanderAction::MoveN,
        WanderAction::MoveS,
        WanderAction::MoveE,
        WanderAction::MoveW,
        WanderAction::MoveNe,
        WanderAction::MoveNw,
        WanderAction::MoveSe,
        WanderAction::MoveSw,
        WanderAction::Interact,
        WanderAction::Settle,
        WanderAction::Wait,
    ];

    fn id(&self) -> &'static str {
        match self {
            WanderAction::MoveN => "MOVE_N",
            WanderAction::MoveS => "MOVE_S",
            WanderAction::MoveE => "MOVE_E",
            WanderAction::MoveW => "MOVE_W",
            WanderAction::MoveNe => "MOVE_NE",
            WanderAction::MoveNw => "MOVE_NW",
            WanderAction::MoveSe => "MOVE_SE",
            WanderAction::MoveSw => "MOVE_SW",
            WanderAction::Interact => "INTERACT",
            WanderAction::Settle => "SETTLE",
            WanderAction::Wait => "WAIT",
        }
    }
}

/// Actions available once a city has been founded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CityAction {
    BuildRes,
    BuildCom,
    BuildInd,
    BuildWell,
    BuildRoad,
    Demolish,
    NextTurn,
    Wait,
}

impl Action for CityAction {
    const ALL: &'static [Self] = &[
        CityAction::BuildRes,
        CityAction::BuildCom,
        CityAction::BuildInd,
        CityAction::BuildWell,
        CityAction::BuildRoad,
        CityAction::Demolish,
        CityAction::NextTurn,
        CityAction::Wait,
    ];

    fn id(&self) -> &'static str {
        match self {
            CityAction::BuildRes => "BUILD_RES",
            CityAction::BuildCom => "BUILD_COM",
            CityAction::BuildInd => "BUILD_IND",
            CityAction::BuildWell => "BUILD_WELL",
            CityAction::BuildRoad => "BUILD_ROAD",
            CityAction::Demolish => "DEMOLISH",
            CityAction::NextTurn => "NEXT_TURN",
            CityAction::Wait => "WAIT",
        }
    }
}

macro_rules! impl_action_text {
    ($action:ty) => {
        impl fmt::Display for $action {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.id())
            }
        }

        impl FromStr for $action {
            type Err = crate::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalised = s.trim().to_ascii_uppercase().replace('-', "_");
                <$action as Action>::from_id(&normalised).ok_or_else(|| {
                    crate::Error::UnknownAction { id: s.to_string() }
                })
            }
        }
    };
}

impl_action_text!(WanderAction);
impl_action_text!(CityAction);

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_ids_are_unique_per_regime() {
        let wander: HashSet<_> = WanderAction::ALL.iter().map(|a| a.id()).collect();
        assert_eq!(wander.len(), WanderAction::ALL.len());

        let city: HashSet<_> = CityAction::ALL.iter().map(|a| a.id()).collect();
        assert_eq!(city.len(), CityAction::ALL.len());
    }

    #[test]
    fn test_from_id_matches_display() {
        for action in CityAction::ALL {
            assert_eq!(CityAction::from_id(&action.to_string()), Some(*action));
        }
        assert_eq!(WanderAction::from_id("SETTLE"), Some(WanderAction::Settle));
        assert_eq!(WanderAction::from_id("BUILD_RES"), None);
    }

    #[test]
    fn test_parse_is_lenient_about_case() {
        let action: WanderAction = "move-ne".parse().unwrap();
        assert_eq!(action, WanderAction::MoveNe);
        assert!("fly".parse::<CityAction>().is_err());
    }

    #[test]
    fn test_serde_uses_action_ids() {
        let json = serde_json::to_string(&CityAction::NextTurn).unwrap();
        assert_eq!(json, "\"NEXT_TURN\"");
    }
}
