//! The closed vocabulary of sound triggers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Semantic interaction a sound can be attached to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trigger {
    Click,
    ClickDown,
    ClickOn,
    ClickOff,
    Hover,
    Swipe,
}

impl Trigger {
    pub const ALL: [Trigger; 6] = [
        Trigger::Click,
        Trigger::ClickDown,
        Trigger::ClickOn,
        Trigger::ClickOff,
        Trigger::Hover,
        Trigger::Swipe,
    ];

    /// Slot of this trigger in per-trigger tables
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Wire name, as used in config files
    pub const fn name(self) -> &'static str {
        match self {
            Trigger::Click => "click",
            Trigger::ClickDown => "clickDown",
            Trigger::ClickOn => "clickOn",
            Trigger::ClickOff => "clickOff",
            Trigger::Hover => "hover",
            Trigger::Swipe => "swipe",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Trigger {
    type Err = UnknownTrigger;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Trigger::ALL
            .into_iter()
            .find(|trigger| trigger.name() == s)
            .ok_or_else(|| UnknownTrigger(s.to_string()))
    }
}

/// A trigger name outside the closed vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTrigger(pub String);

impl fmt::Display for UnknownTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown sound trigger: {} (expected one of {})",
            self.0,
            Trigger::ALL.map(Trigger::name).join(", ")
        )
    }
}

impl std::error::Error for UnknownTrigger {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, trigger) in Trigger::ALL.into_iter().enumerate() {
            assert_eq!(trigger.index(), i);
        }
    }

    #[test]
    fn test_name_round_trips_through_from_str() {
        assert_eq!("clickDown".parse::<Trigger>(), Ok(Trigger::ClickDown));
        assert_eq!("swipe".parse::<Trigger>(), Ok(Trigger::Swipe));
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        let err = "ClickDown".parse::<Trigger>().unwrap_err();
        assert_eq!(err, UnknownTrigger("ClickDown".to_string()));
        assert!(err.to_string().contains("clickDown"));
    }

    #[test]
    fn test_serde_names_match_wire_names() {
        let yaml = serde_yaml::to_string(&Trigger::ClickOff).unwrap();
        assert_eq!(yaml.trim(), "clickOff");
    }
}
