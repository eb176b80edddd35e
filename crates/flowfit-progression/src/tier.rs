use serde::{Deserialize, Serialize};
use std::fmt;

/// Achievement tier of the dynamic NFT. Ordered: a user's tier only ever
/// advances, never regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl Tier {
    /// Tier is a pure function of level. Thresholds are spaced so that no
    /// single level-up step crosses two tier boundaries; keep that spacing
    /// if these are ever retuned.
    pub fn from_level(level: u32) -> Self {
        if level >= 50 {
            Tier::Diamond
        } else if level >= 25 {
            Tier::Platinum
        } else if level >= 15 {
            Tier::Gold
        } else if level >= 8 {
            Tier::Silver
        } else {
            Tier::Bronze
        }
    }

    /// Reward multiplier surfaced on the achievement card
    pub fn reward_multiplier(&self) -> f64 {
        match self {
            Tier::Bronze => 1.10,
            Tier::Silver => 1.25,
            Tier::Gold => 1.50,
            Tier::Platinum => 2.00,
            Tier::Diamond => 2.50,
        }
    }

    pub fn next(&self) -> Option<Tier> {
        match self {
            Tier::Bronze => Some(Tier::Silver),
            Tier::Silver => Some(Tier::Gold),
            Tier::Gold => Some(Tier::Platinum),
            Tier::Platinum => Some(Tier::Diamond),
            Tier::Diamond => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
            Tier::Diamond => "Diamond",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(Tier::from_level(0), Tier::Bronze);
        assert_eq!(Tier::from_level(7), Tier::Bronze);
        assert_eq!(Tier::from_level(8), Tier::Silver);
        assert_eq!(Tier::from_level(14), Tier::Silver);
        assert_eq!(Tier::from_level(15), Tier::Gold);
        assert_eq!(Tier::from_level(24), Tier::Gold);
        assert_eq!(Tier::from_level(25), Tier::Platinum);
        assert_eq!(Tier::from_level(49), Tier::Platinum);
        assert_eq!(Tier::from_level(50), Tier::Diamond);
        assert_eq!(Tier::from_level(200), Tier::Diamond);
    }

    #[test]
    fn test_tier_is_monotone_in_level() {
        let mut previous = Tier::Bronze;
        for level in 0..120 {
            let tier = Tier::from_level(level);
            assert!(tier >= previous);
            previous = tier;
        }
    }

    #[test]
    fn test_next_chain_terminates_at_diamond() {
        assert_eq!(Tier::Bronze.next(), Some(Tier::Silver));
        assert_eq!(Tier::Diamond.next(), None);
    }
}
