use crate::tier::Tier;
use flowfit_types::FftAmount;
use serde::{Deserialize, Serialize};

/// Experience needed to advance from `level` to `level + 1`
pub fn required_xp_for_level(level: u32) -> u64 {
    (level as u64 + 1) * 500
}

/// One user's lifetime progression standing. Created on first completion,
/// mutated only through the engine's apply_completion, never deleted.
/// Persistence between completions belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionStanding {
    pub level: u32,

    /// Experience toward the next level; level-ups consume the crossed
    /// threshold, so this always sits below `required_xp_for_level(level)`.
    pub experience_points: u64,

    pub tier: Tier,
    pub total_challenges_completed: u64,
    pub total_tokens_earned: FftAmount,
    pub current_streak: u32,
    pub longest_streak: u32,
}

impl Default for ProgressionStanding {
    fn default() -> Self {
        Self {
            level: 0,
            experience_points: 0,
            tier: Tier::Bronze,
            total_challenges_completed: 0,
            total_tokens_earned: FftAmount::ZERO,
            current_streak: 0,
            longest_streak: 0,
        }
    }
}

impl ProgressionStanding {
    /// Fraction of the way to the next level, in [0, 1)
    pub fn evolution_progress(&self) -> f64 {
        self.experience_points as f64 / required_xp_for_level(self.level) as f64
    }

    /// Tier never stored out of sync with level; a standing violating this
    /// was corrupted outside the engine.
    pub fn is_consistent(&self) -> bool {
        self.tier == Tier::from_level(self.level) && self.current_streak <= self.longest_streak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_standing() {
        let standing = ProgressionStanding::default();
        assert_eq!(standing.level, 0);
        assert_eq!(standing.tier, Tier::Bronze);
        assert!(standing.is_consistent());
    }

    #[test]
    fn test_level_curve() {
        assert_eq!(required_xp_for_level(0), 500);
        assert_eq!(required_xp_for_level(7), 4000);
        assert_eq!(required_xp_for_level(49), 25_000);
    }

    #[test]
    fn test_desynced_tier_is_inconsistent() {
        let standing = ProgressionStanding {
            level: 20,
            tier: Tier::Bronze,
            ..Default::default()
        };
        assert!(!standing.is_consistent());
    }

    #[test]
    fn test_streak_above_longest_is_inconsistent() {
        let standing = ProgressionStanding {
            current_streak: 5,
            longest_streak: 3,
            ..Default::default()
        };
        assert!(!standing.is_consistent());
    }
}
