use crate::standing::{required_xp_for_level, ProgressionStanding};
use crate::tier::Tier;
use serde::{Deserialize, Serialize};

/// Rarity grade of one achievement trait
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementTrait {
    pub name: String,
    pub value: String,
    pub rarity: Rarity,
}

/// Presentation-layer projection of a standing onto the dynamic NFT card.
/// Plain data: the renderer must not mutate it, and nothing here feeds back
/// into reward or progression math.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementCard {
    pub name: String,
    pub tier: Tier,
    pub level: u32,
    pub experience: u64,
    pub max_experience: u64,
    /// Percentage toward the next level threshold, in [0, 100)
    pub evolution_progress: f64,
    pub reward_multiplier: f64,
    pub traits: Vec<AchievementTrait>,
}

impl AchievementCard {
    pub fn from_standing(standing: &ProgressionStanding) -> Self {
        let max_experience = required_xp_for_level(standing.level);

        let traits = vec![
            AchievementTrait {
                name: "Fitness Level".into(),
                value: standing.level.to_string(),
                rarity: if standing.level >= 20 {
                    Rarity::Legendary
                } else if standing.level >= 10 {
                    Rarity::Epic
                } else {
                    Rarity::Rare
                },
            },
            AchievementTrait {
                name: "Current Streak".into(),
                value: format!("{} days", standing.current_streak),
                rarity: if standing.current_streak >= 30 {
                    Rarity::Mythic
                } else if standing.current_streak >= 14 {
                    Rarity::Legendary
                } else {
                    Rarity::Epic
                },
            },
            AchievementTrait {
                name: "Total Challenges".into(),
                value: standing.total_challenges_completed.to_string(),
                rarity: if standing.total_challenges_completed >= 100 {
                    Rarity::Legendary
                } else if standing.total_challenges_completed >= 50 {
                    Rarity::Epic
                } else {
                    Rarity::Rare
                },
            },
            AchievementTrait {
                name: "Tokens Earned".into(),
                value: standing.total_tokens_earned.to_string(),
                rarity: if standing.total_tokens_earned.to_fft() >= 10_000 {
                    Rarity::Mythic
                } else if standing.total_tokens_earned.to_fft() >= 5_000 {
                    Rarity::Legendary
                } else {
                    Rarity::Epic
                },
            },
            AchievementTrait {
                name: "Best Streak".into(),
                value: format!("{} days", standing.longest_streak),
                rarity: if standing.longest_streak >= 60 {
                    Rarity::Mythic
                } else if standing.longest_streak >= 30 {
                    Rarity::Legendary
                } else {
                    Rarity::Epic
                },
            },
        ];

        Self {
            name: format!("{} Fitness Champion", standing.tier),
            tier: standing.tier,
            level: standing.level,
            experience: standing.experience_points,
            max_experience,
            evolution_progress: standing.evolution_progress() * 100.0,
            reward_multiplier: standing.tier.reward_multiplier(),
            traits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowfit_types::FftAmount;

    #[test]
    fn test_card_reflects_standing() {
        let standing = ProgressionStanding {
            level: 16,
            experience_points: 4250,
            tier: Tier::Gold,
            total_challenges_completed: 64,
            total_tokens_earned: FftAmount::from_fft(6_200),
            current_streak: 15,
            longest_streak: 31,
        };

        let card = AchievementCard::from_standing(&standing);
        assert_eq!(card.name, "Gold Fitness Champion");
        assert_eq!(card.max_experience, 8500);
        assert!((card.evolution_progress - 50.0).abs() < 0.0001);
        assert!((card.reward_multiplier - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_trait_rarity_thresholds() {
        let standing = ProgressionStanding {
            level: 16,
            experience_points: 0,
            tier: Tier::Gold,
            total_challenges_completed: 64,
            total_tokens_earned: FftAmount::from_fft(6_200),
            current_streak: 15,
            longest_streak: 31,
        };
        let card = AchievementCard::from_standing(&standing);

        let rarity_of = |name: &str| {
            card.traits
                .iter()
                .find(|t| t.name == name)
                .map(|t| t.rarity)
                .unwrap()
        };

        assert_eq!(rarity_of("Fitness Level"), Rarity::Epic);
        assert_eq!(rarity_of("Current Streak"), Rarity::Legendary);
        assert_eq!(rarity_of("Total Challenges"), Rarity::Epic);
        assert_eq!(rarity_of("Tokens Earned"), Rarity::Legendary);
        assert_eq!(rarity_of("Best Streak"), Rarity::Legendary);
    }

    #[test]
    fn test_fresh_standing_gets_baseline_rarities() {
        let card = AchievementCard::from_standing(&ProgressionStanding::default());

        assert_eq!(card.tier, Tier::Bronze);
        assert_eq!(card.traits[0].rarity, Rarity::Rare); // level
        assert_eq!(card.traits[1].rarity, Rarity::Epic); // current streak
        assert_eq!(card.traits[2].rarity, Rarity::Rare); // challenges
    }
}
