use crate::config::RewardConfig;
use flowfit_types::{FftAmount, FlowFitError, Result};
use serde::{Deserialize, Serialize};

/// Parameters of the challenge being rewarded
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChallengeParameters {
    /// Full-completion threshold (e.g. repetition count)
    pub target_value: f64,

    /// Token amount for 100% completion
    pub base_reward: FftAmount,
}

/// Per-user modifiers applied on top of the challenge parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UserModifiers {
    /// Work reported toward `target_value`; over-reporting clamps at 100%
    pub progress: f64,

    /// Consecutive completed challenge-days going into this completion
    pub current_streak: u32,

    /// Quality bonus eligibility
    pub perfect_form: bool,

    /// User's progression level
    pub level: u32,
}

/// Itemized reward for one challenge completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    pub base_amount: FftAmount,
    pub streak_bonus: FftAmount,
    pub form_bonus: FftAmount,
    pub level_bonus: FftAmount,
    pub total: FftAmount,
}

impl RewardBreakdown {
    /// Invariant: total equals the sum of its components.
    pub fn is_consistent(&self) -> bool {
        self.base_amount
            .checked_add(self.streak_bonus)
            .and_then(|s| s.checked_add(self.form_bonus))
            .and_then(|s| s.checked_add(self.level_bonus))
            == Some(self.total)
    }
}

/// Computes a reward breakdown from challenge parameters and user modifiers.
/// Pure and deterministic: identical inputs always produce the identical
/// breakdown, a requirement for auditable on-chain reward issuance.
#[derive(Debug, Clone, Default)]
pub struct RewardCalculator {
    config: RewardConfig,
}

impl RewardCalculator {
    pub fn new(config: RewardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    pub fn calculate(
        &self,
        params: &ChallengeParameters,
        modifiers: &UserModifiers,
    ) -> Result<RewardBreakdown> {
        if !params.target_value.is_finite() || params.target_value <= 0.0 {
            return Err(FlowFitError::InvalidParameter(format!(
                "target_value must be positive, got {}",
                params.target_value
            )));
        }
        if !modifiers.progress.is_finite() || modifiers.progress < 0.0 {
            return Err(FlowFitError::InvalidParameter(format!(
                "progress must be non-negative, got {}",
                modifiers.progress
            )));
        }

        // Over-reporting clamps at full completion
        let completion_ratio = (modifiers.progress / params.target_value).min(1.0);

        let base_reward = params.base_reward.to_fft();
        let base_amount = floor_tokens(base_reward as f64 * completion_ratio);

        let streak_multiplier = (modifiers.current_streak as f64 * self.config.streak_rate_per_day)
            .min(self.config.streak_cap);
        let streak_bonus = floor_tokens(base_amount as f64 * streak_multiplier);

        // Flat bonus off the full base reward: partial completion with
        // perfect form still pays out
        let form_bonus = if modifiers.perfect_form {
            floor_tokens(base_reward as f64 * self.config.form_rate)
        } else {
            0
        };

        let level_multiplier = modifiers.level as f64 * self.config.level_rate_per_level;
        let level_bonus = floor_tokens(base_amount as f64 * level_multiplier);

        let total = base_amount + streak_bonus + form_bonus + level_bonus;

        Ok(RewardBreakdown {
            base_amount: FftAmount::from_fft(base_amount),
            streak_bonus: FftAmount::from_fft(streak_bonus),
            form_bonus: FftAmount::from_fft(form_bonus),
            level_bonus: FftAmount::from_fft(level_bonus),
            total: FftAmount::from_fft(total),
        })
    }
}

fn floor_tokens(value: f64) -> u64 {
    value.floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc() -> RewardCalculator {
        RewardCalculator::default()
    }

    fn params(target: f64, base: u64) -> ChallengeParameters {
        ChallengeParameters {
            target_value: target,
            base_reward: FftAmount::from_fft(base),
        }
    }

    #[test]
    fn test_full_completion_with_all_bonuses() {
        // target=50, base=100, progress=50, streak=7, perfect form, level=8
        let breakdown = calc()
            .calculate(
                &params(50.0, 100),
                &UserModifiers {
                    progress: 50.0,
                    current_streak: 7,
                    perfect_form: true,
                    level: 8,
                },
            )
            .unwrap();

        assert_eq!(breakdown.base_amount, FftAmount::from_fft(100));
        assert_eq!(breakdown.streak_bonus, FftAmount::from_fft(35));
        assert_eq!(breakdown.form_bonus, FftAmount::from_fft(20));
        assert_eq!(breakdown.level_bonus, FftAmount::from_fft(16));
        assert_eq!(breakdown.total, FftAmount::from_fft(171));
        assert!(breakdown.is_consistent());
    }

    #[test]
    fn test_half_completion_keeps_flat_form_bonus() {
        let breakdown = calc()
            .calculate(
                &params(50.0, 100),
                &UserModifiers {
                    progress: 25.0,
                    current_streak: 7,
                    perfect_form: true,
                    level: 8,
                },
            )
            .unwrap();

        assert_eq!(breakdown.base_amount, FftAmount::from_fft(50));
        assert_eq!(breakdown.streak_bonus, FftAmount::from_fft(17)); // 50 * 0.35 floors
        assert_eq!(breakdown.form_bonus, FftAmount::from_fft(20)); // unaffected by ratio
        assert_eq!(breakdown.level_bonus, FftAmount::from_fft(8));
        assert_eq!(breakdown.total, FftAmount::from_fft(95));
    }

    #[test]
    fn test_no_modifiers_pays_base_only() {
        let breakdown = calc()
            .calculate(
                &params(30.0, 60),
                &UserModifiers {
                    progress: 30.0,
                    current_streak: 0,
                    perfect_form: false,
                    level: 0,
                },
            )
            .unwrap();

        assert_eq!(breakdown.streak_bonus, FftAmount::ZERO);
        assert_eq!(breakdown.form_bonus, FftAmount::ZERO);
        assert_eq!(breakdown.level_bonus, FftAmount::ZERO);
        assert_eq!(breakdown.total, breakdown.base_amount);
    }

    #[test]
    fn test_over_reporting_clamps_at_target() {
        let at_target = calc()
            .calculate(
                &params(50.0, 100),
                &UserModifiers {
                    progress: 50.0,
                    current_streak: 3,
                    perfect_form: false,
                    level: 2,
                },
            )
            .unwrap();
        let over_target = calc()
            .calculate(
                &params(50.0, 100),
                &UserModifiers {
                    progress: 500.0,
                    current_streak: 3,
                    perfect_form: false,
                    level: 2,
                },
            )
            .unwrap();

        assert_eq!(at_target, over_target);
    }

    #[test]
    fn test_streak_multiplier_caps_at_ten_days() {
        let modifiers = |streak| UserModifiers {
            progress: 50.0,
            current_streak: streak,
            perfect_form: false,
            level: 0,
        };

        let at_cap = calc().calculate(&params(50.0, 100), &modifiers(10)).unwrap();
        let beyond_cap = calc().calculate(&params(50.0, 100), &modifiers(47)).unwrap();

        assert_eq!(at_cap.streak_bonus, FftAmount::from_fft(50));
        assert_eq!(at_cap.streak_bonus, beyond_cap.streak_bonus);
    }

    #[test]
    fn test_perfect_form_adds_exactly_twenty_percent_of_base_reward() {
        let base = UserModifiers {
            progress: 10.0,
            current_streak: 4,
            perfect_form: false,
            level: 5,
        };
        let with_form = UserModifiers {
            perfect_form: true,
            ..base
        };

        let without = calc().calculate(&params(40.0, 85), &base).unwrap();
        let with = calc().calculate(&params(40.0, 85), &with_form).unwrap();

        assert_eq!(
            with.total.to_fft() - without.total.to_fft(),
            (85.0_f64 * 0.2).floor() as u64
        );
    }

    #[test]
    fn test_total_monotone_in_progress() {
        let mut previous = 0u64;
        for tenths in 0..=600 {
            let progress = tenths as f64 / 10.0;
            let breakdown = calc()
                .calculate(
                    &params(50.0, 100),
                    &UserModifiers {
                        progress,
                        current_streak: 6,
                        perfect_form: true,
                        level: 12,
                    },
                )
                .unwrap();
            assert!(
                breakdown.total.to_fft() >= previous,
                "total decreased at progress {}",
                progress
            );
            previous = breakdown.total.to_fft();
        }
    }

    #[test]
    fn test_total_monotone_in_streak_and_level() {
        let base = |streak, level| {
            calc()
                .calculate(
                    &params(50.0, 100),
                    &UserModifiers {
                        progress: 35.0,
                        current_streak: streak,
                        perfect_form: false,
                        level,
                    },
                )
                .unwrap()
                .total
                .to_fft()
        };

        for streak in 0..20 {
            assert!(base(streak + 1, 3) >= base(streak, 3));
        }
        for level in 0..60 {
            assert!(base(3, level + 1) >= base(3, level));
        }
    }

    #[test]
    fn test_rejects_non_positive_target() {
        let result = calc().calculate(
            &params(0.0, 100),
            &UserModifiers {
                progress: 10.0,
                current_streak: 0,
                perfect_form: false,
                level: 0,
            },
        );
        assert!(matches!(result, Err(FlowFitError::InvalidParameter(_))));
    }

    #[test]
    fn test_rejects_negative_progress() {
        let result = calc().calculate(
            &params(50.0, 100),
            &UserModifiers {
                progress: -1.0,
                current_streak: 0,
                perfect_form: false,
                level: 0,
            },
        );
        assert!(matches!(result, Err(FlowFitError::InvalidParameter(_))));
    }

    #[test]
    fn test_zero_base_reward_yields_zero_everything() {
        let breakdown = calc()
            .calculate(
                &params(50.0, 0),
                &UserModifiers {
                    progress: 50.0,
                    current_streak: 10,
                    perfect_form: true,
                    level: 30,
                },
            )
            .unwrap();
        assert_eq!(breakdown.total, FftAmount::ZERO);
    }
}
