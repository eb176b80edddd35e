use serde::{Deserialize, Serialize};

/// Reward formula tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Streak bonus per consecutive day (fraction of the earned base amount)
    pub streak_rate_per_day: f64,

    /// Upper bound on the streak multiplier
    pub streak_cap: f64,

    /// Perfect-form bonus as a fraction of the full base reward. Flat: not
    /// prorated by completion ratio.
    pub form_rate: f64,

    /// Level bonus per level (fraction of the earned base amount, uncapped)
    pub level_rate_per_level: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            streak_rate_per_day: 0.05,
            streak_cap: 0.5,
            form_rate: 0.2,
            level_rate_per_level: 0.02,
        }
    }
}
