pub mod calculator;
pub mod config;

pub use calculator::{ChallengeParameters, RewardBreakdown, RewardCalculator, UserModifiers};
pub use config::RewardConfig;
