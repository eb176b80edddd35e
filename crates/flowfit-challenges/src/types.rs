use flowfit_types::{AccountAddress, FftAmount};
use serde::{Deserialize, Serialize};

/// Exercise category of a daily challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeKind {
    PushUps,
    Squats,
    Running,
    Plank,
    JumpingJacks,
    Burpees,
}

/// One entry in the daily challenge catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeDefinition {
    pub kind: ChallengeKind,
    pub description: String,

    /// Full-completion threshold in the challenge's unit (reps, seconds, meters)
    pub target_value: f64,

    /// Token payout for 100% completion
    pub base_reward: FftAmount,
}

/// Lifecycle state of a user's active challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeStatus {
    /// Started, accepting progress reports
    Active,

    /// Progress claimed, rewards issued
    Claimed,

    /// Day rolled over before a claim
    Expired,
}

/// A challenge a user has started for a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveChallenge {
    pub user: AccountAddress,
    pub definition: ChallengeDefinition,
    pub day_epoch: u64,
    pub progress: f64,
    pub status: ChallengeStatus,
}

impl ActiveChallenge {
    pub fn new(user: AccountAddress, definition: ChallengeDefinition, day_epoch: u64) -> Self {
        Self {
            user,
            definition,
            day_epoch,
            progress: 0.0,
            status: ChallengeStatus::Active,
        }
    }

    pub fn is_active(&self, current_day_epoch: u64) -> bool {
        self.status == ChallengeStatus::Active && current_day_epoch == self.day_epoch
    }

    pub fn is_expired(&self, current_day_epoch: u64) -> bool {
        current_day_epoch > self.day_epoch
    }
}
