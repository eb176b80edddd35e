use crate::error::{ChallengeError, Result};
use crate::types::{ActiveChallenge, ChallengeDefinition, ChallengeStatus};
use flowfit_types::AccountAddress;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Tracks each user's active daily challenge: one per user per day, from
/// start through progress reports to a terminal claim or expiry.
pub struct ChallengeManager {
    active: Arc<RwLock<HashMap<AccountAddress, ActiveChallenge>>>,
    // Metrics
    pub challenges_started: Option<Arc<prometheus::IntCounter>>,
    pub progress_reports: Option<Arc<prometheus::IntCounter>>,
    pub challenges_claimed: Option<Arc<prometheus::IntCounter>>,
}

impl Default for ChallengeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ChallengeManager {
    pub fn new() -> Self {
        Self {
            active: Arc::new(RwLock::new(HashMap::new())),
            challenges_started: None,
            progress_reports: None,
            challenges_claimed: None,
        }
    }

    /// Set metrics for tracking challenge operations
    pub fn set_metrics(
        &mut self,
        challenges_started: Arc<prometheus::IntCounter>,
        progress_reports: Arc<prometheus::IntCounter>,
        challenges_claimed: Arc<prometheus::IntCounter>,
    ) {
        self.challenges_started = Some(challenges_started);
        self.progress_reports = Some(progress_reports);
        self.challenges_claimed = Some(challenges_claimed);
    }

    /// Start today's challenge for a user
    pub async fn start(
        &self,
        user: AccountAddress,
        definition: ChallengeDefinition,
        day_epoch: u64,
    ) -> Result<()> {
        let mut active = self.active.write().await;

        if let Some(existing) = active.get(&user) {
            if existing.is_active(day_epoch) {
                return Err(ChallengeError::AlreadyActive(user.to_string()));
            }
        }

        let challenge = ActiveChallenge::new(user, definition, day_epoch);

        info!(
            user = %user,
            kind = ?challenge.definition.kind,
            target = challenge.definition.target_value,
            base_reward = %challenge.definition.base_reward,
            day_epoch,
            "🎯 Challenge started"
        );

        active.insert(user, challenge);

        if let Some(ref counter) = self.challenges_started {
            counter.inc();
        }

        Ok(())
    }

    /// Accumulate reported work onto the user's active challenge
    pub async fn report_progress(
        &self,
        user: AccountAddress,
        value: f64,
        day_epoch: u64,
    ) -> Result<f64> {
        if !value.is_finite() || value < 0.0 {
            return Err(ChallengeError::InvalidProgress(format!(
                "progress increment must be non-negative, got {}",
                value
            )));
        }

        let mut active = self.active.write().await;
        let challenge = active
            .get_mut(&user)
            .ok_or_else(|| ChallengeError::NotFound(user.to_string()))?;

        if challenge.is_expired(day_epoch) {
            return Err(ChallengeError::Expired {
                user: user.to_string(),
                day_epoch,
            });
        }
        if challenge.status != ChallengeStatus::Active {
            return Err(ChallengeError::AlreadyClaimed(user.to_string()));
        }

        challenge.progress += value;

        if let Some(ref counter) = self.progress_reports {
            counter.inc();
        }

        debug!(
            user = %user,
            progress = challenge.progress,
            target = challenge.definition.target_value,
            "Progress reported"
        );

        Ok(challenge.progress)
    }

    /// Close out the user's challenge and return it with its final
    /// progress; terminal, a second claim is an error
    pub async fn claim(&self, user: AccountAddress, day_epoch: u64) -> Result<ActiveChallenge> {
        let mut active = self.active.write().await;
        let challenge = active
            .get_mut(&user)
            .ok_or_else(|| ChallengeError::NotFound(user.to_string()))?;

        if challenge.is_expired(day_epoch) {
            return Err(ChallengeError::Expired {
                user: user.to_string(),
                day_epoch,
            });
        }
        if challenge.status != ChallengeStatus::Active {
            return Err(ChallengeError::AlreadyClaimed(user.to_string()));
        }

        challenge.status = ChallengeStatus::Claimed;

        if let Some(ref counter) = self.challenges_claimed {
            counter.inc();
        }

        info!(
            user = %user,
            progress = challenge.progress,
            target = challenge.definition.target_value,
            "✅ Challenge claimed"
        );

        Ok(challenge.clone())
    }

    /// Mark every unclaimed challenge from earlier days as expired,
    /// returning how many were swept
    pub async fn expire_stale(&self, day_epoch: u64) -> usize {
        let mut active = self.active.write().await;
        let mut expired = 0;

        for challenge in active.values_mut() {
            if challenge.status == ChallengeStatus::Active && challenge.is_expired(day_epoch) {
                challenge.status = ChallengeStatus::Expired;
                expired += 1;
            }
        }

        if expired > 0 {
            debug!(expired, day_epoch, "Expired stale challenges");
        }

        expired
    }

    pub async fn get(&self, user: &AccountAddress) -> Option<ActiveChallenge> {
        let active = self.active.read().await;
        active.get(user).cloned()
    }
}
