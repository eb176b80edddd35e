use crate::store::StandingStore;
use anyhow::Result;
use flowfit_challenges::{ChallengeCatalog, ChallengeDefinition, ChallengeManager};
use flowfit_ledger::{LedgerEngine, TransferReason};
use flowfit_progression::{EvolutionEvent, ProgressionEngine, ProgressionStanding, StreakSignal};
use flowfit_rewards::{ChallengeParameters, RewardBreakdown, RewardCalculator, UserModifiers};
use flowfit_types::AccountAddress;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

/// Everything the caller needs after one settled completion: the itemized
/// reward, the standing to render, and the evolution signal for the
/// external mint/evolve transaction flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionReceipt {
    pub breakdown: RewardBreakdown,
    pub standing: ProgressionStanding,
    pub evolution: Option<EvolutionEvent>,
}

/// Wires the calculator, progression engine, challenge lifecycle and ledger
/// into the completion pipeline. Completions for one user are processed
/// strictly one at a time; different users settle in parallel.
pub struct FlowFitEngine {
    calculator: RewardCalculator,
    progression: ProgressionEngine,
    pub ledger: Arc<LedgerEngine>,
    pub challenges: Arc<ChallengeManager>,
    pub catalog: ChallengeCatalog,
    standings: Arc<dyn StandingStore>,
    user_locks: Arc<RwLock<HashMap<AccountAddress, Arc<Mutex<()>>>>>,
}

impl FlowFitEngine {
    pub fn new(ledger: Arc<LedgerEngine>, standings: Arc<dyn StandingStore>) -> Self {
        Self {
            calculator: RewardCalculator::default(),
            progression: ProgressionEngine::new(),
            ledger,
            challenges: Arc::new(ChallengeManager::new()),
            catalog: ChallengeCatalog::default(),
            standings,
            user_locks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_calculator(mut self, calculator: RewardCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    /// Start the day's challenge for a user. The seed is the chain's
    /// randomness output for the day, supplied by the caller.
    pub async fn start_daily_challenge(
        &self,
        user: AccountAddress,
        seed: u64,
        day_epoch: u64,
    ) -> Result<ChallengeDefinition> {
        let definition = self
            .catalog
            .challenge_for_seed(seed)
            .ok_or_else(|| anyhow::anyhow!("Challenge catalog is empty"))?
            .clone();

        self.challenges
            .start(user, definition.clone(), day_epoch)
            .await?;

        Ok(definition)
    }

    pub async fn report_progress(
        &self,
        user: AccountAddress,
        value: f64,
        day_epoch: u64,
    ) -> Result<f64> {
        Ok(self.challenges.report_progress(user, value, day_epoch).await?)
    }

    /// Claim the user's active challenge and settle its rewards
    pub async fn complete_challenge(
        &self,
        user: AccountAddress,
        day_epoch: u64,
        perfect_form: bool,
        streak: StreakSignal,
    ) -> Result<CompletionReceipt> {
        let claimed = self.challenges.claim(user, day_epoch).await?;

        let params = ChallengeParameters {
            target_value: claimed.definition.target_value,
            base_reward: claimed.definition.base_reward,
        };

        self.settle_completion(user, params, claimed.progress, perfect_form, streak)
            .await
    }

    /// Settle one completion directly from challenge parameters, without
    /// going through the lifecycle manager
    pub async fn settle_completion(
        &self,
        user: AccountAddress,
        params: ChallengeParameters,
        progress: f64,
        perfect_form: bool,
        streak: StreakSignal,
    ) -> Result<CompletionReceipt> {
        let lock = self.lock_for(user).await;
        let _guard = lock.lock().await;

        let standing = self.standings.get(user).await?.unwrap_or_default();

        let modifiers = UserModifiers {
            progress,
            current_streak: standing.current_streak,
            perfect_form,
            level: standing.level,
        };

        let breakdown = self.calculator.calculate(&params, &modifiers)?;
        let outcome = self.progression.apply_completion(standing, &breakdown, streak)?;

        self.ledger
            .mint_reward(user, breakdown.total, TransferReason::ChallengeReward)
            .await?;
        self.standings.put(user, outcome.standing.clone()).await?;

        info!(
            user = %user,
            total = %breakdown.total,
            level = outcome.standing.level,
            tier = %outcome.standing.tier,
            evolution_ready = outcome.evolution.is_some(),
            "🏅 Completion settled"
        );

        Ok(CompletionReceipt {
            breakdown,
            standing: outcome.standing,
            evolution: outcome.evolution,
        })
    }

    pub async fn standing_of(&self, user: AccountAddress) -> Result<Option<ProgressionStanding>> {
        self.standings.get(user).await
    }

    async fn lock_for(&self, user: AccountAddress) -> Arc<Mutex<()>> {
        {
            let locks = self.user_locks.read().await;
            if let Some(lock) = locks.get(&user) {
                return lock.clone();
            }
        }

        let mut locks = self.user_locks.write().await;
        locks
            .entry(user)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStandingStore;
    use flowfit_ledger::MemoryStore;
    use flowfit_types::{FftAmount, FlowFitError};

    fn engine() -> FlowFitEngine {
        FlowFitEngine::new(
            Arc::new(LedgerEngine::new(Arc::new(MemoryStore::new()))),
            Arc::new(MemoryStandingStore::new()),
        )
    }

    fn params(target: f64, base: u64) -> ChallengeParameters {
        ChallengeParameters {
            target_value: target,
            base_reward: FftAmount::from_fft(base),
        }
    }

    #[tokio::test]
    async fn test_settlement_mints_and_persists() {
        let engine = engine();
        let user = AccountAddress::from_bytes([1; 32]);

        let receipt = engine
            .settle_completion(user, params(50.0, 100), 50.0, false, StreakSignal::Continued)
            .await
            .unwrap();

        assert_eq!(receipt.breakdown.total, FftAmount::from_fft(100));
        assert_eq!(
            engine.ledger.balance_of(user).await.unwrap(),
            FftAmount::from_fft(100)
        );

        let standing = engine.standing_of(user).await.unwrap().unwrap();
        assert_eq!(standing.total_challenges_completed, 1);
        assert_eq!(standing.current_streak, 1);
    }

    #[tokio::test]
    async fn test_calculator_error_mints_nothing() {
        let engine = engine();
        let user = AccountAddress::from_bytes([2; 32]);

        let result = engine
            .settle_completion(user, params(0.0, 100), 10.0, false, StreakSignal::Continued)
            .await;

        assert!(result
            .unwrap_err()
            .downcast_ref::<FlowFitError>()
            .is_some());
        assert_eq!(engine.ledger.balance_of(user).await.unwrap(), FftAmount::ZERO);
        assert!(engine.standing_of(user).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_daily_challenge_roundtrip() {
        let engine = engine();
        let user = AccountAddress::from_bytes([3; 32]);

        let definition = engine.start_daily_challenge(user, 2, 100).await.unwrap();
        engine
            .report_progress(user, definition.target_value, 100)
            .await
            .unwrap();

        let receipt = engine
            .complete_challenge(user, 100, true, StreakSignal::Continued)
            .await
            .unwrap();

        // Full completion plus the flat form bonus
        let base = definition.base_reward.to_fft();
        assert_eq!(receipt.breakdown.base_amount.to_fft(), base);
        assert_eq!(
            receipt.breakdown.form_bonus.to_fft(),
            (base as f64 * 0.2).floor() as u64
        );
        assert_eq!(
            engine.ledger.balance_of(user).await.unwrap(),
            receipt.breakdown.total
        );
    }

    #[tokio::test]
    async fn test_users_settle_independently() {
        let engine = Arc::new(engine());
        let users: Vec<AccountAddress> =
            (1..=8).map(|i| AccountAddress::from_bytes([i; 32])).collect();

        let mut handles = Vec::new();
        for user in users.clone() {
            let engine = engine.clone();
            handles.push(tokio::spawn(async move {
                engine
                    .settle_completion(
                        user,
                        params(50.0, 100),
                        50.0,
                        false,
                        StreakSignal::Continued,
                    )
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        for user in users {
            let standing = engine.standing_of(user).await.unwrap().unwrap();
            assert_eq!(standing.total_challenges_completed, 1);
        }
    }

    #[tokio::test]
    async fn test_same_user_completions_serialize() {
        let engine = Arc::new(engine());
        let user = AccountAddress::from_bytes([9; 32]);

        let mut handles = Vec::new();
        for _ in 0..10 {
            let engine = engine.clone();
            handles.push(tokio::spawn(async move {
                engine
                    .settle_completion(
                        user,
                        params(50.0, 100),
                        50.0,
                        false,
                        StreakSignal::Continued,
                    )
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let standing = engine.standing_of(user).await.unwrap().unwrap();
        assert_eq!(standing.total_challenges_completed, 10);
        assert_eq!(standing.current_streak, 10);
    }
}
