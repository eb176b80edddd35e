use crate::types::{TransferEvent, TransferReason};
use anyhow::{bail, Result};
use flowfit_types::FftAmount;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct SupplyMetrics {
    pub total_supply: FftAmount,
    pub reward_issued: FftAmount,
    pub redeemed: FftAmount,
}

/// Tracks total FFT issuance against the hard supply cap
pub struct TokenSupply {
    metrics: Arc<RwLock<SupplyMetrics>>,
    transfer_history: Arc<RwLock<Vec<TransferEvent>>>,
}

impl Default for TokenSupply {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSupply {
    pub fn new() -> Self {
        Self {
            metrics: Arc::new(RwLock::new(SupplyMetrics::default())),
            transfer_history: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn mint(&self, amount: FftAmount, reason: TransferReason) -> Result<()> {
        let mut metrics = self.metrics.write().await;

        let new_supply = metrics
            .total_supply
            .checked_add(amount)
            .ok_or_else(|| anyhow::anyhow!("Supply overflow"))?;

        if new_supply > FftAmount::MAX_SUPPLY {
            bail!(
                "Cannot mint: would exceed max supply of {}",
                FftAmount::MAX_SUPPLY
            );
        }

        metrics.total_supply = new_supply;
        if matches!(
            reason,
            TransferReason::ChallengeReward | TransferReason::EvolutionGrant
        ) {
            metrics.reward_issued = metrics.reward_issued.saturating_add(amount);
        }

        info!(
            amount = %amount,
            reason = ?reason,
            total_supply = %new_supply,
            "🪙 Tokens minted"
        );
        Ok(())
    }

    pub async fn record_redemption(&self, amount: FftAmount) {
        let mut metrics = self.metrics.write().await;
        metrics.redeemed = metrics.redeemed.saturating_add(amount);
    }

    pub async fn can_mint(&self, amount: FftAmount) -> bool {
        let metrics = self.metrics.read().await;
        match metrics.total_supply.checked_add(amount) {
            Some(new_supply) => new_supply <= FftAmount::MAX_SUPPLY,
            None => false,
        }
    }

    pub async fn remaining_mintable(&self) -> FftAmount {
        let metrics = self.metrics.read().await;
        FftAmount::MAX_SUPPLY.saturating_sub(metrics.total_supply)
    }

    pub async fn get_total_supply(&self) -> FftAmount {
        let metrics = self.metrics.read().await;
        metrics.total_supply
    }

    pub async fn get_metrics(&self) -> SupplyMetrics {
        let metrics = self.metrics.read().await;
        metrics.clone()
    }

    pub async fn add_transfer_event(&self, event: TransferEvent) {
        let mut history = self.transfer_history.write().await;
        history.push(event);

        // Keep only last 10000 events to prevent unbounded growth
        if history.len() > 10_000 {
            history.drain(0..1000);
        }
    }

    pub async fn get_transfer_history(&self, limit: usize) -> Vec<TransferEvent> {
        let history = self.transfer_history.read().await;
        let start = history.len().saturating_sub(limit);
        history[start..].to_vec()
    }
}
