use crate::storage::LedgerStore;
use crate::types::{TransactionRecord, TransferReason};
use anyhow::{bail, Result};
use chrono::Utc;
use flowfit_types::{AccountAddress, FftAmount};
use std::sync::Arc;
use tracing::{debug, info};

/// Account balance bookkeeping over a pluggable store
pub struct BalanceManager {
    store: Arc<dyn LedgerStore>,
}

impl BalanceManager {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    pub async fn get_balance(&self, address: AccountAddress) -> Result<FftAmount> {
        self.store.get_balance(address).await
    }

    pub async fn credit(&self, address: AccountAddress, amount: FftAmount) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }

        let current = self.store.get_balance(address).await?;
        let new_balance = current
            .checked_add(amount)
            .ok_or_else(|| anyhow::anyhow!("Balance overflow for {}", address))?;

        if new_balance > FftAmount::MAX_SUPPLY {
            bail!("Balance would exceed max supply");
        }

        self.store.set_balance(address, new_balance).await?;

        info!(
            address = %address,
            amount = amount.to_fft(),
            balance_after = new_balance.to_fft(),
            "💰 Balance credited"
        );
        Ok(())
    }

    pub async fn debit(&self, address: AccountAddress, amount: FftAmount) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }

        let current = self.store.get_balance(address).await?;
        let new_balance = current.checked_sub(amount).ok_or_else(|| {
            anyhow::anyhow!(
                "Insufficient balance for {}: has {}, needs {}",
                address,
                current,
                amount
            )
        })?;

        self.store.set_balance(address, new_balance).await?;

        info!(
            address = %address,
            amount = amount.to_fft(),
            balance_after = new_balance.to_fft(),
            "💸 Balance debited"
        );
        Ok(())
    }

    pub async fn transfer(
        &self,
        from: AccountAddress,
        to: AccountAddress,
        amount: FftAmount,
        reason: TransferReason,
    ) -> Result<String> {
        if amount.is_zero() {
            bail!("Cannot transfer zero amount");
        }
        if from == to {
            bail!("Cannot transfer to same address");
        }

        self.store.begin_transaction().await?;

        match self.transfer_internal(from, to, amount).await {
            Ok(tx_hash) => {
                self.store.commit_transaction().await?;

                let record = TransactionRecord {
                    from,
                    to,
                    amount,
                    timestamp: Utc::now(),
                    tx_hash: tx_hash.clone(),
                    reason,
                };

                // History is best-effort: a failed record must not unwind a
                // settled transfer
                if let Err(e) = self.store.record_transaction(record).await {
                    debug!(tx_hash = %tx_hash, error = %e, "Failed to record transaction");
                }

                info!(
                    from = %from,
                    to = %to,
                    amount = amount.to_fft(),
                    tx_hash = %tx_hash,
                    reason = ?reason,
                    "✅ Transfer committed"
                );
                Ok(tx_hash)
            }
            Err(e) => {
                info!(
                    from = %from,
                    to = %to,
                    amount = amount.to_fft(),
                    error = %e,
                    "❌ Transfer rolled back"
                );
                self.store.rollback_transaction().await?;
                Err(e)
            }
        }
    }

    async fn transfer_internal(
        &self,
        from: AccountAddress,
        to: AccountAddress,
        amount: FftAmount,
    ) -> Result<String> {
        let from_balance = self.store.get_balance(from).await?;
        if from_balance < amount {
            bail!(
                "Insufficient balance: {} has {}, needs {}",
                from,
                from_balance,
                amount
            );
        }

        let to_balance = self.store.get_balance(to).await?;
        let new_from_balance = from_balance.saturating_sub(amount);
        let new_to_balance = to_balance
            .checked_add(amount)
            .ok_or_else(|| anyhow::anyhow!("Balance overflow for recipient"))?;

        self.store.set_balance(from, new_from_balance).await?;
        self.store.set_balance(to, new_to_balance).await?;

        let now = Utc::now().timestamp();
        let mut hasher = blake3::Hasher::new();
        hasher.update(from.as_bytes());
        hasher.update(to.as_bytes());
        hasher.update(&amount.to_fft().to_le_bytes());
        hasher.update(&now.to_le_bytes());
        let tx_hash = hex::encode(hasher.finalize().as_bytes());

        Ok(tx_hash)
    }

    pub async fn get_transaction_history(
        &self,
        address: AccountAddress,
    ) -> Result<Vec<TransactionRecord>> {
        self.store.get_transaction_history(address).await
    }
}
