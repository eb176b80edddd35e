use crate::types::TransactionRecord;
use anyhow::Result;
use async_trait::async_trait;
use flowfit_types::{AccountAddress, FftAmount};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

type BalanceMap = HashMap<AccountAddress, FftAmount>;

/// Backing store for balances and transaction history. Durable persistence
/// lives outside the core; this trait is the seam it plugs into, and the
/// in-memory implementation is what the core and its tests run against.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn get_balance(&self, address: AccountAddress) -> Result<FftAmount>;
    async fn set_balance(&self, address: AccountAddress, balance: FftAmount) -> Result<()>;
    async fn get_all_accounts(&self) -> Result<Vec<AccountAddress>>;

    async fn begin_transaction(&self) -> Result<()>;
    async fn commit_transaction(&self) -> Result<()>;
    async fn rollback_transaction(&self) -> Result<()>;

    async fn record_transaction(&self, tx: TransactionRecord) -> Result<()>;
    async fn get_transaction_history(
        &self,
        address: AccountAddress,
    ) -> Result<Vec<TransactionRecord>>;
}

pub struct MemoryStore {
    balances: Arc<RwLock<BalanceMap>>,
    transaction_backup: Arc<RwLock<Option<BalanceMap>>>,
    transaction_history: Arc<RwLock<Vec<TransactionRecord>>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            balances: Arc::new(RwLock::new(HashMap::new())),
            transaction_backup: Arc::new(RwLock::new(None)),
            transaction_history: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn get_balance(&self, address: AccountAddress) -> Result<FftAmount> {
        let balances = self.balances.read().await;
        Ok(balances.get(&address).copied().unwrap_or(FftAmount::ZERO))
    }

    async fn set_balance(&self, address: AccountAddress, balance: FftAmount) -> Result<()> {
        let mut balances = self.balances.write().await;

        if balance == FftAmount::ZERO {
            balances.remove(&address);
        } else {
            balances.insert(address, balance);
        }

        Ok(())
    }

    async fn get_all_accounts(&self) -> Result<Vec<AccountAddress>> {
        let balances = self.balances.read().await;
        Ok(balances.keys().copied().collect())
    }

    async fn begin_transaction(&self) -> Result<()> {
        let balances = self.balances.read().await;
        let mut backup = self.transaction_backup.write().await;
        *backup = Some(balances.clone());
        Ok(())
    }

    async fn commit_transaction(&self) -> Result<()> {
        let mut backup = self.transaction_backup.write().await;
        *backup = None;
        Ok(())
    }

    async fn rollback_transaction(&self) -> Result<()> {
        let mut backup = self.transaction_backup.write().await;

        if let Some(snapshot) = backup.take() {
            let mut balances = self.balances.write().await;
            *balances = snapshot;
            info!("❌ Ledger transaction rolled back (snapshot restored)");
        }

        Ok(())
    }

    async fn record_transaction(&self, tx: TransactionRecord) -> Result<()> {
        let mut history = self.transaction_history.write().await;
        history.push(tx);
        Ok(())
    }

    async fn get_transaction_history(
        &self,
        address: AccountAddress,
    ) -> Result<Vec<TransactionRecord>> {
        let history = self.transaction_history.read().await;
        Ok(history
            .iter()
            .filter(|tx| tx.from == address || tx.to == address)
            .cloned()
            .collect())
    }
}
