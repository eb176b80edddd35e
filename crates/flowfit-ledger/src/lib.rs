pub mod balance;
pub mod partner;
pub mod storage;
pub mod supply;
pub mod types;

pub use balance::BalanceManager;
pub use partner::PartnerRegistry;
pub use storage::{LedgerStore, MemoryStore};
pub use supply::{SupplyMetrics, TokenSupply};
pub use types::{Partner, TransactionRecord, TransferEvent, TransferReason};

use anyhow::Result;
use chrono::Utc;
use flowfit_types::{AccountAddress, FftAmount};
use std::sync::Arc;

/// The ledger service the reward flow talks to: "mint amount X to user Y"
/// and "query balance for user Y". Retry and confirmation policy belong to
/// the caller; every operation here settles or fails synchronously.
pub struct LedgerEngine {
    pub supply: Arc<TokenSupply>,
    pub balances: Arc<BalanceManager>,
    pub partners: Arc<PartnerRegistry>,
}

impl LedgerEngine {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        let supply = Arc::new(TokenSupply::new());
        let balances = Arc::new(BalanceManager::new(store));
        let partners = Arc::new(PartnerRegistry::new(balances.clone(), supply.clone()));

        Self {
            supply,
            balances,
            partners,
        }
    }

    /// Mint newly issued reward tokens straight into a user's balance
    pub async fn mint_reward(
        &self,
        user: AccountAddress,
        amount: FftAmount,
        reason: TransferReason,
    ) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }

        self.supply.mint(amount, reason).await?;
        self.balances.credit(user, amount).await?;

        self.supply
            .add_transfer_event(TransferEvent {
                from: AccountAddress::minter(),
                to: user,
                amount,
                timestamp: Utc::now().timestamp(),
                reason,
            })
            .await;

        Ok(())
    }

    pub async fn balance_of(&self, user: AccountAddress) -> Result<FftAmount> {
        self.balances.get_balance(user).await
    }

    pub async fn total_supply(&self) -> FftAmount {
        self.supply.get_total_supply().await
    }
}
