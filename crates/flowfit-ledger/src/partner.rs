use crate::balance::BalanceManager;
use crate::supply::TokenSupply;
use crate::types::{Partner, TransferReason};
use anyhow::{bail, Result};
use flowfit_types::AccountAddress;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Registry of real-world partners where users spend FFT (gym visits,
/// supplements). Redemption is an ordinary on-ledger transfer from the user
/// to the partner's payout account.
pub struct PartnerRegistry {
    partners: Arc<RwLock<HashMap<String, Partner>>>,
    balances: Arc<BalanceManager>,
    supply: Arc<TokenSupply>,
}

impl PartnerRegistry {
    pub fn new(balances: Arc<BalanceManager>, supply: Arc<TokenSupply>) -> Self {
        Self {
            partners: Arc::new(RwLock::new(HashMap::new())),
            balances,
            supply,
        }
    }

    /// Insert or replace a partner entry
    pub async fn update_partner(&self, partner: Partner) {
        let mut partners = self.partners.write().await;

        info!(
            partner_id = %partner.id,
            cost = %partner.cost,
            active = partner.active,
            category = %partner.category,
            "Partner updated"
        );

        partners.insert(partner.id.clone(), partner);
    }

    pub async fn get_partner(&self, id: &str) -> Option<Partner> {
        let partners = self.partners.read().await;
        partners.get(id).cloned()
    }

    pub async fn active_partners(&self) -> Vec<Partner> {
        let partners = self.partners.read().await;
        partners.values().filter(|p| p.active).cloned().collect()
    }

    /// Spend the partner's redemption cost from the user's balance
    pub async fn redeem(&self, user: AccountAddress, partner_id: &str) -> Result<String> {
        let partner = {
            let partners = self.partners.read().await;
            partners
                .get(partner_id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Unknown partner: {}", partner_id))?
        };

        if !partner.active {
            bail!("Partner not active: {}", partner_id);
        }

        let tx_hash = self
            .balances
            .transfer(
                user,
                partner.payout_account,
                partner.cost,
                TransferReason::Redemption,
            )
            .await?;

        self.supply.record_redemption(partner.cost).await;

        info!(
            user = %user,
            partner_id = %partner_id,
            cost = %partner.cost,
            tx_hash = %tx_hash,
            "🏪 Redemption settled"
        );

        Ok(tx_hash)
    }
}
