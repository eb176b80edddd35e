use chrono::{DateTime, Utc};
use flowfit_types::{AccountAddress, FftAmount};
use serde::{Deserialize, Serialize};

/// Why tokens moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferReason {
    /// Minted for a completed challenge
    ChallengeReward,

    /// One-off grant accompanying a tier evolution
    EvolutionGrant,

    /// Spent at a redemption partner
    Redemption,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferEvent {
    pub from: AccountAddress,
    pub to: AccountAddress,
    pub amount: FftAmount,
    pub timestamp: i64,
    pub reason: TransferReason,
}

/// Persisted record of a settled transfer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub from: AccountAddress,
    pub to: AccountAddress,
    pub amount: FftAmount,
    pub timestamp: DateTime<Utc>,
    pub tx_hash: String,
    pub reason: TransferReason,
}

/// A real-world partner accepting FFT (gyms, supplement stores)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub payout_account: AccountAddress,

    /// Token cost of one redemption at this partner
    pub cost: FftAmount,

    pub active: bool,
    pub category: String,
}
