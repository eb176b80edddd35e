use anyhow::Result;
use async_trait::async_trait;
use flowfit_progression::ProgressionStanding;
use flowfit_types::AccountAddress;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Where standings live between completions. The durable store is the
/// external persistence collaborator; the memory implementation backs tests
/// and single-process deployments.
#[async_trait]
pub trait StandingStore: Send + Sync {
    async fn get(&self, user: AccountAddress) -> Result<Option<ProgressionStanding>>;
    async fn put(&self, user: AccountAddress, standing: ProgressionStanding) -> Result<()>;
}

pub struct MemoryStandingStore {
    standings: Arc<RwLock<HashMap<AccountAddress, ProgressionStanding>>>,
}

impl Default for MemoryStandingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStandingStore {
    pub fn new() -> Self {
        Self {
            standings: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl StandingStore for MemoryStandingStore {
    async fn get(&self, user: AccountAddress) -> Result<Option<ProgressionStanding>> {
        let standings = self.standings.read().await;
        Ok(standings.get(&user).cloned())
    }

    async fn put(&self, user: AccountAddress, standing: ProgressionStanding) -> Result<()> {
        let mut standings = self.standings.write().await;
        standings.insert(user, standing);
        Ok(())
    }
}
