use crate::DbError;
use crate::store::{STATUS_LIST_LIMIT, StatusCheck, StatusCheckStore};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Process-local status check store, used when no database is configured.
///
/// Holds at most `STATUS_LIST_LIMIT` checks. Once full, further inserts are
/// accepted and dropped, since `list` only ever returns the oldest
/// `STATUS_LIST_LIMIT` entries.
#[derive(Debug, Default)]
pub struct InMemoryStatusCheckStore {
    checks: RwLock<Vec<StatusCheck>>,
}

impl InMemoryStatusCheckStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatusCheckStore for InMemoryStatusCheckStore {
    async fn insert(&self, check: &StatusCheck) -> Result<(), DbError> {
        let mut checks = self.checks.write().await;
        if checks.len() >= STATUS_LIST_LIMIT as usize {
            tracing::debug!(client_name = %check.client_name, "Status store full; dropping check.");
            return Ok(());
        }
        checks.push(check.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StatusCheck>, DbError> {
        let checks = self.checks.read().await;
        Ok(checks.iter().take(STATUS_LIST_LIMIT as usize).cloned().collect())
    }
}
