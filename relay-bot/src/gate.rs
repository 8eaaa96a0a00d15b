//! Authorization gate: is this requester on the allow-list?
//!
//! Store errors are surfaced as [`GateError::Unavailable`]; the caller picks the policy
//! (the orchestrator logs and fails closed).

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use storage::{AllowListStore, StorageError};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum GateError {
    #[error("Allow-list store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only permission check over an [`AllowListStore`].
#[derive(Clone)]
pub struct AuthorizationGate {
    store: Arc<dyn AllowListStore>,
}

impl AuthorizationGate {
    pub fn new(store: Arc<dyn AllowListStore>) -> Self {
        Self { store }
    }

    /// `Ok(true)` iff `user_id` is on the allow-list.
    #[instrument(skip(self))]
    pub async fn is_permitted(&self, user_id: i64) -> Result<bool, GateError> {
        let allowed = self
            .store
            .is_allowed(user_id)
            .await
            .map_err(|e| GateError::Unavailable(e.to_string()))?;
        debug!(user_id, allowed, "Allow-list lookup");
        Ok(allowed)
    }
}

/// Fixed allow-list held in memory. Used when `ALLOWED_USERS` is configured.
#[derive(Debug, Clone, Default)]
pub struct StaticAllowList {
    ids: HashSet<i64>,
}

impl StaticAllowList {
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[async_trait]
impl AllowListStore for StaticAllowList {
    async fn is_allowed(&self, user_id: i64) -> Result<bool, StorageError> {
        Ok(self.ids.contains(&user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    #[async_trait]
    impl AllowListStore for BrokenStore {
        async fn is_allowed(&self, _user_id: i64) -> Result<bool, StorageError> {
            Err(StorageError::Database("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_static_allow_list() {
        let gate = AuthorizationGate::new(Arc::new(StaticAllowList::new([7, 8])));
        assert!(gate.is_permitted(7).await.unwrap());
        assert!(!gate.is_permitted(42).await.unwrap());
    }

    /// **Test: store errors are not silently mapped to "not permitted".**
    #[tokio::test]
    async fn test_store_error_is_unavailable() {
        let gate = AuthorizationGate::new(Arc::new(BrokenStore));
        let err = gate.is_permitted(7).await.unwrap_err();
        assert!(matches!(err, GateError::Unavailable(ref cause) if cause.contains("connection refused")));
    }

    #[tokio::test]
    async fn test_gate_over_sqlite_repository() {
        let repo = storage::AccessRepository::new("sqlite::memory:").await.unwrap();
        repo.allow_user(7).await.unwrap();
        let gate = AuthorizationGate::new(Arc::new(repo));
        assert!(gate.is_permitted(7).await.unwrap());
        assert!(!gate.is_permitted(42).await.unwrap());
    }
}
