use async_trait::async_trait;

use crate::error::StorageError;

/// Read-only allow-list lookup. Presence of a user id means the user is permitted.
///
/// Connectivity problems must come back as `Err`, never as `Ok(false)`; the caller decides
/// what an unreachable store means.
#[async_trait]
pub trait AllowListStore: Send + Sync {
    async fn is_allowed(&self, user_id: i64) -> Result<bool, StorageError>;
}
