//! Key-value persistence port.

use async_trait::async_trait;

use super::error::RepoError;

/// Durable, key-scoped blob storage.
///
/// Single-key granularity: there is no cross-key atomicity, each repository
/// owns exactly one key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<String>, RepoError>;
    async fn write(&self, key: &str, value: &str) -> Result<(), RepoError>;
    /// Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), RepoError>;
}
