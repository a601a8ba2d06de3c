//! In-memory key-value store.
//!
//! Used by tests and by `STORE_BACKEND=memory` runs where nothing needs to
//! survive a restart.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::infrastructure::ports::{KeyValueStore, RepoError};

#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn read(&self, key: &str) -> Result<Option<String>, RepoError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), RepoError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), RepoError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store whose first write stalls, widening check-then-write windows (tests only).
#[cfg(test)]
pub struct StallingStore {
    inner: MemoryStore,
    stall: std::time::Duration,
    stalled: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl StallingStore {
    pub fn new(stall: std::time::Duration) -> Self {
        Self {
            inner: MemoryStore::new(),
            stall,
            stalled: std::sync::atomic::AtomicBool::new(false),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl KeyValueStore for StallingStore {
    async fn read(&self, key: &str) -> Result<Option<String>, RepoError> {
        self.inner.read(key).await
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), RepoError> {
        if !self.stalled.swap(true, std::sync::atomic::Ordering::SeqCst) {
            tokio::time::sleep(self.stall).await;
        }
        self.inner.write(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), RepoError> {
        self.inner.remove(key).await
    }
}
