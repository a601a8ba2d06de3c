//! Loot code repository.

use std::sync::Arc;

use loothub_domain::{active_first, seed, CodeDraft, CodeId, LootCode};
use tokio::sync::{Mutex, MutexGuard};

use super::collection::{load, load_or_seed, save, unique_id};
use super::latency::{pause, SimulatedLatency};
use crate::infrastructure::ports::{ClockPort, KeyValueStore, RandomPort, RepoError};

/// Store key holding the serialized code collection.
pub const CODES_KEY: &str = "fc_loot_codes";

/// Seeds, lists and appends loot codes.
///
/// The stored collection is kept newest-added first; ordering for display is
/// applied on read. Codes are never updated or deleted.
pub struct CodeRepository {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    latency: SimulatedLatency,
    write_lock: Mutex<()>,
}

impl CodeRepository {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            store,
            clock,
            random,
            latency: SimulatedLatency::none(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_latency(mut self, latency: SimulatedLatency) -> Self {
        self.latency = latency;
        self
    }

    /// Load the stored codes, seeding the built-in set when the key is absent.
    pub async fn initialize(&self) -> Result<Vec<LootCode>, RepoError> {
        if let Some(codes) = load(self.store.as_ref(), CODES_KEY).await? {
            return Ok(codes);
        }
        let guard = self.write_lock.lock().await;
        self.load_locked(&guard).await
    }

    /// Seed-or-load. The guard ties every seed write to the write lock.
    async fn load_locked(
        &self,
        _guard: &MutexGuard<'_, ()>,
    ) -> Result<Vec<LootCode>, RepoError> {
        load_or_seed(self.store.as_ref(), CODES_KEY, seed::seed_codes).await
    }

    /// All codes, active first, then newest first.
    pub async fn list(&self) -> Result<Vec<LootCode>, RepoError> {
        pause(self.latency.list_codes).await;
        let mut codes = self.initialize().await?;
        codes.sort_by(active_first);
        Ok(codes)
    }

    /// Same ordering as [`list`](Self::list) without expired codes.
    pub async fn list_visible(&self) -> Result<Vec<LootCode>, RepoError> {
        let mut codes = self.list().await?;
        codes.retain(LootCode::is_visible);
        Ok(codes)
    }

    /// Create a code from `draft` and prepend it to the stored collection.
    pub async fn add(&self, draft: CodeDraft) -> Result<LootCode, RepoError> {
        pause(self.latency.add_code).await;
        let guard = self.write_lock.lock().await;

        let mut codes = self.load_locked(&guard).await?;
        let id = unique_id(self.random.as_ref(), |candidate| {
            codes.iter().any(|code| code.id.as_str() == candidate)
        });

        // Keep creation times monotonic even if the wall clock steps back.
        let now = self.clock.now();
        let created_at = codes
            .iter()
            .map(|code| code.created_at)
            .max()
            .map_or(now, |latest| latest.max(now));

        let code = LootCode::from_draft(draft, CodeId::new(id), created_at);
        codes.insert(0, code.clone());
        save(self.store.as_ref(), CODES_KEY, &codes).await?;

        tracing::info!(
            code_id = %code.id,
            code = %code.code,
            status = %code.status,
            "Added loot code"
        );
        Ok(code)
    }
}
