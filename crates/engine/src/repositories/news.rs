//! News repository.
//!
//! Local items live under a single store key, most recently added first. Listing
//! puts the (cached) video feed in front of them without re-sorting or
//! de-duplicating across the two sources.

use std::sync::Arc;

use loothub_domain::{seed, NewsDraft, NewsId, NewsItem};
use tokio::sync::{Mutex, MutexGuard};

use super::collection::{load, load_or_seed, save, unique_id};
use super::latency::{pause, SimulatedLatency};
use crate::infrastructure::feed_cache::FeedCache;
use crate::infrastructure::ports::{KeyValueStore, RandomPort, RepoError};

/// Store key holding the serialized local news collection.
pub const NEWS_KEY: &str = "fc_loot_news";

pub struct NewsRepository {
    store: Arc<dyn KeyValueStore>,
    feed: Arc<FeedCache>,
    random: Arc<dyn RandomPort>,
    latency: SimulatedLatency,
    write_lock: Mutex<()>,
}

impl NewsRepository {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        feed: Arc<FeedCache>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            store,
            feed,
            random,
            latency: SimulatedLatency::none(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_latency(mut self, latency: SimulatedLatency) -> Self {
        self.latency = latency;
        self
    }

    /// Load the stored items, seeding the built-in set when the key is absent.
    pub async fn initialize(&self) -> Result<Vec<NewsItem>, RepoError> {
        if let Some(items) = load(self.store.as_ref(), NEWS_KEY).await? {
            return Ok(items);
        }
        let guard = self.write_lock.lock().await;
        self.load_locked(&guard).await
    }

    /// Seed-or-load. The guard ties every seed write to the write lock.
    async fn load_locked(
        &self,
        _guard: &MutexGuard<'_, ()>,
    ) -> Result<Vec<NewsItem>, RepoError> {
        load_or_seed(self.store.as_ref(), NEWS_KEY, seed::seed_news).await
    }

    /// Feed items (feed order) followed by local items (stored order).
    ///
    /// Feed problems never fail the listing; only storage errors do.
    pub async fn list(&self) -> Result<Vec<NewsItem>, RepoError> {
        let local = self.initialize().await?;
        let mut merged = self.feed.fetch().await;
        tracing::debug!(
            feed = merged.len(),
            local = local.len(),
            "Merged news sources"
        );
        merged.extend(local);
        Ok(merged)
    }

    /// Create an item from `draft` and prepend it to the stored collection.
    pub async fn add(&self, draft: NewsDraft) -> Result<NewsItem, RepoError> {
        pause(self.latency.add_news).await;
        let guard = self.write_lock.lock().await;

        let mut items = self.load_locked(&guard).await?;
        let id = unique_id(self.random.as_ref(), |candidate| {
            items.iter().any(|item| item.id.as_str() == candidate)
        });

        let item = NewsItem::from_draft(draft, NewsId::new(id));
        items.insert(0, item.clone());
        save(self.store.as_ref(), NEWS_KEY, &items).await?;

        tracing::info!(news_id = %item.id, category = %item.category, "Added news item");
        Ok(item)
    }

    /// Remove the stored item with `id`. Unknown ids are a no-op.
    pub async fn remove(&self, id: &NewsId) -> Result<(), RepoError> {
        pause(self.latency.remove_news).await;
        let guard = self.write_lock.lock().await;

        let mut items = self.load_locked(&guard).await?;
        let before = items.len();
        items.retain(|item| &item.id != id);
        save(self.store.as_ref(), NEWS_KEY, &items).await?;

        if items.len() < before {
            tracing::info!(news_id = %id, "Removed news item");
        } else {
            tracing::debug!(news_id = %id, "News item to remove was not stored");
        }
        Ok(())
    }
}
