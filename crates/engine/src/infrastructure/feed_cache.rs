//! Time-boxed cache around the remote video feed.
//!
//! The cached payload lives in the key-value store as `{timestamp, data}` so it
//! survives restarts. Every failure on this path degrades to an empty feed:
//! news listing must never fail or block because of the feed.

use std::sync::Arc;
use std::time::Duration;

use loothub_domain::NewsItem;
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::{ClockPort, KeyValueStore, VideoFeedPort};

/// Store key holding the cached feed payload.
pub const FEED_CACHE_KEY: &str = "fc_loot_youtube_cache_v4";

/// Maximum age of a cached payload before the feed is fetched again.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Serialize, Deserialize)]
struct CachedFeed {
    /// Epoch milliseconds at which `data` was fetched
    timestamp: i64,
    data: Vec<NewsItem>,
}

pub struct FeedCache {
    feed: Arc<dyn VideoFeedPort>,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn ClockPort>,
    freshness_window: Duration,
}

impl FeedCache {
    pub fn new(
        feed: Arc<dyn VideoFeedPort>,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            feed,
            store,
            clock,
            freshness_window: DEFAULT_FRESHNESS_WINDOW,
        }
    }

    pub fn with_freshness_window(mut self, window: Duration) -> Self {
        self.freshness_window = window;
        self
    }

    /// Recent feed items, from cache when fresh. Never fails.
    pub async fn fetch(&self) -> Vec<NewsItem> {
        if !self.feed.has_credentials() {
            tracing::warn!("Video feed API key is missing, skipping feed");
            return Vec::new();
        }

        let now_ms = self.clock.now().timestamp_millis();
        if let Some(items) = self.read_fresh(now_ms).await {
            tracing::debug!(count = items.len(), "Serving video feed from cache");
            return items;
        }

        match self.feed.recent_uploads().await {
            Ok(items) => {
                self.store_entry(now_ms, &items).await;
                items
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch video feed, continuing without it");
                Vec::new()
            }
        }
    }

    async fn read_fresh(&self, now_ms: i64) -> Option<Vec<NewsItem>> {
        let raw = match self.store.read(FEED_CACHE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read video feed cache");
                return None;
            }
        };

        let entry = match serde_json::from_str::<CachedFeed>(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding malformed video feed cache entry");
                self.clear().await;
                return None;
            }
        };

        // Future or overflowing timestamps are handled like malformed entries.
        match now_ms.checked_sub(entry.timestamp) {
            Some(age) if age < 0 => {
                tracing::warn!(
                    timestamp = entry.timestamp,
                    "Discarding video feed cache entry from the future"
                );
                self.clear().await;
                None
            }
            Some(age) if age < self.window_ms() => Some(entry.data),
            Some(_) => None,
            None => {
                tracing::warn!(
                    timestamp = entry.timestamp,
                    "Discarding video feed cache entry with out-of-range timestamp"
                );
                self.clear().await;
                None
            }
        }
    }

    async fn clear(&self) {
        if let Err(e) = self.store.remove(FEED_CACHE_KEY).await {
            tracing::warn!(error = %e, "Failed to clear video feed cache");
        }
    }

    async fn store_entry(&self, now_ms: i64, items: &[NewsItem]) {
        let entry = CachedFeed {
            timestamp: now_ms,
            data: items.to_vec(),
        };
        let json = match serde_json::to_string(&entry) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize video feed cache");
                return;
            }
        };
        if let Err(e) = self.store.write(FEED_CACHE_KEY, &json).await {
            tracing::warn!(error = %e, "Failed to write video feed cache");
        }
    }

    fn window_ms(&self) -> i64 {
        i64::try_from(self.freshness_window.as_millis()).unwrap_or(i64::MAX)
    }
}
