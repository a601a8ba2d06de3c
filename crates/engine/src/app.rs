//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    config::EngineConfig,
    feed_cache::FeedCache,
    ports::{ClockPort, KeyValueStore, RandomPort, RepoError, VideoFeedPort},
};
use crate::repositories::{CodeRepository, NewsRepository, SimulatedLatency};
use crate::use_cases::{AdminGate, AutoDiscovery};

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub clock: Arc<dyn ClockPort>,
}

pub struct Repositories {
    pub codes: Arc<CodeRepository>,
    pub news: Arc<NewsRepository>,
}

pub struct UseCases {
    pub discovery: AutoDiscovery,
    pub admin: AdminGate,
}

impl App {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        feed: Arc<dyn VideoFeedPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        config: &EngineConfig,
    ) -> Self {
        let (latency, discovery) = if config.simulate_latency {
            (SimulatedLatency::storefront(), AutoDiscovery::paced())
        } else {
            (SimulatedLatency::none(), AutoDiscovery::immediate())
        };

        let feed_cache = Arc::new(
            FeedCache::new(feed, store.clone(), clock.clone())
                .with_freshness_window(config.feed_cache_ttl),
        );

        let codes = Arc::new(
            CodeRepository::new(store.clone(), clock.clone(), random.clone())
                .with_latency(latency),
        );
        let news = Arc::new(NewsRepository::new(store, feed_cache, random).with_latency(latency));

        Self {
            repositories: Repositories { codes, news },
            use_cases: UseCases {
                discovery,
                admin: AdminGate::new(config.admin_pin.clone()),
            },
            clock,
        }
    }

    /// Seed both collections if the store is empty.
    pub async fn initialize(&self) -> Result<(), RepoError> {
        let codes = self.repositories.codes.initialize().await?;
        let news = self.repositories.news.initialize().await?;
        tracing::info!(
            codes = codes.len(),
            news = news.len(),
            "Catalog initialized"
        );
        Ok(())
    }
}
