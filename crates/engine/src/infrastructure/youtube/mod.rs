//! YouTube Data API client for the official channel's activity feed.

pub mod classifier;
pub mod wire;

use async_trait::async_trait;
use loothub_domain::NewsItem;
use reqwest::Client;
use std::time::Duration;

use crate::infrastructure::ports::{FeedError, VideoFeedPort};
use wire::ActivityListResponse;

/// Default API host.
pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com";

/// EA SPORTS FC Mobile official channel.
pub const DEFAULT_CHANNEL_ID: &str = "UCDK7jNQhLIYAiYqe-lWpZVQ";

/// Number of activity entries requested per call.
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Connection settings for [`YouTubeClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YouTubeConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub channel_id: String,
    pub max_results: u32,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_YOUTUBE_BASE_URL.to_string(),
            api_key: None,
            channel_id: DEFAULT_CHANNEL_ID.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Client for the `activities` listing endpoint.
#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    channel_id: String,
    max_results: u32,
}

impl YouTubeClient {
    pub fn new(config: YouTubeConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self::with_http_client(config, client)
    }

    /// Create client around a preconfigured HTTP client (for testing).
    pub fn with_http_client(config: YouTubeConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.filter(|key| !key.trim().is_empty()),
            channel_id: config.channel_id,
            max_results: config.max_results,
        }
    }
}

#[async_trait]
impl VideoFeedPort for YouTubeClient {
    fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    async fn recent_uploads(&self) -> Result<Vec<NewsItem>, FeedError> {
        let api_key = self.api_key.as_deref().ok_or(FeedError::MissingApiKey)?;
        let max_results = self.max_results.to_string();

        let response = self
            .client
            .get(format!("{}/youtube/v3/activities", self.base_url))
            .query(&[
                ("part", "snippet,contentDetails"),
                ("channelId", self.channel_id.as_str()),
                ("maxResults", max_results.as_str()),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(|e| FeedError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                "YouTube activity request failed"
            );
            return Err(FeedError::RequestFailed(format!("HTTP {}", status)));
        }

        let listing: ActivityListResponse = response
            .json()
            .await
            .map_err(|e| FeedError::InvalidResponse(e.to_string()))?;

        let items = wire::map_activities(&listing);
        tracing::debug!(
            fetched = listing.items.len(),
            kept = items.len(),
            channel_id = %self.channel_id,
            "Fetched YouTube activities"
        );
        Ok(items)
    }
}
