//! External service port traits.

use async_trait::async_trait;
use loothub_domain::NewsItem;

use super::error::FeedError;

/// Remote video activity feed for the game's official channel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoFeedPort: Send + Sync {
    /// Whether credentials are configured; without them no request is attempted.
    fn has_credentials(&self) -> bool;

    /// Most recent uploads already mapped to news items, in feed order.
    async fn recent_uploads(&self) -> Result<Vec<NewsItem>, FeedError>;
}
