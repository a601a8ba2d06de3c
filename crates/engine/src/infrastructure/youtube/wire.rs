//! Activity listing payloads and their mapping to news items.

use chrono::{DateTime, Utc};
use loothub_domain::{IconType, NewsId, NewsItem};
use serde::Deserialize;

use super::classifier::classify_title;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

#[derive(Debug, Deserialize)]
pub struct ActivityListResponse {
    #[serde(default)]
    pub items: Vec<Activity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub snippet: ActivitySnippet,
    #[serde(default)]
    pub content_details: Option<ContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySnippet {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub high: Option<Thumbnail>,
    #[serde(default)]
    pub medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetails {
    #[serde(default)]
    pub upload: Option<UploadDetails>,
    #[serde(default)]
    pub playlist_item: Option<PlaylistItemDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadDetails {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemDetails {
    #[serde(default)]
    pub resource_id: Option<ResourceId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default)]
    pub video_id: Option<String>,
}

impl Activity {
    fn is_video_activity(&self) -> bool {
        matches!(self.snippet.kind.as_str(), "upload" | "playlistItem")
    }

    fn video_id(&self) -> Option<&str> {
        let details = self.content_details.as_ref()?;
        details
            .upload
            .as_ref()
            .and_then(|upload| upload.video_id.as_deref())
            .or_else(|| {
                details
                    .playlist_item
                    .as_ref()
                    .and_then(|item| item.resource_id.as_ref())
                    .and_then(|resource| resource.video_id.as_deref())
            })
            .filter(|id| !id.is_empty())
    }

    fn thumbnail_url(&self) -> Option<String> {
        let thumbnails = self.snippet.thumbnails.as_ref()?;
        thumbnails
            .high
            .as_ref()
            .or(thumbnails.medium.as_ref())
            .map(|thumbnail| thumbnail.url.clone())
    }
}

/// Render a publish time as the short en-US date label (`M/D/YYYY`).
pub fn display_date(published_at: DateTime<Utc>) -> String {
    published_at.format("%-m/%-d/%Y").to_string()
}

/// Map one activity, dropping non-video activities and entries without a video id.
pub fn map_activity(activity: &Activity) -> Option<NewsItem> {
    if !activity.is_video_activity() {
        return None;
    }
    let video_id = activity.video_id()?;

    Some(NewsItem {
        id: NewsId::new(video_id),
        title: activity.snippet.title.clone(),
        description: activity.snippet.description.clone(),
        date: activity
            .snippet
            .published_at
            .map(display_date)
            .unwrap_or_default(),
        category: classify_title(&activity.snippet.title),
        icon_type: IconType::Flame,
        url: Some(format!("{WATCH_URL}{video_id}")),
        thumbnail_url: activity.thumbnail_url(),
    })
}

/// Map a whole listing, preserving feed order.
pub fn map_activities(response: &ActivityListResponse) -> Vec<NewsItem> {
    response.items.iter().filter_map(map_activity).collect()
}
