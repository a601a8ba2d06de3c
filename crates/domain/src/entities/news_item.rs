//! News item entity - Announcements, events and leaks shown on the news page
//!
//! Local items are created by the news repository. Items coming from the video
//! feed reuse the upstream video id and are never persisted in the news list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::NewsId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: NewsId,
    pub title: String,
    pub description: String,
    /// Display label, not necessarily a parseable date (e.g. "Next Week")
    pub date: String,
    pub category: NewsCategory,
    pub icon_type: IconType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl NewsItem {
    pub fn from_draft(draft: NewsDraft, id: NewsId) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            date: draft.date,
            category: draft.category,
            icon_type: draft.icon_type,
            url: draft.url,
            thumbnail_url: draft.thumbnail_url,
        }
    }
}

/// Caller-supplied part of a news item (everything except the id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub category: NewsCategory,
    pub icon_type: IconType,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl NewsDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
        category: NewsCategory,
        icon_type: IconType,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("News title cannot be empty"));
        }

        Ok(Self {
            title,
            description: description.into(),
            date: date.into(),
            category,
            icon_type,
            url: None,
            thumbnail_url: None,
        })
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    pub fn with_thumbnail(mut self, thumbnail_url: Option<String>) -> Self {
        self.thumbnail_url = thumbnail_url;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsCategory {
    #[serde(rename = "UPCOMING")]
    Upcoming,
    #[serde(rename = "CURRENT EVENT")]
    CurrentEvent,
    #[serde(rename = "EVENT")]
    Event,
    #[serde(rename = "LEAK")]
    Leak,
}

impl NewsCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "UPCOMING",
            Self::CurrentEvent => "CURRENT EVENT",
            Self::Event => "EVENT",
            Self::Leak => "LEAK",
        }
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon shown next to a news item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IconType {
    Trophy,
    Flame,
    Zap,
    Star,
}

impl fmt::Display for IconType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Trophy => "TROPHY",
            Self::Flame => "FLAME",
            Self::Zap => "ZAP",
            Self::Star => "STAR",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_event_keeps_its_space_on_the_wire() {
        let json = serde_json::to_string(&NewsCategory::CurrentEvent).unwrap();
        assert_eq!(json, "\"CURRENT EVENT\"");

        let parsed: NewsCategory = serde_json::from_str("\"CURRENT EVENT\"").unwrap();
        assert_eq!(parsed, NewsCategory::CurrentEvent);
    }

    #[test]
    fn draft_rejects_blank_title() {
        let result = NewsDraft::new(" ", "desc", "Today", NewsCategory::Leak, IconType::Zap);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn from_draft_keeps_every_field() {
        let draft = NewsDraft::new(
            "TOTY Vote",
            "Vote for your Team of the Year",
            "Dec 12",
            NewsCategory::Upcoming,
            IconType::Trophy,
        )
        .unwrap()
        .with_url(Some("https://example.com/toty".to_string()));

        let item = NewsItem::from_draft(draft.clone(), NewsId::new("abc123xyz"));
        assert_eq!(item.id.as_str(), "abc123xyz");
        assert_eq!(item.title, draft.title);
        assert_eq!(item.url, draft.url);
        assert_eq!(item.thumbnail_url, None);
    }

    #[test]
    fn serializes_icon_type_field_in_camel_case() {
        let item = NewsItem::from_draft(
            NewsDraft::new("t", "d", "Today", NewsCategory::Event, IconType::Star).unwrap(),
            NewsId::new("n1"),
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["iconType"], "STAR");
        assert_eq!(json["category"], "EVENT");
        assert!(json.get("thumbnailUrl").is_none());
    }
}
