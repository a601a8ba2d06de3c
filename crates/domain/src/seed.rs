//! Built-in datasets written to an empty store on first access.

use chrono::{DateTime, Utc};

use crate::entities::{CodeStatus, IconType, LootCode, NewsCategory, NewsItem, RewardType};
use crate::ids::{CodeId, NewsId};

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn code(
    id: &str,
    code: &str,
    reward: &str,
    reward_type: RewardType,
    status: CodeStatus,
    created_at: i64,
    expires_at: Option<i64>,
    source: &str,
) -> LootCode {
    LootCode {
        id: CodeId::new(id),
        code: code.to_string(),
        reward: reward.to_string(),
        reward_type,
        expires_at: expires_at.map(at),
        created_at: at(created_at),
        status,
        upvotes: 0,
        downvotes: 0,
        author: "FC LootHub".to_string(),
        source: Some(source.to_string()),
        source_url: None,
        is_system_verified: Some(true),
        last_verified_at: None,
    }
}

/// Default loot codes.
pub fn seed_codes() -> Vec<LootCode> {
    vec![
        code(
            "seed-c1",
            "FCM2025GEMS",
            "250 Gems",
            RewardType::Gems,
            CodeStatus::Active,
            1_735_725_600, // 2025-01-01 10:00 UTC
            Some(1_767_225_599),
            "Twitter",
        ),
        code(
            "seed-c2",
            "KICKOFFPACK",
            "Kick-Off Starter Pack",
            RewardType::Pack,
            CodeStatus::Limited,
            1_736_935_200, // 2025-01-15 10:00 UTC
            None,
            "Discord",
        ),
        code(
            "seed-c3",
            "COINRUSH50K",
            "50,000 Coins",
            RewardType::Coins,
            CodeStatus::Active,
            1_738_404_000, // 2025-02-01 10:00 UTC
            None,
            "Reddit",
        ),
        code(
            "seed-c4",
            "TOTYICON",
            "TOTY Icon Player (88 OVR)",
            RewardType::Player,
            CodeStatus::Expired,
            1_734_516_000, // 2024-12-18 10:00 UTC
            Some(1_735_689_599),
            "Twitter",
        ),
    ]
}

/// Default news items, most recent first.
pub fn seed_news() -> Vec<NewsItem> {
    vec![
        NewsItem {
            id: NewsId::new("seed-n1"),
            title: "Team of the Season Arrives".to_string(),
            description: "Vote for your favourite players before the TOTS squads drop."
                .to_string(),
            date: "Next Week".to_string(),
            category: NewsCategory::Upcoming,
            icon_type: IconType::Trophy,
            url: None,
            thumbnail_url: None,
        },
        NewsItem {
            id: NewsId::new("seed-n2"),
            title: "Champions Path Event".to_string(),
            description: "Complete daily chapters to earn gems and an exclusive player."
                .to_string(),
            date: "Live Now".to_string(),
            category: NewsCategory::CurrentEvent,
            icon_type: IconType::Flame,
            url: None,
            thumbnail_url: None,
        },
        NewsItem {
            id: NewsId::new("seed-n3"),
            title: "Leaked: Heroes Promo Ratings".to_string(),
            description: "Dataminers have spotted new Heroes cards in the latest patch."
                .to_string(),
            date: "Rumoured".to_string(),
            category: NewsCategory::Leak,
            icon_type: IconType::Zap,
            url: None,
            thumbnail_url: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_codes_have_unique_ids_and_upper_case_codes() {
        let codes = seed_codes();
        let ids: HashSet<_> = codes.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids.len(), codes.len());
        assert!(codes.iter().all(|c| c.code == c.code.to_uppercase()));
        assert!(codes.iter().all(|c| c.upvotes == 0 && c.downvotes == 0));
    }

    #[test]
    fn seed_news_have_unique_ids() {
        let news = seed_news();
        let ids: HashSet<_> = news.iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids.len(), news.len());
    }

    #[test]
    fn seed_timestamps_are_not_the_epoch_fallback() {
        assert!(seed_codes()
            .iter()
            .all(|c| c.created_at > DateTime::<Utc>::default()));
    }
}
