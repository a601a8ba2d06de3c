//! Keyword classifier for feed video titles.
//!
//! Rules are evaluated top to bottom against the lower-cased title; the first
//! rule with any matching keyword decides the category.

use loothub_domain::NewsCategory;

/// Ordered `(keywords, category)` rules.
pub const TITLE_RULES: &[(&[&str], NewsCategory)] = &[
    (&["trailer", "teaser", "coming soon"], NewsCategory::Upcoming),
    (&["leak"], NewsCategory::Leak),
    (&["live"], NewsCategory::Event),
];

/// Category used when no rule matches.
pub const FALLBACK_CATEGORY: NewsCategory = NewsCategory::CurrentEvent;

pub fn classify_title(title: &str) -> NewsCategory {
    let title = title.to_lowercase();
    TITLE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| title.contains(keyword)))
        .map(|(_, category)| *category)
        .unwrap_or(FALLBACK_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailer_teaser_and_coming_soon_are_upcoming() {
        assert_eq!(classify_title("Official TOTS Trailer"), NewsCategory::Upcoming);
        assert_eq!(classify_title("Season 3 TEASER"), NewsCategory::Upcoming);
        assert_eq!(classify_title("Icons: Coming Soon"), NewsCategory::Upcoming);
    }

    #[test]
    fn leak_and_live_map_to_their_categories() {
        assert_eq!(classify_title("Leaked ratings?"), NewsCategory::Leak);
        assert_eq!(classify_title("Watch LIVE: UCL Final"), NewsCategory::Event);
    }

    #[test]
    fn first_matching_rule_wins() {
        // "teaser" outranks "live", "leak" outranks "live"
        assert_eq!(classify_title("Live teaser stream"), NewsCategory::Upcoming);
        assert_eq!(classify_title("Live leak reaction"), NewsCategory::Leak);
    }

    #[test]
    fn unmatched_titles_are_current_events() {
        assert_eq!(classify_title("Weekly Recap"), NewsCategory::CurrentEvent);
        assert_eq!(classify_title(""), NewsCategory::CurrentEvent);
    }
}
