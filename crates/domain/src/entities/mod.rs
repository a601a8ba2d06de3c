//! Domain entities - Core business objects with identity

mod loot_code;
mod news_item;

pub use loot_code::{active_first, CodeDraft, CodeStatus, LootCode, RewardType};
pub use news_item::{IconType, NewsCategory, NewsDraft, NewsItem};
