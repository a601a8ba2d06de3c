//! LootHub domain types.
//!
//! Pure data and invariants for the loot-code catalog: no I/O lives here.

extern crate self as loothub_domain;

pub mod entities;
pub mod error;
pub mod ids;
pub mod seed;

pub use entities::{
    active_first, CodeDraft, CodeStatus, IconType, LootCode, NewsCategory, NewsDraft, NewsItem,
    RewardType,
};
pub use error::DomainError;
pub use ids::{CodeId, NewsId};
