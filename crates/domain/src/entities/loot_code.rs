//! Loot code entity - A redeemable string granting an in-game reward
//!
//! Codes are created once by the code repository and never edited afterwards.
//! The vote counters are carried in the stored shape but no operation touches
//! them yet.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::CodeId;

/// A redeemable promotional code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LootCode {
    pub id: CodeId,
    /// Redemption string, always upper-case
    pub code: String,
    /// Free-text reward description (e.g. "500 Gems")
    pub reward: String,
    pub reward_type: RewardType,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub status: CodeStatus,
    pub upvotes: u32,
    pub downvotes: u32,
    pub author: String,
    /// Where the code was spotted (e.g. "Twitter", "Manual Entry")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_system_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_verified_at: Option<DateTime<Utc>>,
}

impl LootCode {
    /// Materialize a draft into a stored record.
    ///
    /// Identity, creation time and zeroed vote counters are the only things the
    /// repository adds on top of what the caller supplied.
    pub fn from_draft(draft: CodeDraft, id: CodeId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code: draft.code,
            reward: draft.reward,
            reward_type: draft.reward_type,
            expires_at: draft.expires_at,
            created_at,
            status: draft.status,
            upvotes: 0,
            downvotes: 0,
            author: draft.author,
            source: draft.source,
            source_url: draft.source_url,
            is_system_verified: draft.is_system_verified,
            last_verified_at: draft.last_verified_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == CodeStatus::Active
    }

    /// Whether the code belongs in the default (non-expired) listing.
    pub fn is_visible(&self) -> bool {
        self.status != CodeStatus::Expired
    }
}

/// Active-first ordering.
///
/// ACTIVE codes come before every other status regardless of age; within the
/// same partition newer `created_at` comes first.
pub fn active_first(a: &LootCode, b: &LootCode) -> Ordering {
    b.is_active()
        .cmp(&a.is_active())
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Caller-supplied part of a loot code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeDraft {
    pub code: String,
    pub reward: String,
    pub reward_type: RewardType,
    pub expires_at: Option<DateTime<Utc>>,
    pub status: CodeStatus,
    pub author: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub is_system_verified: Option<bool>,
    #[serde(default)]
    pub last_verified_at: Option<DateTime<Utc>>,
}

impl CodeDraft {
    /// Create a draft with the code normalized to upper-case.
    ///
    /// Defaults to an ACTIVE, non-expiring code. Blank code or reward text is rejected.
    pub fn new(
        code: impl AsRef<str>,
        reward: impl Into<String>,
        reward_type: RewardType,
        author: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let code = code.as_ref().trim().to_uppercase();
        if code.is_empty() {
            return Err(DomainError::validation("Code cannot be empty"));
        }
        let reward = reward.into();
        if reward.trim().is_empty() {
            return Err(DomainError::validation("Reward cannot be empty"));
        }

        Ok(Self {
            code,
            reward,
            reward_type,
            expires_at: None,
            status: CodeStatus::Active,
            author: author.into(),
            source: None,
            source_url: None,
            is_system_verified: None,
            last_verified_at: None,
        })
    }

    pub fn with_status(mut self, status: CodeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_expiry(mut self, expires_at: Option<DateTime<Utc>>) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>, source_url: Option<String>) -> Self {
        self.source = Some(source.into());
        self.source_url = source_url;
        self
    }

    pub fn verified(mut self) -> Self {
        self.is_system_verified = Some(true);
        self
    }
}

/// Lifecycle status of a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CodeStatus {
    Active,
    /// Still redeemable but with a capped number of uses
    Limited,
    Expired,
}

impl CodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Limited => "LIMITED",
            Self::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for CodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of reward a code grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewardType {
    Gems,
    Coins,
    Pack,
    Player,
}

impl RewardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gems => "GEMS",
            Self::Coins => "COINS",
            Self::Pack => "PACK",
            Self::Player => "PLAYER",
        }
    }
}

impl fmt::Display for RewardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
