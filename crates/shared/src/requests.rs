//! Request bodies and query strings accepted by the API.

use loothub_domain::{CodeStatus, IconType, NewsCategory, RewardType};
use serde::{Deserialize, Serialize};

/// Operator form for a new loot code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCodeRequest {
    pub code: String,
    pub reward: String,
    pub reward_type: RewardType,
    /// Days from now until the code expires; absent means no expiry
    #[serde(default)]
    pub expires_in_days: Option<u32>,
    /// Defaults to ACTIVE
    #[serde(default)]
    pub status: Option<CodeStatus>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Operator form for a new news item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    pub category: NewsCategory,
    pub icon_type: IconType,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPinRequest {
    pub pin: String,
}

/// Which codes the listing returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeFilter {
    /// Everything except expired codes
    #[default]
    Active,
    All,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodesQuery {
    #[serde(default)]
    pub filter: CodeFilter,
}
