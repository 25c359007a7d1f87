use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Lowest and highest accepted `top_k`
pub const MIN_TOP_K: usize = 1;
pub const MAX_TOP_K: usize = 10;
pub const DEFAULT_TOP_K: usize = 3;

/// Canonical matching key for an item identifier: trimmed and lowercased.
pub fn normalize_item_id(item: &str) -> String {
    item.trim().to_lowercase()
}

/// One entry of a recommendation list, in the order the source ranked it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedItem {
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl RecommendedItem {
    pub fn scored(item: impl Into<String>, score: f64) -> Self {
        Self {
            item: item.into(),
            score: Some(score),
        }
    }

    pub fn bare(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            score: None,
        }
    }
}

/// Ordered result list returned by a recommendation source
pub type RecommendationResult = Vec<RecommendedItem>;

/// Descriptive attributes of an item, as resolved from the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemMeta {
    pub name: String,
    pub price: Option<f64>,
    pub category: Option<String>,
}

/// The user's current choice of seeds and result size for one generate round
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSelection {
    pub user_id: String,
    pub seeds: Vec<String>,
    pub top_k: usize,
}

// ============================================================================
// Presentation boundary types
// ============================================================================

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

/// Request for one round of recommendations
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

/// Which recommendation source a warning belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    CollaborativeFiltering,
    RuleBased,
}

/// Non-fatal failure of a single recommendation call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceWarning {
    pub source: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    pub message: String,
}

impl SourceWarning {
    pub fn collaborative(error: impl Display) -> Self {
        Self {
            source: SourceKind::CollaborativeFiltering,
            seed: None,
            message: format!("NCF Recommendation Error: {}", error),
        }
    }

    pub fn rule_based(seed: &str, error: impl Display) -> Self {
        Self {
            source: SourceKind::RuleBased,
            seed: Some(seed.to_string()),
            message: format!("FP-Growth Recommendation Error for '{}': {}", seed, error),
        }
    }
}

/// Display card for one recommended item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemCard {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Either the cards of a block or the explicit empty-state indicator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockBody {
    Items { cards: Vec<ItemCard> },
    NoRecommendations { message: String },
}

/// A titled, display-ready recommendation block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationBlock {
    pub title: String,
    #[serde(flatten)]
    pub body: BlockBody,
}

impl RecommendationBlock {
    pub fn cards(&self) -> &[ItemCard] {
        match &self.body {
            BlockBody::Items { cards } => cards,
            BlockBody::NoRecommendations { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.body, BlockBody::NoRecommendations { .. })
    }
}

/// Both rendered blocks of a generate round plus any source warnings
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub request_id: Uuid,
    pub user_id: String,
    pub top_k: usize,
    pub generated_at: DateTime<Utc>,
    pub collaborative: RecommendationBlock,
    pub rule_based: RecommendationBlock,
    pub warnings: Vec<SourceWarning>,
}

/// A user and their number of recorded interactions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRank {
    pub user_id: String,
    pub count: usize,
}

/// A user's items, and the subset usable as rule-based seeds
#[derive(Debug, Clone, Serialize)]
pub struct UserItems {
    pub user_id: String,
    pub count: usize,
    pub items: Vec<String>,
    pub eligible_items: Vec<String>,
}
