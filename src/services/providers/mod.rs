//! Recommendation source abstraction
//!
//! The recommendation-serving API answers two kinds of queries: one driven by a
//! user's whole interaction history (collaborative filtering) and one driven by a
//! single seed item (association rules). Each query is an independent call that
//! either yields a ranked list or fails on its own.
use crate::{error::AppResult, models::RecommendationResult};

pub mod http;

pub use http::HttpRecommendationClient;

/// Trait for recommendation sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Up to `top_k` recommendations derived from the user's interaction history
    async fn recommend_by_user(&self, user_id: &str, top_k: usize) -> AppResult<RecommendationResult>;

    /// Up to `top_k` recommendations derived from a single seed item
    async fn recommend_by_item(&self, item: &str, top_k: usize) -> AppResult<RecommendationResult>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}
