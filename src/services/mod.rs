pub mod aggregation;
pub mod metadata;
pub mod presentation;
pub mod providers;
pub mod recommendations;
pub mod rule_index;

pub use metadata::MetadataResolver;
pub use providers::{HttpRecommendationClient, RecommendationSource};
pub use rule_index::RuleCoverageIndex;
