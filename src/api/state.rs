use std::sync::Arc;

use crate::data::{Datasets, UserHistory};
use crate::services::{MetadataResolver, RecommendationSource, RuleCoverageIndex};

/// Shared application state
///
/// Everything here is built once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub history: Arc<UserHistory>,
    pub rule_index: Arc<RuleCoverageIndex>,
    pub resolver: MetadataResolver,
    pub source: Arc<dyn RecommendationSource>,
}

impl AppState {
    /// Builds the state from loaded datasets and a recommendation source
    pub fn new(datasets: Datasets, source: Arc<dyn RecommendationSource>) -> Self {
        let rule_index = RuleCoverageIndex::build(&datasets.rules);

        tracing::info!(
            rules = datasets.rules.len(),
            covered_items = rule_index.len(),
            "Rule coverage index built"
        );

        Self {
            history: Arc::new(datasets.history),
            rule_index: Arc::new(rule_index),
            resolver: MetadataResolver::new(datasets.catalog.map(Arc::new)),
            source,
        }
    }
}
