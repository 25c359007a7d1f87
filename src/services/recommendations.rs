use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

use crate::{
    data::UserHistory,
    error::{AppError, AppResult},
    models::{
        normalize_item_id, RecommendationRequest, RecommendationResponse, RecommendationResult,
        SourceSelection, SourceWarning, MAX_TOP_K, MIN_TOP_K,
    },
    services::{
        aggregation::merge_seed_results,
        metadata::MetadataResolver,
        presentation::{render_block, COLLABORATIVE_TITLE, RULE_BASED_TITLE},
        providers::RecommendationSource,
        rule_index::RuleCoverageIndex,
    },
};

/// Validates a request against the loaded datasets and builds the selection
///
/// Seeds must come from the user's rule-eligible items; they keep the order
/// given, with repeats dropped. A user without any rule-eligible item may ask
/// with no seeds, and then only the collaborative block can have results.
pub fn select_sources(
    history: &UserHistory,
    index: &RuleCoverageIndex,
    request: RecommendationRequest,
) -> AppResult<SourceSelection> {
    if !(MIN_TOP_K..=MAX_TOP_K).contains(&request.top_k) {
        return Err(AppError::InvalidInput(format!(
            "top_k must be between {} and {}",
            MIN_TOP_K, MAX_TOP_K
        )));
    }

    let user_items = history
        .items_for(&request.user_id)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", request.user_id)))?;

    let eligible: HashSet<String> = index
        .eligible_items(user_items)
        .iter()
        .map(|item| normalize_item_id(item))
        .collect();

    if request.items.is_empty() && !eligible.is_empty() {
        return Err(AppError::InvalidInput(
            "Select at least one product covered by the association rules".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    let mut seeds = Vec::with_capacity(request.items.len());
    for item in request.items {
        let key = normalize_item_id(&item);
        if !eligible.contains(&key) {
            return Err(AppError::InvalidInput(format!(
                "Item '{}' is not a rule-covered item of user {}",
                item, request.user_id
            )));
        }
        if seen.insert(key) {
            seeds.push(item);
        }
    }

    Ok(SourceSelection {
        user_id: request.user_id,
        seeds,
        top_k: request.top_k,
    })
}

/// Runs one generate round: fetch, merge, render.
///
/// Calls run one after another: the user-based query first, then one
/// item-based query per seed in seed order. A failed call contributes an empty
/// list and a warning; it never aborts the round.
pub async fn generate(
    source: &dyn RecommendationSource,
    resolver: &MetadataResolver,
    selection: &SourceSelection,
) -> RecommendationResponse {
    let request_id = Uuid::new_v4();
    let mut warnings = Vec::new();

    tracing::info!(
        request_id = %request_id,
        user_id = %selection.user_id,
        seeds = selection.seeds.len(),
        top_k = selection.top_k,
        source = source.name(),
        "Generating recommendations"
    );

    let collaborative = match source
        .recommend_by_user(&selection.user_id, selection.top_k)
        .await
    {
        Ok(results) => results,
        Err(e) => {
            tracing::warn!(
                request_id = %request_id,
                user_id = %selection.user_id,
                error = %e,
                "User-based recommendation failed"
            );
            warnings.push(SourceWarning::collaborative(&e));
            Vec::new()
        }
    };

    let mut per_seed: Vec<RecommendationResult> = Vec::with_capacity(selection.seeds.len());
    for seed in &selection.seeds {
        match source.recommend_by_item(seed, selection.top_k).await {
            Ok(results) => per_seed.push(results),
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    seed = %seed,
                    error = %e,
                    "Item-based recommendation failed"
                );
                warnings.push(SourceWarning::rule_based(seed, &e));
                per_seed.push(Vec::new());
            }
        }
    }

    let rule_based = merge_seed_results(&per_seed, &selection.seeds, selection.top_k);

    if !warnings.is_empty() {
        tracing::warn!(
            request_id = %request_id,
            failed_calls = warnings.len(),
            total_calls = selection.seeds.len() + 1,
            "Partial recommendation failure"
        );
    }

    tracing::info!(
        request_id = %request_id,
        collaborative = collaborative.len(),
        rule_based = rule_based.len(),
        "Recommendations generated"
    );

    RecommendationResponse {
        request_id,
        user_id: selection.user_id.clone(),
        top_k: selection.top_k,
        generated_at: Utc::now(),
        collaborative: render_block(COLLABORATIVE_TITLE, &collaborative, resolver),
        rule_based: render_block(RULE_BASED_TITLE, &rule_based, resolver),
        warnings,
    }
}
