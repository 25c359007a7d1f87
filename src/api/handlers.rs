use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{RecommendationRequest, RecommendationResponse, UserItems, UserRank},
    services::{presentation, recommendations},
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Users ranked by interaction count
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<UserRank>> {
    Json(state.history.ranked_users())
}

/// A user's items and the subset covered by association rules
pub async fn get_user_items(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<UserItems>> {
    let items = state
        .history
        .items_for(&user_id)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    let eligible_items = state.rule_index.eligible_items(items);
    let count = state.history.interaction_count(&user_id).unwrap_or(0);

    Ok(Json(UserItems {
        items: items.to_vec(),
        eligible_items,
        count,
        user_id,
    }))
}

async fn run(state: &AppState, request: RecommendationRequest) -> AppResult<RecommendationResponse> {
    let selection = recommendations::select_sources(&state.history, &state.rule_index, request)?;
    Ok(recommendations::generate(state.source.as_ref(), &state.resolver, &selection).await)
}

/// Generate both recommendation blocks as JSON
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    Ok(Json(run(&state, request).await?))
}

/// Generate both recommendation blocks as an HTML page
pub async fn recommend_html(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Html<String>> {
    let response = run(&state, request).await?;
    Ok(Html(presentation::page_html(&response)))
}
