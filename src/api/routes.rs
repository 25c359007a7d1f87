use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Users
        .route("/users", get(handlers::list_users))
        .route("/users/:user_id/items", get(handlers::get_user_items))
        // Recommendations
        .route("/recommendations", post(handlers::recommend))
        .route("/recommendations/html", post(handlers::recommend_html))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
