use std::sync::Arc;

use hybrid_recommender::{
    api::{create_router, AppState},
    config::Config,
    data::load_datasets,
    services::HttpRecommendationClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Interactions and rules are required; stop before serving anything without them
    let datasets = load_datasets(&config).map_err(|e| {
        tracing::error!(error = %e, "Failed to load datasets");
        e
    })?;

    let client = HttpRecommendationClient::new(config.api_url.clone(), config.request_timeout())?;
    tracing::info!(
        api_url = %config.api_url,
        timeout_secs = config.request_timeout_secs,
        "Recommendation client configured"
    );

    let state = AppState::new(datasets, Arc::new(client));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
