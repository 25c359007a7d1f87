/// HTTP client for the recommendation-serving API
///
/// Endpoints:
/// 1. `GET /recommend/by-user?user_id=&top_k=`
/// 2. `GET /recommend/by-item?item=&top_k=`
///
/// Both answer `{"results": [...]}` where each element is either an object with
/// an `item` and an optional `score`, or a bare item identifier.
use crate::{
    error::{AppError, AppResult},
    models::{RecommendationResult, RecommendedItem},
    services::providers::RecommendationSource,
};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ResultsEnvelope {
    #[serde(default)]
    results: Vec<WireRecommendation>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireRecommendation {
    Scored {
        #[serde(default)]
        item: String,
        #[serde(default)]
        score: Option<f64>,
    },
    Bare(String),
}

impl From<WireRecommendation> for RecommendedItem {
    fn from(wire: WireRecommendation) -> Self {
        match wire {
            WireRecommendation::Scored { item, score } => RecommendedItem { item, score },
            WireRecommendation::Bare(item) => RecommendedItem::bare(item),
        }
    }
}

#[derive(Clone)]
pub struct HttpRecommendationClient {
    http_client: HttpClient,
    api_url: String,
}

impl HttpRecommendationClient {
    /// Creates a client whose every request is bounded by `timeout`
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        let api_url = api_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http_client,
            api_url,
        })
    }

    async fn fetch(&self, path: &str, query: &[(&str, &str)]) -> AppResult<RecommendationResult> {
        let url = format!("{}{}", self.api_url, path);

        let response = self.http_client.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Recommendation API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(path = %path, response = %response_text, "Raw recommendation response");

        parse_results(&response_text)
    }
}

fn parse_results(body: &str) -> AppResult<RecommendationResult> {
    let malformed =
        |e: String| AppError::ExternalApi(format!("Failed to parse recommendation response: {}", e));

    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(malformed("expected a JSON object".to_string()));
    }

    let envelope: ResultsEnvelope =
        serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;

    Ok(envelope.results.into_iter().map(RecommendedItem::from).collect())
}

#[async_trait::async_trait]
impl RecommendationSource for HttpRecommendationClient {
    async fn recommend_by_user(&self, user_id: &str, top_k: usize) -> AppResult<RecommendationResult> {
        let top_k = top_k.to_string();
        let results = self
            .fetch("/recommend/by-user", &[("user_id", user_id), ("top_k", top_k.as_str())])
            .await?;

        tracing::info!(
            user_id = %user_id,
            results = results.len(),
            source = self.name(),
            "User-based recommendations fetched"
        );

        Ok(results)
    }

    async fn recommend_by_item(&self, item: &str, top_k: usize) -> AppResult<RecommendationResult> {
        let top_k = top_k.to_string();
        let results = self
            .fetch("/recommend/by-item", &[("item", item), ("top_k", top_k.as_str())])
            .await?;

        tracing::info!(
            item = %item,
            results = results.len(),
            source = self.name(),
            "Item-based recommendations fetched"
        );

        Ok(results)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
