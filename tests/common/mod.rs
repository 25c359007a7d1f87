#![allow(dead_code)]

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;

use hybrid_recommender::data::{rules, Catalog, Datasets, UserHistory};

pub const SLOW_RESPONSE: Duration = Duration::from_secs(2);

async fn by_user(Query(params): Query<HashMap<String, String>>) -> Response {
    let user_id = params.get("user_id").cloned().unwrap_or_default();
    let top_k = params.get("top_k").cloned().unwrap_or_default();

    match user_id.as_str() {
        "7" => Json(json!({
            "results": [
                {"item": "soda", "score": 0.7},
                "rolls/buns"
            ]
        }))
        .into_response(),
        "echo" => Json(json!({ "results": [{"item": format!("top_k={}", top_k)}] })).into_response(),
        "slow" => {
            tokio::time::sleep(SLOW_RESPONSE).await;
            Json(json!({ "results": [] })).into_response()
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "model not loaded").into_response(),
    }
}

async fn by_item(Query(params): Query<HashMap<String, String>>) -> Response {
    let item = params.get("item").cloned().unwrap_or_default();

    match item.as_str() {
        "whole milk" => Json(json!({
            "results": [
                {"item": "butter", "score": 0.9},
                {"item": "yogurt", "score": 0.5}
            ]
        }))
        .into_response(),
        "butter" => Json(json!({
            "results": [
                {"item": "yogurt", "score": 0.8},
                {"item": "Whole Milk", "score": 0.7},
                {"item": "soda", "score": 0.4}
            ]
        }))
        .into_response(),
        "garbage" => "definitely not json".into_response(),
        "slow" => {
            tokio::time::sleep(SLOW_RESPONSE).await;
            Json(json!({ "results": [] })).into_response()
        }
        _ => (StatusCode::BAD_GATEWAY, "rule lookup failed").into_response(),
    }
}

/// Starts a stand-in recommendation API on an ephemeral port and returns its base URL
pub async fn spawn_upstream() -> String {
    let app = Router::new()
        .route("/recommend/by-user", get(by_user))
        .route("/recommend/by-item", get(by_item));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", address)
}

pub fn datasets() -> Datasets {
    let history = UserHistory::from_reader(
        "\
user_id,item_id
7,whole milk
7,butter
7,soda
7,whole milk
7,broken
8,caviar
9,tofu
"
        .as_bytes(),
    )
    .unwrap();

    let rules = rules::rules_from_reader(
        "\
antecedent,consequent,support,confidence
\"['Whole Milk', 'butter']\",['yogurt'],0.02,0.4
tofu,['soy sauce'],0.01,0.3
broken,['anything'],0.01,0.1
"
        .as_bytes(),
    )
    .unwrap();

    let catalog = Catalog::from_reader(
        "\
item_id,price,category
butter,1.99,dairy
yogurt,0.89,dairy
soda,,beverages
"
        .as_bytes(),
    )
    .unwrap();

    Datasets {
        catalog: Some(catalog),
        history,
        rules,
    }
}
