#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

/// What the fake search endpoint answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    Json(Value),
    Status(StatusCode),
    Body(&'static str),
}

struct MockState {
    reply: MockReply,
    requests: Mutex<Vec<HashMap<String, String>>>,
}

/// A search API listening on an ephemeral local port.
pub struct MockApi {
    pub base: String,
    state: Arc<MockState>,
}

impl MockApi {
    pub fn hits(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }

    pub fn last_params(&self) -> HashMap<String, String> {
        self.state
            .requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request reached the mock api")
    }
}

async fn search(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.requests.lock().unwrap().push(params);
    match &state.reply {
        MockReply::Json(value) => Json(value.clone()).into_response(),
        MockReply::Status(status) => (*status, "Arama sırasında hata oluştu").into_response(),
        MockReply::Body(body) => ([(header::CONTENT_TYPE, "application/json")], *body).into_response(),
    }
}

async fn categories() -> Json<Value> {
    Json(json!({
        "categories": [
            "Fitness", "Finance", "Education", "Entertainment",
            "Productivity", "Social", "Games", "Health", "Travel"
        ]
    }))
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "AppSense Search API"}))
}

pub async fn spawn_mock_api(reply: MockReply) -> Result<MockApi> {
    let state = Arc::new(MockState {
        reply,
        requests: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .route("/api/v1/search", get(search))
        .route("/api/v1/categories", get(categories))
        .route("/api/v1/health", get(health))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Ok(MockApi {
        base: format!("http://{addr}"),
        state,
    })
}

/// Base URL of a port nothing listens on.
pub async fn closed_port_base() -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

pub const SCORES: [f64; 5] = [0.912, 0.875, 0.5049, 0.333, 0.05];

pub fn sample_results(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "id": format!("com.example.app{i}"),
                "name": format!("App {i}"),
                "description": format!("Kalori ve adım takibi {i}"),
                "category": "Fitness",
                "rating": 4.5,
                "review_count": 1200 + i,
                "download_count": "1M+",
                "price": "Ücretsiz",
                "developer": "Example Studio",
                "similarity_score": SCORES[i % SCORES.len()],
            })
        })
        .collect()
}

pub fn sample_response(query: &str, count: usize, analysis: Option<&str>) -> Value {
    json!({
        "query": query,
        "results": sample_results(count),
        "total_found": count,
        "processing_time": 0.42,
        "language_detected": "tr",
        "llm_analysis": analysis,
    })
}
