//! HTTP routes
//!
//! The query endpoint guarantees HTTP 200 with a well-formed body for every
//! business-logic outcome; only request validation (missing query parameter)
//! produces a non-200 status.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::AppState;

/// Build all routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/query", get(query))
}

/// GET / - liveness message
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "API is running" }))
}

/// GET /health - health check
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Query string parameters for GET /query
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    /// The natural-language question; required
    pub query: Option<String>,
}

/// GET /query?query=... - answer a question with citations
async fn query(State(state): State<AppState>, Query(params): Query<QueryParams>) -> Response {
    let Some(question) = params.query else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({
                "detail": "Missing required query parameter: query"
            })),
        )
            .into_response();
    };

    tracing::info!(query = %question, "handling query");
    let result = state.pipeline.execute(&question).await;
    Json(result).into_response()
}
