//! Health HTTP Routes
//!
//! Banner at `/` and a health check that touches the record source.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use super::sales_routes::SalesState;
use crate::storage::SourceKind;

/// Banner response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerResponse {
    pub message: String,
    pub data_source: SourceKind,
    pub timestamp: String,
}

/// Health check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub data_source: SourceKind,
    pub record_count: u64,
    pub timestamp: String,
}

/// Health check failure response
#[derive(Debug, Serialize)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Create health routes (mounted at the root)
pub fn health_routes(state: Arc<SalesState>) -> Router {
    Router::new()
        .route("/", get(banner_handler))
        .route("/api/health", get(health_handler))
        .with_state(state)
}

/// Banner handler
async fn banner_handler(State(state): State<Arc<SalesState>>) -> impl IntoResponse {
    Json(BannerResponse {
        message: "API is running...".to_string(),
        data_source: state.engine.source().kind(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Health check handler
async fn health_handler(State(state): State<Arc<SalesState>>) -> impl IntoResponse {
    let source = state.engine.source();
    match source.record_count().await {
        Ok(record_count) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                data_source: source.kind(),
                record_count,
                timestamp: Utc::now().to_rfc3339(),
            }),
        )
            .into_response(),
        Err(err) => {
            warn!(code = err.code(), error = %err, "health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(UnhealthyResponse {
                    status: "unhealthy".to_string(),
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}
