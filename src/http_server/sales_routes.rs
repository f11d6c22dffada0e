//! Sales HTTP Routes
//!
//! Listing endpoint and snapshot reload.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::{get, post},
    Json, Router,
};

use super::config::Environment;
use super::errors::{ApiError, ApiResult};
use crate::executor::{EngineError, QueryResult, SalesQueryEngine};
use crate::planner::{QueryErrorCode, QueryRequest};
use crate::storage::ReloadSummary;

// ==================
// Shared State
// ==================

/// State shared across handlers
pub struct SalesState {
    pub engine: SalesQueryEngine,
    pub environment: Environment,
}

impl SalesState {
    pub fn new(engine: SalesQueryEngine, environment: Environment) -> Self {
        Self {
            engine,
            environment,
        }
    }

    /// Converts an engine error; failures were already logged by the engine
    pub(crate) fn reject(&self, err: EngineError) -> ApiError {
        ApiError::from_engine(err, self.environment.is_development())
    }
}

// ==================
// Routes
// ==================

/// Create sales routes (mounted under /api)
pub fn sales_routes(state: Arc<SalesState>) -> Router {
    Router::new()
        .route("/sales", get(list_sales))
        .route("/sales/reload", post(reload_sales))
        .with_state(state)
}

/// GET /sales
async fn list_sales(
    State(state): State<Arc<SalesState>>,
    params: Result<Query<QueryRequest>, QueryRejection>,
) -> ApiResult<Json<QueryResult>> {
    let Query(request) = params.map_err(|rejection| ApiError::BadRequest {
        code: QueryErrorCode::InvalidParameter.code(),
        message: rejection.body_text(),
    })?;

    state
        .engine
        .query(&request)
        .await
        .map(Json)
        .map_err(|err| state.reject(err))
}

/// POST /sales/reload
async fn reload_sales(State(state): State<Arc<SalesState>>) -> ApiResult<Json<ReloadSummary>> {
    state
        .engine
        .reload()
        .await
        .map(Json)
        .map_err(|err| state.reject(err))
}
