//! # HTTP Server Module
//!
//! Axum server for the sales dashboard API.
//!
//! # Endpoints
//!
//! - `GET /` - Banner
//! - `GET /api/health` - Health check
//! - `GET /api/sales` - Filtered, sorted, paginated listing
//! - `POST /api/sales/reload` - Replace the in-memory snapshot (CSV mode)

pub mod config;
pub mod errors;
pub mod health_routes;
pub mod sales_routes;
pub mod server;

pub use config::{Environment, HttpServerConfig};
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use sales_routes::SalesState;
pub use server::HttpServer;
