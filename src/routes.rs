//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/urlshort/*` - Short link API (see [`crate::api::routes`])
//! - anything else - JSON 404 envelope
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::error::AppError;
use crate::state::AppState;
use axum::Router;
use axum::http::Uri;
use serde_json::json;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Prefix under which all short link routes are mounted.
pub const CONTEXT_PATH: &str = "/urlshort";

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// Routes and tracing, without path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest(CONTEXT_PATH, api::routes::routes())
        .fallback(fallback_handler)
        .with_state(state)
        .layer(api::middleware::tracing::layer())
}

async fn fallback_handler(uri: Uri) -> AppError {
    AppError::not_found("Route not found", json!({ "path": uri.path() }))
}
