//! API route configuration.

use crate::api::handlers::{generate_handler, hello_handler, redirect_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Short link routes, mounted under `/urlshort`.
///
/// # Endpoints
///
/// - `GET  /hello/{name}`  - Greeting plus storage status
/// - `POST /generate`      - Create a short link
/// - `GET  /s/{shortID}`   - Redirect to the original URL
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hello/{name}", get(hello_handler))
        .route("/generate", post(generate_handler))
        .route("/s/{short_id}", get(redirect_handler))
}
