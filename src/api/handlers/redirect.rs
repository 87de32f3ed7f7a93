//! Handler for short link redirects.

use axum::{
    extract::{Path, State},
    http::HeaderValue,
    response::Redirect,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short ID to its original URL.
///
/// # Endpoint
///
/// `GET /urlshort/s/{shortID}`
///
/// A live mapping ends in `303 See Other`; anything else ends in an error
/// envelope. There is no intermediate state.
///
/// # Errors
///
/// Returns 404 if no live mapping matches, 500 on storage failures or when
/// the stored URL cannot be sent as a `Location` header.
pub async fn redirect_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let original_url = state.link_service.resolve(&short_id).await?;

    // Rows written before control characters were rejected cannot become a header.
    if HeaderValue::from_str(&original_url).is_err() {
        return Err(AppError::persistence(
            "Stored URL is not a valid redirect target",
            json!({ "shortID": short_id }),
        ));
    }

    Ok(Redirect::to(&original_url))
}
