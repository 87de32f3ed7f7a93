//! Handler for the short link generation endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::envelope::Envelope;
use crate::api::dto::generate::{GenerateRequest, GenerateResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for one URL.
///
/// # Endpoint
///
/// `POST /urlshort/generate`
///
/// # Request Body
///
/// ```json
/// { "url": "https://www.google.com" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": { "isSuccess": true, "message": "Short URL generated successfully." },
///   "data": {
///     "originalURL": "https://www.google.com",
///     "shortURL": "http://localhost:3000/urlshort/s/aB3dE9z",
///     "shortID": "aB3dE9z"
///   }
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if the body is malformed or the URL is empty/unparseable,
/// 500 if the mapping cannot be persisted.
pub async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<Envelope<GenerateResponse>>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let mapping = state.link_service.create_short_link(&payload.url).await?;
    let short_url = state.link_service.short_url(&mapping.short_id);

    Ok(Json(Envelope::success(
        "Short URL generated successfully.",
        GenerateResponse::new(mapping, short_url),
    )))
}
