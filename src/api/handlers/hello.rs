//! Handler for the greeting endpoint.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::envelope::Envelope;
use crate::api::dto::hello::{HelloQuery, HelloResponse};
use crate::state::AppState;

/// Greets `name` in the requested language and reports storage status.
///
/// # Endpoint
///
/// `GET /urlshort/hello/{name}?lang=bm`
///
/// Always succeeds: an unreachable store is reported as `"Offline"`.
pub async fn hello_handler(
    Path(name): Path<String>,
    Query(query): Query<HelloQuery>,
    State(state): State<AppState>,
) -> Json<Envelope<HelloResponse>> {
    let greeting = greeting_for(query.lang.as_deref().unwrap_or("en"));

    let database = if state.link_service.is_store_online().await {
        "Online"
    } else {
        "Offline"
    };

    Json(Envelope::success(
        "Response returned successfully.",
        HelloResponse {
            value: format!("{greeting}{name}"),
            database,
        },
    ))
}

fn greeting_for(lang: &str) -> &'static str {
    match lang {
        "bm" => "Selamat sejahtera, ",
        _ => "Hello, ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_for() {
        assert_eq!(greeting_for("bm"), "Selamat sejahtera, ");
        assert_eq!(greeting_for("en"), "Hello, ");
        assert_eq!(greeting_for(""), "Hello, ");
        assert_eq!(greeting_for("fr"), "Hello, ");
    }
}
