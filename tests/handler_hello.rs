mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;
use url_shortener::api::handlers::hello_handler;

fn server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool, false);
    let app = Router::new()
        .route("/urlshort/hello/{name}", get(hello_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_hello_in_malay(pool: PgPool) {
    let server = server(pool);

    let response = server
        .get("/urlshort/hello/anas")
        .add_query_param("lang", "bm")
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "status": {
            "isSuccess": true,
            "message": "Response returned successfully."
        },
        "data": {
            "value": "Selamat sejahtera, anas",
            "database": "Online"
        }
    }));
}

#[sqlx::test]
async fn test_hello_defaults_to_english(pool: PgPool) {
    let server = server(pool);

    let response = server.get("/urlshort/hello/world").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["data"]["value"], "Hello, world");
    assert_eq!(json["data"]["database"], "Online");
}
