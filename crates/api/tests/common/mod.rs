use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use folio_api::config::ServerConfig;
use folio_api::router::build_app_router;
use folio_api::services::projects::ProjectService;
use folio_api::state::AppState;
use folio_db::store::PgProjectStore;
use folio_media::{CloudinaryConfig, CloudinaryStore};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        media_folder: "portfolio-test".to_string(),
    }
}

/// Build the full application router against the given database pool.
///
/// Uses [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses. The media store points at an unroutable endpoint:
/// asset cleanup is best-effort by design, so record mutations still
/// succeed, and tests never talk to a real CDN.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let assets = Arc::new(CloudinaryStore::new(CloudinaryConfig {
        cloud_name: "test-cloud".to_string(),
        api_key: "test-key".to_string(),
        api_secret: "test-secret".to_string(),
        base_url: "http://127.0.0.1:9".to_string(),
    }));

    let store = Arc::new(PgProjectStore::new(pool.clone()));
    let projects = ProjectService::new(store, assets.clone());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        assets,
        projects,
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a project via the API and return its id.
///
/// The payload is a fully valid draft with a before image, an after image,
/// and a two-entry gallery.
pub async fn create_project(pool: PgPool, title: &str) -> i64 {
    let app = build_test_app(pool);
    let response = post_json(app, "/api/v1/projects", project_payload(title)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["id"].as_i64().unwrap()
}

/// A valid create payload for a draft project.
pub fn project_payload(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "category": "residential",
        "location": "Rotterdam",
        "year": "2024",
        "area": "85 m2",
        "description": "Full interior renovation.",
        "tags": ["interior", "renovation"],
        "before_image": {
            "url": format!("https://cdn.example/{title}-before.jpg"),
            "asset_id": format!("{title}-before"),
        },
        "after_image": {
            "url": format!("https://cdn.example/{title}-after.jpg"),
            "asset_id": format!("{title}-after"),
        },
        "gallery": [
            {
                "url": format!("https://cdn.example/{title}-g1.jpg"),
                "asset_id": format!("{title}-g1"),
            },
            {
                "url": format!("https://cdn.example/{title}-g2.jpg"),
                "asset_id": format!("{title}-g2"),
            },
        ],
    })
}
