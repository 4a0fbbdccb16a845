use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use bardo::{
    server::{self, AppState},
    youtube::{CatalogClient, StreamResolver, YoutubeError},
};
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tower::ServiceExt;

// Catalog returning a fixed structure, or failing when `result` is None
struct MockCatalog {
    result: Option<Value>,
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl CatalogClient for MockCatalog {
    async fn get_playlist(&self, playlist_id: &str) -> Result<Value, YoutubeError> {
        self.calls.lock().await.push(playlist_id.to_string());
        self.result
            .clone()
            .ok_or_else(|| YoutubeError::UnexpectedResponse {
                reason: "catalog unavailable".to_string(),
            })
    }
}

// Resolver recording every URL it is asked for
struct MockResolver {
    result: Value,
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl StreamResolver for MockResolver {
    async fn resolve(&self, url: &str) -> Result<Value, YoutubeError> {
        self.calls.lock().await.push(url.to_string());
        Ok(self.result.clone())
    }
}

struct Harness {
    app: Router,
    catalog: Arc<MockCatalog>,
    resolver: Arc<MockResolver>,
    _static_dir: tempfile::TempDir,
}

fn harness(catalog_result: Option<Value>) -> Harness {
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("index.html"), "<h1>bardo</h1>").unwrap();
    std::fs::create_dir(static_dir.path().join("assets")).unwrap();
    std::fs::write(static_dir.path().join("assets/app.js"), "console.log(1);").unwrap();

    let catalog = Arc::new(MockCatalog {
        result: catalog_result,
        calls: Mutex::new(Vec::new()),
    });
    let resolver = Arc::new(MockResolver {
        result: json!({ "url": "http://example/stream", "format": "mp4" }),
        calls: Mutex::new(Vec::new()),
    });

    let state = AppState::new(catalog.clone(), resolver.clone());
    let app = server::router(state, static_dir.path());

    Harness {
        app,
        catalog,
        resolver,
        _static_dir: static_dir,
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_from(uri: &str, origin: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::ORIGIN, origin)
        .body(Body::empty())
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn test_get_returns_catalog_result_unchanged() {
    let playlist = json!({ "title": "X", "tracks": [] });
    let h = harness(Some(playlist.clone()));

    let response = h.app.oneshot(get("/get")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body, playlist);
    assert_eq!(
        *h.catalog.calls.lock().await,
        vec!["PLK0Q01rDLbZECDAMwGQ5MZmSQDJeUWhWh".to_string()]
    );
}

#[tokio::test]
async fn test_play_forwards_watch_url() {
    let h = harness(None);

    let response = h.app.oneshot(get("/play/abc123")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(
        body,
        json!({ "url": "http://example/stream", "format": "mp4" })
    );
    assert_eq!(
        *h.resolver.calls.lock().await,
        vec!["https://www.youtube.com/watch?v=abc123".to_string()]
    );
}

#[tokio::test]
async fn test_play_with_empty_id_still_reaches_resolver() {
    let h = harness(None);

    let response = h.app.oneshot(get("/play/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        *h.resolver.calls.lock().await,
        vec!["https://www.youtube.com/watch?v=".to_string()]
    );
}

#[tokio::test]
async fn test_play_with_undecodable_id_still_reaches_resolver() {
    let h = harness(None);

    let response = h.app.clone().oneshot(get("/play/%FF")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = h.app.oneshot(get("/play/a%20b")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        *h.resolver.calls.lock().await,
        vec![
            "https://www.youtube.com/watch?v=\u{FFFD}".to_string(),
            "https://www.youtube.com/watch?v=a b".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_catalog_failure_is_bare_500() {
    let h = harness(None);

    let response = h.app.oneshot(get("/get")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_disallowed_origin_gets_no_cors_headers() {
    let h = harness(Some(json!({ "title": "X", "tracks": [] })));

    let response = h
        .app
        .oneshot(get_from("/get", "http://evil.example"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[tokio::test]
async fn test_allowed_origins_are_echoed_with_credentials() {
    for origin in server::ALLOWED_ORIGINS {
        let h = harness(None);

        let response = h.app.oneshot(get_from("/play/abc123", origin)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            origin
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
            "true"
        );
    }
}

#[tokio::test]
async fn test_preflight_mirrors_method_and_headers() {
    let h = harness(None);

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/get")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-custom")
        .body(Body::empty())
        .unwrap();

    let response = h.app.oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
        "DELETE"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "x-custom"
    );
}

#[tokio::test]
async fn test_static_file_is_served() {
    let h = harness(None);

    let response = h
        .app
        .clone()
        .oneshot(get("/static/assets/app.js"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"console.log(1);");

    let index = h.app.oneshot(get("/static/")).await.unwrap();
    assert_eq!(index.status(), StatusCode::OK);
    assert_eq!(body_bytes(index).await, b"<h1>bardo</h1>");
}

#[tokio::test]
async fn test_missing_static_file_is_404() {
    let h = harness(None);

    let response = h.app.oneshot(get("/static/nope.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
