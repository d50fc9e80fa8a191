use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use tower::ServiceExt;

use super::*;

fn demo_config() -> ServerConfig {
    ServerConfig { port: 0, upstream: None, proxy_timeout: Duration::from_secs(1) }
}

#[tokio::test]
async fn healthz_is_ok_in_demo_mode() {
    let app = api_routes(&demo_config()).unwrap();
    let response = app.oneshot(Request::get("/healthz").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn demo_mode_mounts_fixture_api() {
    let app = api_routes(&demo_config()).unwrap();
    let request = Request::get("/api/roles")
        .header("authorization", format!("Bearer {}", demo::DEMO_TOKEN))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn proxy_mode_answers_502_when_backend_is_down() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ServerConfig { upstream: Some(format!("http://{addr}")), ..demo_config() };
    let app = api_routes(&config).unwrap();
    let response = app.oneshot(Request::get("/api/users").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
