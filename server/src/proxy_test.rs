use axum::Router;
use axum::routing::any;
use tower::ServiceExt;

use super::*;

/// Upstream stand-in that echoes what it received.
async fn echo(request: Request) -> Response {
    let method = request.method().to_string();
    let uri = request.uri().to_string();
    let auth = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let cookie = request.headers().get(header::COOKIE).is_some();
    let body = to_bytes(request.into_body(), MAX_BODY_BYTES).await.unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "method": method, "uri": uri, "auth": auth, "cookie": cookie, "body": body })),
    )
        .into_response()
}

async fn spawn_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, Router::new().fallback(echo)).await.unwrap();
    });
    format!("http://{addr}")
}

fn proxy_app(base: &str) -> Router {
    let upstream = Upstream::new(base, Duration::from_secs(5)).unwrap();
    Router::new().route("/api/{*path}", any(forward)).with_state(upstream)
}

#[test]
fn target_url_joins_base_and_path() {
    let upstream = Upstream::new("https://iam.internal/", Duration::from_secs(1)).unwrap();
    assert_eq!(upstream.target_url("/api/users?page=2"), "https://iam.internal/api/users?page=2");
}

#[test]
fn only_allowed_headers_are_forwarded() {
    let mut incoming = HeaderMap::new();
    incoming.insert(header::AUTHORIZATION, "Bearer t".parse().unwrap());
    incoming.insert(header::COOKIE, "sid=1".parse().unwrap());
    incoming.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
    let out = forwarded_headers(&incoming);
    assert_eq!(out.len(), 2);
    assert!(out.get(header::COOKIE).is_none());
}

#[tokio::test]
async fn request_is_relayed_with_status_and_body() {
    let base = spawn_upstream().await;
    let request = axum::http::Request::post("/api/roles?dry=1")
        .header(header::AUTHORIZATION, "Bearer abc")
        .header(header::COOKIE, "sid=1")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"Ops"}"#))
        .unwrap();

    let response = proxy_app(&base).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = to_bytes(response.into_body(), MAX_BODY_BYTES).await.unwrap();
    let echoed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["uri"], "/api/roles?dry=1");
    assert_eq!(echoed["auth"], "Bearer abc");
    assert_eq!(echoed["cookie"], false);
    assert_eq!(echoed["body"], r#"{"name":"Ops"}"#);
}

#[tokio::test]
async fn unreachable_backend_is_bad_gateway() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let request = axum::http::Request::get("/api/users").body(Body::empty()).unwrap();
    let response = proxy_app(&format!("http://{addr}")).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = to_bytes(response.into_body(), MAX_BODY_BYTES).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().starts_with("backend unreachable"));
}
