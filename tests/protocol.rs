//! Protocol tests driving the full middleware stack with `oneshot`.

mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response, StatusCode};
use inertia_bridge::MemorySession;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{app, bundle_dir, config, BUNDLE_VERSION};

async fn body_string(res: Response<Body>) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(res: Response<Body>) -> Value {
    serde_json::from_str(&body_string(res).await).unwrap()
}

fn inertia(method: &str, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("X-Inertia", "true")
        .header("X-Inertia-Version", BUNDLE_VERSION)
}

#[tokio::test]
async fn test_stale_version_forces_full_visit() {
    let dir = bundle_dir();
    let app = app(config(dir.path()), Arc::new(MemorySession::new()));

    let res = app
        .oneshot(
            Request::builder()
                .uri("/users?page=2")
                .header("X-Inertia", "true")
                .header("X-Inertia-Version", "stale")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(res.headers()["x-inertia-location"], "https://site.test/users?page=2");
    assert_eq!(res.headers()["vary"], "X-Inertia");
    assert!(body_string(res).await.is_empty());
}

#[tokio::test]
async fn test_missing_version_header_counts_as_stale() {
    let dir = bundle_dir();
    let app = app(config(dir.path()), Arc::new(MemorySession::new()));

    let res = app
        .oneshot(
            Request::builder()
                .uri("/users")
                .header("X-Inertia", "true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unversioned_server_never_conflicts() {
    let dir = bundle_dir();
    let mut config = config(dir.path());
    config.assets.app_bundle_resource = None;
    let app = app(config, Arc::new(MemorySession::new()));

    let res = app
        .oneshot(
            Request::builder()
                .uri("/users")
                .header("X-Inertia", "true")
                .header("X-Inertia-Version", "anything")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let page = body_json(res).await;
    assert_eq!(page["version"], json!(0));
}

#[tokio::test]
async fn test_post_with_stale_version_is_not_forced() {
    let dir = bundle_dir();
    let app = app(config(dir.path()), Arc::new(MemorySession::new()));

    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/moved")
                .header("X-Inertia", "true")
                .header("X-Inertia-Version", "stale")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()["location"], "/users");
}

#[tokio::test]
async fn test_inertia_visit_returns_page_json() {
    let dir = bundle_dir();
    let app = app(config(dir.path()), Arc::new(MemorySession::new()));

    let res = app
        .oneshot(inertia("GET", "/users?page=2").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-inertia"], "true");
    assert_eq!(res.headers()["content-type"], "application/json");
    let vary: Vec<_> = res.headers().get_all("vary").iter().collect();
    assert!(vary.iter().any(|v| *v == "Accept"));
    assert!(vary.iter().any(|v| *v == "X-Inertia"));

    let page = body_json(res).await;
    assert_eq!(page["component"], "Users/Index");
    assert_eq!(page["url"], "/users?page=2");
    assert_eq!(page["version"], BUNDLE_VERSION);
    let keys: Vec<&String> = page["props"].as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["errors", "auth", "a", "b", "c"]);
    assert_eq!(page["props"]["errors"], json!({}));
}

#[tokio::test]
async fn test_partial_reload_filters_props() {
    let dir = bundle_dir();
    let app = app(config(dir.path()), Arc::new(MemorySession::new()));

    let res = app
        .oneshot(
            inertia("GET", "/users")
                .header("X-Inertia-Partial-Component", "Users/Index")
                .header("X-Inertia-Partial-Data", "a,c")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let page = body_json(res).await;
    assert_eq!(page["props"], json!({ "a": 1, "c": 3 }));
}

#[tokio::test]
async fn test_partial_reload_for_other_component_keeps_everything() {
    let dir = bundle_dir();
    let app = app(config(dir.path()), Arc::new(MemorySession::new()));

    let res = app
        .oneshot(
            inertia("GET", "/users")
                .header("X-Inertia-Partial-Component", "Dashboard")
                .header("X-Inertia-Partial-Data", "a")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let page = body_json(res).await;
    assert_eq!(page["props"].as_object().unwrap().len(), 5);
}

#[tokio::test]
async fn test_excluded_lazy_prop_is_never_evaluated() {
    let dir = bundle_dir();
    let app = app(config(dir.path()), Arc::new(MemorySession::new()));

    let res = app
        .oneshot(
            inertia("GET", "/lazy")
                .header("X-Inertia-Partial-Component", "Lazy")
                .header("X-Inertia-Partial-Data", "cheap")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let page = body_json(res).await;
    assert_eq!(page["props"], json!({ "cheap": "yes" }));
}

#[tokio::test]
async fn test_first_load_renders_root_template() {
    let dir = bundle_dir();
    let app = app(config(dir.path()), Arc::new(MemorySession::new()));

    let res = app
        .oneshot(Request::builder().uri("/users").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("x-inertia").is_none());
    assert!(res.headers()["content-type"].to_str().unwrap().starts_with("text/html"));
    let html = body_string(res).await;
    assert!(html.contains(r#"<div id="app" data-page=""#));
    assert!(html.contains("&quot;component&quot;:&quot;Users/Index&quot;"));
}

#[tokio::test]
async fn test_empty_response_redirects_back() {
    let dir = bundle_dir();
    let app = app(config(dir.path()), Arc::new(MemorySession::new()));

    let res = app
        .clone()
        .oneshot(
            inertia("POST", "/empty")
                .header("Referer", "https://site.test/form")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()["location"], "https://site.test/form");

    let res = app
        .oneshot(inertia("POST", "/empty").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()["location"], "/");
}

#[tokio::test]
async fn test_empty_response_without_inertia_is_untouched() {
    let dir = bundle_dir();
    let app = app(config(dir.path()), Arc::new(MemorySession::new()));

    let res = app
        .oneshot(Request::builder().method("POST").uri("/empty").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("location").is_none());
}

#[tokio::test]
async fn test_mutating_redirects_become_see_other() {
    let dir = bundle_dir();
    let app = app(config(dir.path()), Arc::new(MemorySession::new()));

    for method in ["PUT", "PATCH", "DELETE"] {
        let res = app
            .clone()
            .oneshot(inertia(method, "/users").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "{}", method);
        assert_eq!(res.headers()["location"], "/users");
    }

    let res = app
        .oneshot(Request::builder().method("DELETE").uri("/users").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_plain_response_passes_through() {
    let dir = bundle_dir();
    let app = app(config(dir.path()), Arc::new(MemorySession::new()));

    let res = app
        .oneshot(Request::builder().uri("/plain").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()["vary"], "X-Inertia");
    assert_eq!(body_string(res).await, "plain body");
}

#[tokio::test]
async fn test_json_body_is_visible_as_params() {
    let dir = bundle_dir();
    let app = app(config(dir.path()), Arc::new(MemorySession::new()));

    let res = app
        .oneshot(
            inertia("POST", "/users")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"name":"Ada","tags":["x"]}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!({ "name": "Ada", "tags": ["x"] }));
}

#[tokio::test]
async fn test_malformed_json_body_is_ignored() {
    let dir = bundle_dir();
    let app = app(config(dir.path()), Arc::new(MemorySession::new()));

    let res = app
        .oneshot(
            inertia("POST", "/users")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!({}));
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let dir = bundle_dir();
    let mut config = config(dir.path());
    config.request.max_body_bytes = 16;
    let app = app(config, Arc::new(MemorySession::new()));

    let res = app
        .oneshot(
            inertia("POST", "/users")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"name":"a rather long name"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_xsrf_header_is_copied_and_cookie_set() {
    let dir = bundle_dir();
    let session = Arc::new(MemorySession::new().with("SecurityID", json!("tok123")));
    let app = app(config(dir.path()), session);

    let res = app
        .oneshot(
            inertia("POST", "/token")
                .header("X-XSRF-TOKEN", "tok123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let cookie = res.headers()["set-cookie"].to_str().unwrap().to_string();
    assert!(cookie.starts_with("XSRF-TOKEN=tok123"));
    assert!(cookie.contains("Path=/"));
    assert!(!cookie.contains("HttpOnly"));
    assert_eq!(body_string(res).await, "tok123");
}

#[tokio::test]
async fn test_xsrf_disabled_sets_no_cookie() {
    let dir = bundle_dir();
    let mut config = config(dir.path());
    config.security.xsrf_enabled = false;
    let session = Arc::new(MemorySession::new().with("SecurityID", json!("tok123")));
    let app = app(config, session);

    let res = app
        .oneshot(
            inertia("POST", "/token")
                .header("X-XSRF-TOKEN", "tok123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(res.headers().get("set-cookie").is_none());
    assert_eq!(body_string(res).await, "missing");
}

#[tokio::test]
async fn test_validation_errors_are_shared() {
    let dir = bundle_dir();
    let session = Arc::new(MemorySession::new().with(
        "FormInfo",
        json!({ "Login": { "result": [ { "field": "Email", "value": "Required" } ] } }),
    ));
    let app = app(config(dir.path()), session);

    let res = app
        .clone()
        .oneshot(inertia("GET", "/users").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let page = body_json(res).await;
    assert_eq!(page["props"]["errors"], json!({ "Email": "Required" }));

    let res = app
        .oneshot(
            inertia("GET", "/users")
                .header("X-Inertia-Error-Bag", "login")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let page = body_json(res).await;
    assert_eq!(page["props"]["errors"], json!({ "login": { "Email": "Required" } }));
}

#[tokio::test]
async fn test_shared_props_see_the_session() {
    let dir = bundle_dir();
    let session = Arc::new(MemorySession::new().with("user", json!("ada")));
    let app = app(config(dir.path()), session);

    let res = app
        .oneshot(inertia("GET", "/users").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let page = body_json(res).await;
    assert_eq!(page["props"]["auth"], json!({ "user": "ada" }));
}
