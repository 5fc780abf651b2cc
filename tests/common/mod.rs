//! Shared utilities for integration tests.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use axum::{
    body::Body,
    http::{header::LOCATION, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use inertia_bridge::{BodyParams, Inertia, InertiaConfig, InertiaState, MemorySession, Prop, Session};
use serde_json::{json, Value};

/// Version every fixture bundle is stamped with.
pub const BUNDLE_VERSION: &str = "1700000000";

/// A temp directory holding `app/dist/app.js` with a fixed mtime.
pub fn bundle_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("app/dist")).unwrap();
    let bundle = dir.path().join("app/dist/app.js");
    std::fs::write(&bundle, "console.log('app')").unwrap();
    std::fs::File::options()
        .write(true)
        .open(&bundle)
        .unwrap()
        .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000))
        .unwrap();
    dir
}

/// Config with versioning pointed at `dir` and XSRF enabled.
pub fn config(dir: &std::path::Path) -> InertiaConfig {
    let mut config = InertiaConfig::default();
    config.assets.app_bundle_resource = Some("app: dist/app.js".into());
    config.assets.resource_root = dir.display().to_string();
    config.security.xsrf_enabled = true;
    config.server.base_url = Some("https://site.test".into());
    config
}

fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location)]).into_response()
}

async fn echo_security_header(request: Request<Body>) -> String {
    request
        .headers()
        .get("x-securityid")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("missing")
        .to_string()
}

/// Test application: routes, Inertia layer, then a session layer outside it.
#[allow(dead_code)]
pub fn app(config: InertiaConfig, session: Arc<MemorySession>) -> Router {
    let routes = Router::new()
        .route(
            "/users",
            get(|inertia: Inertia| async move {
                inertia
                    .render("Users/Index")
                    .with("a", 1)
                    .with("b", 2)
                    .with("c", 3)
            })
            .post(|params: BodyParams| async move { axum::Json(Value::Object(params.into_inner())) })
            .put(|| async { found("/users") })
            .patch(|| async { found("/users") })
            .delete(|| async { found("/users") }),
        )
        .route("/plain", get(|| async { (StatusCode::CREATED, "plain body") }))
        .route("/empty", get(|| async { StatusCode::OK }).post(|| async { StatusCode::OK }))
        .route("/moved", post(|| async { found("/users") }))
        .route("/token", post(echo_security_header))
        .route(
            "/lazy",
            get(|inertia: Inertia| async move {
                inertia
                    .render("Lazy")
                    .with("cheap", "yes")
                    .with("expensive", Prop::lazy(|| -> Prop { panic!("excluded lazy prop ran") }))
            }),
        );

    let state = InertiaState::builder(config)
        .share("auth", |req| {
            let user = req.session.as_ref().and_then(|s| s.get("user"));
            Prop::from(json!({ "user": user }))
        })
        .build()
        .unwrap();

    state
        .apply(routes)
        .layer(middleware::from_fn(move |mut req: Request<Body>, next: Next| {
            let session = session.clone();
            async move {
                req.extensions_mut().insert(Session(session));
                next.run(req).await
            }
        }))
}

