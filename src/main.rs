//! Inertia demo server.
//!
//! Serves a small users application behind the Inertia middleware so the
//! protocol can be exercised with the official client or curl:
//!
//! ```text
//! curl -H 'X-Inertia: true' http://127.0.0.1:8080/users
//! ```

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header::LOCATION, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Router,
};
use clap::Parser;
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

use inertia_bridge::config::{load_config, InertiaConfig};
use inertia_bridge::observability::init_logging;
use inertia_bridge::{
    BodyParams, HttpServer, Inertia, InertiaState, MemorySession, Prop, Record, Session,
};

#[derive(Parser)]
#[command(name = "inertia-bridge")]
#[command(about = "Demo server for the Inertia.js axum adapter", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[derive(Debug, Clone)]
struct User {
    id: u64,
    name: String,
}

impl Record for User {
    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), json!(self.id));
        map.insert("name".into(), json!(self.name));
        map
    }
}

#[derive(Clone)]
struct Demo {
    users: Arc<Mutex<Vec<User>>>,
    session: Arc<MemorySession>,
}

impl Demo {
    fn users(&self) -> Vec<User> {
        self.users.lock().expect("users mutex poisoned").clone()
    }
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

async fn home(inertia: Inertia) -> impl IntoResponse {
    inertia
        .render("Home")
        .with("greeting", "Hello from axum")
        .with_view_data("title", "Home")
}

async fn list_users(State(demo): State<Demo>, inertia: Inertia) -> impl IntoResponse {
    let users = demo.users();
    let count = users.len();
    inertia
        .render("Users/Index")
        .with("users", Prop::collection(users))
        .with("stats", Prop::lazy(move || json!({ "total": count })))
        .with_view_data("title", "Users")
}

async fn create_user(State(demo): State<Demo>, params: BodyParams) -> Response {
    let name = params.str("name").unwrap_or_default().trim().to_string();
    if name.is_empty() {
        demo.session.set(
            "FormInfo",
            json!({ "CreateUser": { "result": [ { "field": "name", "value": "Name is required" } ] } }),
        );
        return found("/users");
    }

    demo.session.remove("FormInfo");
    let mut users = demo.users.lock().expect("users mutex poisoned");
    let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
    users.push(User { id, name });
    tracing::info!(id, "User created");
    found("/users")
}

async fn delete_user(State(demo): State<Demo>, Path(id): Path<u64>) -> Response {
    demo.users
        .lock()
        .expect("users mutex poisoned")
        .retain(|u| u.id != id);
    found("/users")
}

/// Completes without a body; Inertia visits are redirected back.
async fn touch() -> StatusCode {
    StatusCode::OK
}

async fn attach_session(State(demo): State<Demo>, mut req: Request<Body>, next: Next) -> Response {
    req.extensions_mut().insert(Session(demo.session.clone()));
    next.run(req).await
}

fn demo_routes(demo: Demo) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", delete(delete_user))
        .route("/touch", get(touch).post(touch))
        .with_state(demo)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => InertiaConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
    }

    init_logging(&config.observability);
    tracing::info!("inertia-bridge v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.server.bind_address,
        versioned = config.assets.app_bundle_resource.is_some(),
        xsrf_enabled = config.security.xsrf_enabled,
        "Configuration loaded"
    );

    let demo = Demo {
        users: Arc::new(Mutex::new(vec![
            User { id: 1, name: "Ada".into() },
            User { id: 2, name: "Grace".into() },
        ])),
        session: Arc::new(MemorySession::new()),
    };

    let state = InertiaState::builder(config.clone())
        .share("appName", |_| Prop::from("Inertia demo"))
        .build()?;

    // The session layer sits outside the Inertia layer so shared props see it.
    let routes = demo_routes(demo.clone());
    let server = HttpServer::with_state(state, routes)
        .map_router(|router| router.layer(middleware::from_fn_with_state(demo, attach_session)));

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
