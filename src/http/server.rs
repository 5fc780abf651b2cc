//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wrap application routes with the Inertia middleware
//! - Wire up tracing for every request
//! - Bind server to listener and shut down gracefully

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::InertiaConfig;
use crate::error::InertiaError;
use crate::http::middleware::InertiaState;

/// HTTP server for an Inertia application.
pub struct HttpServer {
    router: Router,
    config: InertiaConfig,
}

impl HttpServer {
    /// Create a server from config with the default collaborators.
    pub fn new(config: InertiaConfig, routes: Router) -> Result<Self, InertiaError> {
        let state = InertiaState::builder(config.clone()).build()?;
        Ok(Self::with_state(state, routes))
    }

    /// Create a server from a prepared middleware state.
    pub fn with_state(state: InertiaState, routes: Router) -> Self {
        let config = state.config().clone();
        let router = Self::build_router(state, routes);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: InertiaState, routes: Router) -> Router {
        state.apply(routes).layer(TraceLayer::new_for_http())
    }

    /// Apply outer layers (sessions, auth) that must run before the Inertia layer.
    pub fn map_router(mut self, f: impl FnOnce(Router) -> Router) -> Self {
        self.router = f(self.router);
        self
    }

    /// The router with all layers applied, for serving elsewhere or testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &InertiaConfig {
        &self.config
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
