//! Per-request Inertia context.
//!
//! # Responsibilities
//! - Carry the negotiation signals, resolved asset version and shared props
//!   from the middleware to the handler that renders the page
//! - Provide the `Inertia` extractor handlers use to build responses
//!
//! # Design Decisions
//! - Lives in request extensions; nothing is stored in process-wide state,
//!   so concurrent requests cannot observe each other's props or version
//! - Shared props are factories over a request snapshot, seeded into each
//!   response as lazy props and evaluated only if they survive filtering

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::Response;

use crate::error::InertiaError;
use crate::http::response::location_response;
use crate::http::signals::NegotiationSignals;
use crate::page::props::Prop;
use crate::page::response::InertiaResponse;
use crate::render::TemplateRenderer;
use crate::session::Session;

/// Snapshot of the request handed to shared-prop providers.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub signals: NegotiationSignals,
    pub session: Option<Session>,
}

impl RequestInfo {
    pub fn from_parts(parts: &Parts, signals: NegotiationSignals) -> Self {
        Self {
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
            signals,
            session: parts.extensions.get::<Session>().cloned(),
        }
    }
}

/// Application-registered provider of a shared prop.
pub type ShareFn = Arc<dyn Fn(&RequestInfo) -> Prop + Send + Sync>;

/// A shared prop bound to the current request.
pub type SharedProp = Arc<dyn Fn() -> Prop + Send + Sync>;

/// Everything a handler needs to answer with an Inertia page.
#[derive(Clone)]
pub struct InertiaContext {
    pub signals: NegotiationSignals,
    /// Path and query of the current request.
    pub url: String,
    /// Server asset version, `None` when versioning is disabled.
    pub version: Option<String>,
    pub root_template: String,
    shared: Vec<(String, SharedProp)>,
    renderer: Arc<dyn TemplateRenderer>,
}

impl InertiaContext {
    pub fn new(
        signals: NegotiationSignals,
        url: impl Into<String>,
        version: Option<String>,
        root_template: impl Into<String>,
        renderer: Arc<dyn TemplateRenderer>,
    ) -> Self {
        Self {
            signals,
            url: url.into(),
            version,
            root_template: root_template.into(),
            shared: Vec::new(),
            renderer,
        }
    }

    /// Bind `provider` to `info` and share it under `key`.
    pub fn share(&mut self, key: impl Into<String>, info: Arc<RequestInfo>, provider: ShareFn) {
        let key = key.into();
        let bound: SharedProp = Arc::new(move || provider(&info));
        match self.shared.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = bound,
            None => self.shared.push((key, bound)),
        }
    }

    pub fn shared_keys(&self) -> impl Iterator<Item = &str> {
        self.shared.iter().map(|(k, _)| k.as_str())
    }

    pub fn renderer(&self) -> &Arc<dyn TemplateRenderer> {
        &self.renderer
    }

    /// Start a page response seeded with the shared props.
    pub fn render(&self, component: impl Into<String>) -> InertiaResponse {
        let mut response = InertiaResponse::new(component, self.clone())
            .root_template(self.root_template.clone());
        if let Some(version) = &self.version {
            response = response.version(version.clone());
        }
        for (key, provider) in &self.shared {
            let provider = provider.clone();
            response = response.with(key.clone(), Prop::lazy(move || provider()));
        }
        response
    }
}

impl std::fmt::Debug for InertiaContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InertiaContext")
            .field("signals", &self.signals)
            .field("url", &self.url)
            .field("version", &self.version)
            .field("root_template", &self.root_template)
            .field("shared", &self.shared.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish()
    }
}

/// Extractor giving handlers access to the current Inertia context.
///
/// ```ignore
/// async fn index(inertia: Inertia) -> InertiaResponse {
///     inertia.render("Users/Index").with("users", Prop::lazy(load_users))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Inertia(pub InertiaContext);

impl Inertia {
    pub fn render(&self, component: impl Into<String>) -> InertiaResponse {
        self.0.render(component)
    }

    /// Force a full browser visit to `url`.
    pub fn location(&self, url: &str) -> Response {
        location_response(url, self.0.signals.is_inertia)
    }

    pub fn context(&self) -> &InertiaContext {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Inertia {
    type Rejection = InertiaError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<InertiaContext>()
            .cloned()
            .map(Inertia)
            .ok_or(InertiaError::MissingContext)
    }
}
