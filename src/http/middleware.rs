//! Inertia protocol negotiation middleware.
//!
//! # Responsibilities
//! - Publish the per-request `InertiaContext` (version, shared props)
//! - Bridge the axios XSRF header and cookie to the host token check
//! - Normalize Inertia request bodies before they reach handlers
//! - Adjust Inertia responses: forced visits on stale assets, redirect-back
//!   on empty results, 303 after mutating redirects
//!
//! # Design Decisions
//! - `Vary: X-Inertia` and the XSRF cookie are applied to the final response,
//!   including replaced ones, so caches and axios always see them
//! - A missing header is "feature not requested"; nothing here rejects a
//!   request except an over-limit body

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::VARY, HeaderMap, HeaderValue, Method, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use url::Url;

use crate::assets::{FsResourceResolver, ResourceResolver, VersionResolver};
use crate::config::InertiaConfig;
use crate::context::{InertiaContext, RequestInfo, ShareFn};
use crate::error::InertiaError;
use crate::http::request::normalize;
use crate::http::response::{absolute_url, is_empty_body, location_response, redirect_back};
use crate::http::signals::NegotiationSignals;
use crate::page::props::Prop;
use crate::render::{HandlebarsRenderer, TemplateRenderer};
use crate::security::{copy_xsrf_header, set_xsrf_cookie, SecurityToken, SessionToken};
use crate::session::resolve_validation_errors;

/// Key of the always-shared validation errors prop.
pub const ERRORS_PROP: &str = "errors";

/// State injected into the middleware.
#[derive(Clone)]
pub struct InertiaState {
    inner: Arc<StateInner>,
}

struct StateInner {
    config: InertiaConfig,
    base_url: Option<Url>,
    versions: VersionResolver,
    renderer: Arc<dyn TemplateRenderer>,
    token: Arc<dyn SecurityToken>,
    shared: Vec<(String, ShareFn)>,
}

impl InertiaState {
    pub fn builder(config: InertiaConfig) -> InertiaStateBuilder {
        InertiaStateBuilder {
            config,
            resolver: None,
            renderer: None,
            token: None,
            shared: Vec::new(),
        }
    }

    pub fn config(&self) -> &InertiaConfig {
        &self.inner.config
    }

    pub fn token(&self) -> &Arc<dyn SecurityToken> {
        &self.inner.token
    }

    /// Wrap `router` with the negotiation middleware.
    pub fn apply<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.layer(middleware::from_fn_with_state(self, inertia_middleware))
    }

    /// Context for one request; every shared prop is bound to `info`.
    fn context_for(&self, info: &Arc<RequestInfo>, version: Option<String>) -> InertiaContext {
        let url = info
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());

        let mut ctx = InertiaContext::new(
            info.signals.clone(),
            url,
            version,
            self.inner.config.views.root_template.clone(),
            self.inner.renderer.clone(),
        );

        ctx.share(
            ERRORS_PROP,
            info.clone(),
            errors_provider(self.inner.config.session.form_info_key.clone()),
        );
        for (key, provider) in &self.inner.shared {
            ctx.share(key.clone(), info.clone(), provider.clone());
        }
        ctx
    }
}

fn errors_provider(form_info_key: String) -> ShareFn {
    Arc::new(move |req: &RequestInfo| {
        Prop::Value(resolve_validation_errors(
            req.session.as_ref(),
            &form_info_key,
            req.signals.error_bag.as_deref(),
        ))
    })
}

/// Builder for `InertiaState`; collaborators default from the config.
pub struct InertiaStateBuilder {
    config: InertiaConfig,
    resolver: Option<Arc<dyn ResourceResolver>>,
    renderer: Option<Arc<dyn TemplateRenderer>>,
    token: Option<Arc<dyn SecurityToken>>,
    shared: Vec<(String, ShareFn)>,
}

impl InertiaStateBuilder {
    pub fn resolver(mut self, resolver: impl ResourceResolver + 'static) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    pub fn renderer(mut self, renderer: impl TemplateRenderer + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    pub fn token(mut self, token: impl SecurityToken + 'static) -> Self {
        self.token = Some(Arc::new(token));
        self
    }

    /// Share a prop with every page rendered behind this middleware.
    ///
    /// The provider runs lazily, only when the prop survives partial-reload
    /// filtering. Sharing `errors` replaces the built-in validation errors.
    pub fn share<F>(mut self, key: impl Into<String>, provider: F) -> Self
    where
        F: Fn(&RequestInfo) -> Prop + Send + Sync + 'static,
    {
        self.shared.push((key.into(), Arc::new(provider)));
        self
    }

    pub fn build(self) -> Result<InertiaState, InertiaError> {
        let config = self.config;

        let base_url = config
            .server
            .base_url
            .as_deref()
            .and_then(|base| Url::parse(base).ok());

        let resolver = self
            .resolver
            .unwrap_or_else(|| Arc::new(FsResourceResolver::new(&config.assets.resource_root)));
        let versions = VersionResolver::new(resolver, config.assets.app_bundle_resource.clone());

        let renderer = match self.renderer {
            Some(renderer) => renderer,
            None => {
                let mut renderer = HandlebarsRenderer::with_default_template();
                if let Some(dir) = &config.views.template_dir {
                    let count = renderer.register_dir(std::path::Path::new(dir))?;
                    tracing::info!(dir = %dir, count, "Registered root templates");
                }
                Arc::new(renderer)
            }
        };

        let token = self.token.unwrap_or_else(|| {
            Arc::new(SessionToken::new(
                config.security.xsrf_enabled,
                config.security.token_name.clone(),
                config.security.token_session_key.clone(),
            ))
        });

        Ok(InertiaState {
            inner: Arc::new(StateInner {
                config,
                base_url,
                versions,
                renderer,
                token,
                shared: self.shared,
            }),
        })
    }
}

/// Facts about the inbound request needed once the handler has answered.
struct Visit {
    method: Method,
    client_version: String,
    server_version: Option<String>,
    location: String,
    headers: HeaderMap,
}

impl Visit {
    fn finish(&self, mut response: Response) -> Response {
        if self.method == Method::GET {
            if let Some(server) = &self.server_version {
                if *server != self.client_version {
                    tracing::debug!(
                        client_version = %self.client_version,
                        server_version = %server,
                        location = %self.location,
                        "Asset version changed; forcing full visit"
                    );
                    response = location_response(&self.location, true);
                }
            }
        }

        if response.status() == StatusCode::OK && is_empty_body(response.body()) {
            tracing::debug!("Empty Inertia response; redirecting back");
            response = redirect_back(&self.headers);
        }

        if response.status() == StatusCode::FOUND
            && matches!(self.method, Method::PUT | Method::PATCH | Method::DELETE)
        {
            tracing::debug!(method = %self.method, "Rewriting 302 to 303 after mutation");
            *response.status_mut() = StatusCode::SEE_OTHER;
        }

        response
    }
}

pub async fn inertia_middleware(
    State(state): State<InertiaState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let signals = NegotiationSignals::from_headers(&parts.headers);

    // 1. Publish version and shared props for handlers
    let version = state.inner.versions.resolve_version().await;
    let info = Arc::new(RequestInfo::from_parts(&parts, signals.clone()));
    let ctx = state.context_for(&info, version.clone());
    parts.extensions.insert(ctx);

    // 2. Bridge the axios XSRF header
    let token = state.token().clone();
    if token.is_enabled() {
        copy_xsrf_header(&mut parts.headers, token.name());
    }

    let visit = signals.is_inertia.then(|| Visit {
        method: parts.method.clone(),
        client_version: signals.requested_version.clone().unwrap_or_default(),
        server_version: version,
        location: absolute_url(&parts, state.inner.base_url.as_ref()),
        headers: parts.headers.clone(),
    });

    // 3. Normalize Inertia request bodies
    let mut request = Request::from_parts(parts, body);
    if signals.is_inertia {
        request = match normalize(request, state.inner.config.request.max_body_bytes).await {
            Ok(normalized) => normalized,
            Err(e) => return e.into_response(),
        };
    }

    // 4. Downstream
    let mut response = next.run(request).await;

    // 7-10. Inertia-only adjustments
    if let Some(visit) = &visit {
        response = visit.finish(response);
    }

    // 5. Caches must key on X-Inertia
    response
        .headers_mut()
        .append(VARY, HeaderValue::from_static("X-Inertia"));

    // 6. Refresh the token cookie for axios
    if token.is_enabled() {
        if let Some(value) = token.value(&info) {
            set_xsrf_cookie(
                response.headers_mut(),
                &value,
                &state.inner.config.security.cookie_path,
            );
        }
    }

    response
}
