//! Page response builder.
//!
//! # Responsibilities
//! - Collect component, props, root template, version and view data
//! - Apply partial-reload filtering and resolve props into a page object
//! - Answer Inertia visits with JSON and first loads with the root template
//!
//! # Design Decisions
//! - Filtering happens before resolution so excluded lazy props never run
//! - A prop or view data value that cannot be represented as JSON fails the
//!   whole response; no partial page is sent

use axum::http::header::{CONTENT_TYPE, VARY};
use axum::http::HeaderValue;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::context::InertiaContext;
use crate::error::InertiaError;
use crate::http::headers::X_INERTIA;
use crate::http::signals::NegotiationSignals;
use crate::page::object::{Page, PageVersion};
use crate::page::props::{Prop, Props};

/// Build the page object and its JSON encoding.
///
/// Props are restricted to `signals.partial_only` when the partial reload
/// targets `component`; otherwise every prop is kept.
pub fn build_envelope(
    component: &str,
    props: Props,
    url: &str,
    version: Option<&str>,
    signals: &NegotiationSignals,
) -> Result<(Page, String), InertiaError> {
    let partial = signals.is_partial_for(component);
    let props = if partial {
        props.only(&signals.partial_only)
    } else {
        props
    };

    tracing::debug!(component = %component, partial, "Resolving page props");

    let page = Page {
        component: component.to_string(),
        props: props.resolve()?,
        url: url.to_string(),
        version: PageVersion::from_option(version),
    };
    let json = page.to_json()?;
    Ok((page, json))
}

/// A page response in progress.
pub struct InertiaResponse {
    component: String,
    props: Props,
    root_template: Option<String>,
    version: Option<String>,
    view_data: Map<String, Value>,
    /// First view data value that failed to serialize.
    view_error: Option<serde_json::Error>,
    ctx: InertiaContext,
}

impl InertiaResponse {
    pub fn new(component: impl Into<String>, ctx: InertiaContext) -> Self {
        Self {
            component: component.into(),
            props: Props::new(),
            root_template: None,
            version: None,
            view_data: Map::new(),
            view_error: None,
            ctx,
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Add or replace a prop.
    pub fn with(mut self, key: impl Into<String>, prop: impl Into<Prop>) -> Self {
        self.props.insert(key, prop);
        self
    }

    /// Merge props; keys in `props` win.
    pub fn with_props(mut self, props: Props) -> Self {
        self.props.merge(props);
        self
    }

    /// Add a variable for the root template only; it is not sent to the client.
    ///
    /// A value that cannot be serialized fails the response in `into_http`.
    pub fn with_view_data<T: Serialize + ?Sized>(
        mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.view_data.insert(key.into(), value);
            }
            Err(e) => {
                self.view_error.get_or_insert(e);
            }
        }
        self
    }

    pub fn with_view_data_map(mut self, data: Map<String, Value>) -> Self {
        self.view_data.extend(data);
        self
    }

    pub fn root_template(mut self, template: impl Into<String>) -> Self {
        self.root_template = Some(template.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Resolve props and serialize the page without producing a response.
    pub fn build_page(self) -> Result<(Page, String), InertiaError> {
        build_envelope(
            &self.component,
            self.props,
            &self.ctx.url,
            self.version.as_deref(),
            &self.ctx.signals,
        )
    }

    /// Produce the HTTP response, surfacing serialization and render failures.
    pub fn into_http(mut self) -> Result<Response, InertiaError> {
        if let Some(e) = self.view_error.take() {
            return Err(InertiaError::Serialization(e));
        }
        let ctx = self.ctx.clone();
        let template = self
            .root_template
            .clone()
            .unwrap_or_else(|| ctx.root_template.clone());
        let mut vars = self.view_data.clone();
        let (page, json) = self.build_page()?;

        if ctx.signals.is_inertia {
            let mut response = json.into_response();
            let headers = response.headers_mut();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            headers.append(VARY, HeaderValue::from_static("Accept"));
            headers.insert(X_INERTIA, HeaderValue::from_static("true"));
            return Ok(response);
        }

        vars.insert("page".to_string(), serde_json::to_value(&page)?);
        vars.insert("pageJson".to_string(), Value::String(json));
        let html = ctx.renderer().render(&template, &vars)?;
        Ok(Html(html).into_response())
    }
}

impl IntoResponse for InertiaResponse {
    fn into_response(self) -> Response {
        match self.into_http() {
            Ok(response) => response,
            Err(e) => e.into_response(),
        }
    }
}

impl std::fmt::Debug for InertiaResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InertiaResponse")
            .field("component", &self.component)
            .field("props", &self.props)
            .field("root_template", &self.root_template)
            .field("version", &self.version)
            .finish()
    }
}
