//! Request normalization for Inertia visits.
//!
//! # Responsibilities
//! - Buffer the body of an Inertia request within the configured limit
//! - Expose parsed body fields as `BodyParams`, whether the client sent a
//!   form-encoded or JSON body
//! - Hand downstream handlers an independent copy of the request
//!
//! # Design Decisions
//! - JSON keys override form fields of the same name (right-biased merge)
//! - A JSON body that fails to parse merges nothing and is logged; it does
//!   not fail the request
//! - The session handle is shared between original and copy, everything
//!   else is duplicated

use axum::body::{to_bytes, Body, Bytes};
use axum::extract::FromRequestParts;
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::{Method, Request};
use http_body_util::LengthLimitError;
use serde_json::{Map, Value};

use crate::error::InertiaError;
use crate::http::signals::header_str;

/// Parsed body fields of the current request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyParams(pub Map<String, Value>);

impl BodyParams {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for BodyParams {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<BodyParams>().cloned().unwrap_or_default())
    }
}

/// Build an independent copy of a request from its parts and buffered body.
///
/// Extensions (session included) are cloned; the session store itself is an
/// `Arc` and therefore shared.
pub fn duplicate(parts: &Parts, body: &Bytes) -> Request<Body> {
    let mut request = Request::new(Body::from(body.clone()));
    *request.method_mut() = parts.method.clone();
    *request.uri_mut() = parts.uri.clone();
    *request.version_mut() = parts.version;
    *request.headers_mut() = parts.headers.clone();
    *request.extensions_mut() = parts.extensions.clone();
    request
}

/// Normalize an Inertia request so form-oriented handlers see JSON fields.
pub async fn normalize(request: Request<Body>, limit: usize) -> Result<Request<Body>, InertiaError> {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, limit).await.map_err(|e| {
        if is_length_limit(&e) {
            InertiaError::BodyTooLarge { limit }
        } else {
            InertiaError::BodyRead(e.to_string())
        }
    })?;

    let mut normalized = duplicate(&parts, &bytes);
    let params = body_params(&parts, &bytes);
    normalized.extensions_mut().insert(params);
    Ok(normalized)
}

/// Existing params, form fields, then JSON fields; later sources win.
fn body_params(parts: &Parts, body: &Bytes) -> BodyParams {
    let mut params = parts
        .extensions
        .get::<BodyParams>()
        .cloned()
        .unwrap_or_default();

    let content_type = header_str(&parts.headers, &CONTENT_TYPE)
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if content_type.starts_with("application/x-www-form-urlencoded") {
        for (key, value) in form_urlencoded::parse(body) {
            params.0.insert(key.into_owned(), Value::String(value.into_owned()));
        }
    }

    let accepts_json = matches!(parts.method, Method::POST | Method::PUT | Method::PATCH);
    if accepts_json && content_type == "application/json" {
        params.0.extend(json_fields(body));
    }

    params
}

fn json_fields(body: &Bytes) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => Map::new(),
        Err(e) => {
            // TODO: reject malformed JSON with 400 once clients are known to send valid bodies.
            tracing::warn!(error = %e, "Ignoring unparsable JSON request body");
            Map::new()
        }
    }
}

fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}
