//! Negotiation signals derived from request headers.
//!
//! # Responsibilities
//! - Detect Inertia visits and partial reloads
//! - Expose the client asset version and error bag name
//!
//! # Design Decisions
//! - Pure function of the header map; never mutated after construction
//! - An absent or non-UTF-8 header is "feature not requested", never an error

use axum::http::{HeaderMap, HeaderName};

use crate::http::headers::{
    X_INERTIA, X_INERTIA_ERROR_BAG, X_INERTIA_PARTIAL_COMPONENT, X_INERTIA_PARTIAL_DATA,
    X_INERTIA_VERSION,
};

/// Read-only facts about how the client wants the response shaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NegotiationSignals {
    pub is_inertia: bool,
    pub requested_version: Option<String>,
    pub partial_component: Option<String>,
    /// Requested keys in header order, empty entries dropped.
    pub partial_only: Vec<String>,
    pub error_bag: Option<String>,
}

impl NegotiationSignals {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let partial_only = header_str(headers, &X_INERTIA_PARTIAL_DATA)
            .map(|data| {
                data.split(',')
                    .filter(|key| !key.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            is_inertia: is_inertia_request(headers),
            requested_version: header_str(headers, &X_INERTIA_VERSION).map(str::to_string),
            partial_component: header_str(headers, &X_INERTIA_PARTIAL_COMPONENT)
                .map(str::to_string),
            partial_only,
            error_bag: header_str(headers, &X_INERTIA_ERROR_BAG)
                .filter(|bag| !bag.is_empty())
                .map(str::to_string),
        }
    }

    /// True when this is a partial reload targeting `component`.
    pub fn is_partial_for(&self, component: &str) -> bool {
        !self.partial_only.is_empty() && self.partial_component.as_deref() == Some(component)
    }
}

/// True when the request carries a non-empty `X-Inertia` header.
pub fn is_inertia_request(headers: &HeaderMap) -> bool {
    header_str(headers, &X_INERTIA).is_some_and(|v| !v.is_empty())
}

pub(crate) fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
