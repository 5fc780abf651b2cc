//! Inertia protocol header names.
//!
//! `HeaderName::from_static` requires lowercase input; HTTP header names are
//! case-insensitive on the wire.

use axum::http::HeaderName;

/// Marks a request as an Inertia XHR visit, and a response as Inertia JSON.
pub const X_INERTIA: HeaderName = HeaderName::from_static("x-inertia");

/// Asset version the client was built against.
pub const X_INERTIA_VERSION: HeaderName = HeaderName::from_static("x-inertia-version");

/// Comma-separated prop keys requested by a partial reload.
pub const X_INERTIA_PARTIAL_DATA: HeaderName =
    HeaderName::from_static("x-inertia-partial-data");

/// Component the partial reload was issued from.
pub const X_INERTIA_PARTIAL_COMPONENT: HeaderName =
    HeaderName::from_static("x-inertia-partial-component");

/// Name of the error bag validation errors are nested under.
pub const X_INERTIA_ERROR_BAG: HeaderName = HeaderName::from_static("x-inertia-error-bag");

/// Target of a forced full-page visit.
pub const X_INERTIA_LOCATION: HeaderName = HeaderName::from_static("x-inertia-location");

/// Token header sent by axios from the `XSRF-TOKEN` cookie.
pub const X_XSRF_TOKEN: HeaderName = HeaderName::from_static("x-xsrf-token");

/// Cookie axios reads the token from.
pub const XSRF_COOKIE: &str = "XSRF-TOKEN";
