//! XSRF token bridging between axios and the host's token check.
//!
//! axios reads the `XSRF-TOKEN` cookie and echoes it as `X-XSRF-TOKEN`; the
//! host expects `X-<token name>`. The middleware copies the header inbound
//! and refreshes the cookie outbound.

use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum_extra::extract::cookie::Cookie;

use crate::http::headers::{XSRF_COOKIE, X_XSRF_TOKEN};

/// Copy `X-XSRF-TOKEN` into `X-<token_name>`. Returns whether a copy happened.
pub fn copy_xsrf_header(headers: &mut HeaderMap, token_name: &str) -> bool {
    let Some(value) = headers.get(X_XSRF_TOKEN).filter(|v| !v.is_empty()).cloned() else {
        return false;
    };
    match HeaderName::try_from(format!("x-{}", token_name)) {
        Ok(name) => {
            headers.insert(name, value);
            true
        }
        Err(e) => {
            tracing::warn!(token_name = %token_name, error = %e, "Token name is not a valid header name");
            false
        }
    }
}

/// Append a script-readable `XSRF-TOKEN` cookie to the response headers.
pub fn set_xsrf_cookie(headers: &mut HeaderMap, token: &str, path: &str) {
    let cookie = Cookie::build((XSRF_COOKIE, token.to_string()))
        .path(path.to_string())
        .http_only(false)
        .build();

    match HeaderValue::from_str(&cookie.to_string()) {
        Ok(value) => {
            headers.append(SET_COOKIE, value);
        }
        Err(e) => tracing::warn!(error = %e, "XSRF cookie is not a valid header value"),
    }
}
