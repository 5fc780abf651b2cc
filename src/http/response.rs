//! Response handling and transformation.
//!
//! # Responsibilities
//! - Build the forced-visit response for stale asset versions
//! - Build redirect-back responses for empty Inertia results
//! - Compute absolute URLs for the current request
//!
//! # Design Decisions
//! - Forced visits answer 409 Conflict with `X-Inertia-Location` and no body;
//!   the client only honors the header on that status
//! - Redirect-back follows `Referer`, falling back to the site root

use axum::body::{Body, HttpBody};
use axum::http::header::{HOST, LOCATION, REFERER};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use url::Url;

use crate::http::headers::X_INERTIA_LOCATION;

/// Force the client to perform a full browser visit to `url`.
///
/// Outside an Inertia visit this is an ordinary 302 redirect.
pub fn location_response(url: &str, is_inertia: bool) -> Response {
    let Ok(value) = HeaderValue::from_str(url) else {
        tracing::warn!(url = %url, "Location is not a valid header value");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    if is_inertia {
        let mut response = StatusCode::CONFLICT.into_response();
        response.headers_mut().insert(X_INERTIA_LOCATION, value);
        response
    } else {
        redirect(StatusCode::FOUND, value)
    }
}

/// 302 back to the referring page, or `/` when there is none.
pub fn redirect_back(headers: &HeaderMap) -> Response {
    let target = headers
        .get(REFERER)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("/"));
    redirect(StatusCode::FOUND, target)
}

fn redirect(status: StatusCode, location: HeaderValue) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response.headers_mut().insert(LOCATION, location);
    response
}

/// True when the body is known to carry no bytes.
///
/// Streaming bodies of unknown length are treated as non-empty.
pub fn is_empty_body(body: &Body) -> bool {
    body.size_hint().exact() == Some(0)
}

/// Absolute URL of the request, including the query string.
///
/// `base_url` wins when configured and its path is kept as a prefix;
/// otherwise the URI authority or `Host` header is used with the URI scheme
/// (default `http`). The request path is appended verbatim, never resolved
/// as a relative reference.
pub fn absolute_url(parts: &Parts, base_url: Option<&Url>) -> String {
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    if let Some(base) = base_url {
        let mut url = base.clone();
        url.set_path(&format!(
            "{}{}",
            base.path().trim_end_matches('/'),
            parts.uri.path()
        ));
        url.set_query(parts.uri.query());
        url.set_fragment(None);
        return url.to_string();
    }

    let host = parts
        .uri
        .authority()
        .map(|a| a.as_str().to_string())
        .or_else(|| {
            parts
                .headers
                .get(HOST)
                .and_then(|h| h.to_str().ok())
                .map(str::to_string)
        });

    match host {
        Some(host) => {
            let scheme = parts.uri.scheme_str().unwrap_or("http");
            format!("{}://{}{}", scheme, host, path_and_query)
        }
        None => path_and_query.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(uri: &str, headers: &[(&'static str, &'static str)]) -> Parts {
        let mut builder = Request::builder().uri(uri);
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        builder.body(Body::empty()).unwrap().into_parts().0
    }

    #[test]
    fn test_location_response_for_inertia_visit() {
        let res = location_response("https://example.com/users", true);
        assert_eq!(res.status(), StatusCode::CONFLICT);
        assert_eq!(res.headers()["x-inertia-location"], "https://example.com/users");
        assert!(is_empty_body(res.body()));
    }

    #[test]
    fn test_location_response_for_plain_visit() {
        let res = location_response("/login", false);
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers()["location"], "/login");
    }

    #[test]
    fn test_redirect_back_uses_referer() {
        let res = redirect_back(&parts("/users", &[("Referer", "http://site.test/users/1/edit")]).headers);
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers()["location"], "http://site.test/users/1/edit");

        let res = redirect_back(&parts("/users", &[]).headers);
        assert_eq!(res.headers()["location"], "/");
    }

    #[test]
    fn test_empty_body_detection() {
        assert!(is_empty_body(&Body::empty()));
        assert!(is_empty_body(&Body::from("")));
        assert!(!is_empty_body(&Body::from("ok")));
    }

    #[test]
    fn test_absolute_url_sources() {
        let p = parts("/users?page=2", &[("Host", "site.test:8080")]);
        assert_eq!(absolute_url(&p, None), "http://site.test:8080/users?page=2");

        let base = Url::parse("https://example.com/app/").unwrap();
        assert_eq!(absolute_url(&p, Some(&base)), "https://example.com/app/users?page=2");

        let p = parts("https://other.test/x", &[]);
        assert_eq!(absolute_url(&p, None), "https://other.test/x");
    }

    #[test]
    fn test_absolute_url_keeps_colon_segments_on_base_host() {
        let base = Url::parse("https://example.com").unwrap();

        let p = parts("/files:export?x=1", &[]);
        assert_eq!(absolute_url(&p, Some(&base)), "https://example.com/files:export?x=1");

        let p = parts("/https://evil.test/x", &[]);
        let url = absolute_url(&p, Some(&base));
        assert_eq!(url, "https://example.com/https://evil.test/x");
        assert_eq!(Url::parse(&url).unwrap().host_str(), Some("example.com"));
    }

    #[test]
    fn test_absolute_url_base_without_trailing_slash() {
        let base = Url::parse("https://example.com/app").unwrap();
        let p = parts("/users", &[]);
        assert_eq!(absolute_url(&p, Some(&base)), "https://example.com/app/users");

        let p = parts("/", &[]);
        assert_eq!(absolute_url(&p, Some(&base)), "https://example.com/app/");
    }
}
