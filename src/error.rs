//! Error types surfaced by the adapter.
//!
//! Absent headers and unparsable JSON bodies never reach this type; they
//! degrade to "feature not requested". What remains is either a programming
//! error (layer not installed) or data that cannot leave the process as JSON.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors produced while building or negotiating an Inertia response.
#[derive(Debug, Error)]
pub enum InertiaError {
    #[error("Page serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template `{template}` failed to render: {message}")]
    Render { template: String, message: String },

    #[error("Template registration failed: {0}")]
    Template(String),

    #[error("Request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    #[error("Inertia context missing from request; is the middleware installed?")]
    MissingContext,
}

impl InertiaError {
    /// Status code used when the error reaches the client.
    pub fn status(&self) -> StatusCode {
        match self {
            InertiaError::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            InertiaError::BodyRead(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for InertiaError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Inertia response failed");
        } else {
            tracing::warn!(error = %self, "Rejected request");
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            InertiaError::BodyTooLarge { limit: 10 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            InertiaError::BodyRead("reset".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            InertiaError::MissingContext.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_into_response_uses_status() {
        let res = InertiaError::MissingContext.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
