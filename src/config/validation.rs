//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (body limit > 0)
//! - Check addresses and URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: InertiaConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::InertiaConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &InertiaConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "server.bind_address",
            message: format!("`{}` is not a socket address", config.server.bind_address),
        });
    }

    if let Some(base) = &config.server.base_url {
        match url::Url::parse(base) {
            Ok(url) if url.cannot_be_a_base() => errors.push(ValidationError {
                field: "server.base_url",
                message: format!("`{}` cannot be used as a base URL", base),
            }),
            Ok(_) => {}
            Err(e) => errors.push(ValidationError {
                field: "server.base_url",
                message: format!("`{}` is not a URL: {}", base, e),
            }),
        }
    }

    if matches!(&config.assets.app_bundle_resource, Some(r) if r.trim().is_empty()) {
        errors.push(ValidationError {
            field: "assets.app_bundle_resource",
            message: "must not be empty when set".to_string(),
        });
    }

    if config.views.root_template.is_empty() {
        errors.push(ValidationError {
            field: "views.root_template",
            message: "must not be empty".to_string(),
        });
    }

    if config.security.xsrf_enabled && config.security.token_name.is_empty() {
        errors.push(ValidationError {
            field: "security.token_name",
            message: "must not be empty when xsrf is enabled".to_string(),
        });
    }

    if config.request.max_body_bytes == 0 {
        errors.push(ValidationError {
            field: "request.max_body_bytes",
            message: "must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
