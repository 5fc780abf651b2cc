//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the adapter
//! and its demo server. All types derive Serde traits for deserialization
//! from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the Inertia adapter.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct InertiaConfig {
    /// Listener and public URL settings.
    pub server: ServerConfig,

    /// Asset versioning.
    pub assets: AssetConfig,

    /// Root template selection.
    pub views: ViewConfig,

    /// XSRF token bridging.
    pub security: SecurityConfig,

    /// Request normalization limits.
    pub request: RequestConfig,

    /// Session keys read by the shared `errors` prop.
    pub session: SessionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Public base URL used to build absolute URLs (e.g., "https://example.com").
    /// When unset, the request's `Host` header is used.
    pub base_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            base_url: None,
        }
    }
}

/// Asset version configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AssetConfig {
    /// Logical identifier of the client bundle, e.g. `"app: client/dist/app.js"`.
    /// When unset, versioning is disabled.
    pub app_bundle_resource: Option<String>,

    /// Directory logical identifiers are resolved against.
    pub resource_root: String,
}

/// Root template configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Template rendered for full page loads when a response names none.
    pub root_template: String,

    /// Directory of `*.hbs` templates registered at startup.
    pub template_dir: Option<String>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            root_template: "app".to_string(),
            template_dir: None,
        }
    }
}

/// XSRF token configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable the security token mechanism.
    pub xsrf_enabled: bool,

    /// Token name; the request header checked downstream is `X-<token_name>`.
    pub token_name: String,

    /// Session key the token value is stored under.
    pub token_session_key: String,

    /// Path attribute of the `XSRF-TOKEN` cookie.
    pub cookie_path: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            xsrf_enabled: false,
            token_name: "SecurityID".to_string(),
            token_session_key: "SecurityID".to_string(),
            cookie_path: "/".to_string(),
        }
    }
}

/// Request normalization configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Maximum body size buffered when normalizing Inertia requests.
    pub max_body_bytes: usize,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session key holding per-form validation results.
    pub form_info_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            form_info_key: "FormInfo".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
