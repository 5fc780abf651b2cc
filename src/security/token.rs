//! Security token providers.

use crate::context::RequestInfo;

/// Double-submit security token mechanism used by the host application.
pub trait SecurityToken: Send + Sync {
    fn is_enabled(&self) -> bool;

    /// Token name; the downstream check reads header `X-<name>`.
    fn name(&self) -> &str;

    /// Current token value for the request, if one exists.
    fn value(&self, request: &RequestInfo) -> Option<String>;
}

/// Token stored in the session under a fixed key.
#[derive(Debug, Clone)]
pub struct SessionToken {
    enabled: bool,
    name: String,
    session_key: String,
}

impl SessionToken {
    pub fn new(enabled: bool, name: impl Into<String>, session_key: impl Into<String>) -> Self {
        Self {
            enabled,
            name: name.into(),
            session_key: session_key.into(),
        }
    }
}

impl SecurityToken for SessionToken {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self, request: &RequestInfo) -> Option<String> {
        let value = request.session.as_ref()?.get(&self.session_key)?;
        value.as_str().map(str::to_string)
    }
}

/// No token mechanism.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl SecurityToken for NoToken {
    fn is_enabled(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        ""
    }

    fn value(&self, _request: &RequestInfo) -> Option<String> {
        None
    }
}
