//! Session access.
//!
//! The adapter only ever reads from the session. Stores are shared by
//! reference (`Arc`) between the original and normalized request.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;

/// Read access to request-scoped session state.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
}

/// Request extension carrying the session, inserted by the host application.
#[derive(Clone)]
pub struct Session(pub Arc<dyn SessionStore>);

impl Session {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self(Arc::new(store))
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.get(key)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Session(..)")
    }
}

/// An in-memory session, useful for tests and the demo server.
#[derive(Debug, Default)]
pub struct MemorySession {
    values: RwLock<HashMap<String, Value>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: impl Into<String>, value: Value) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&self, key: impl Into<String>, value: Value) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.into(), value);
        }
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.values.write().ok()?.remove(key)
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.read().ok()?.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_session_get_set_remove() {
        let session = MemorySession::new().with("a", json!(1));
        assert_eq!(session.get("a"), Some(json!(1)));

        session.set("a", json!(2));
        assert_eq!(session.get("a"), Some(json!(2)));

        assert_eq!(session.remove("a"), Some(json!(2)));
        assert_eq!(session.get("a"), None);
    }

    #[test]
    fn test_session_handle_shares_store() {
        let store = Arc::new(MemorySession::new());
        let session = Session(store.clone());
        let copy = session.clone();

        store.set("token", json!("abc"));
        assert_eq!(copy.get("token"), Some(json!("abc")));
    }
}
