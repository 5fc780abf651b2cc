//! The page object exchanged with the Inertia client.
//!
//! Wire format: `{"component": string, "props": object, "url": string, "version": string|number}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Asset version as it appears on the wire.
///
/// An unversioned application sends the number `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageVersion {
    Tag(String),
    Number(u64),
}

impl PageVersion {
    pub fn from_option(version: Option<&str>) -> Self {
        match version {
            Some(v) if !v.is_empty() => PageVersion::Tag(v.to_string()),
            _ => PageVersion::Number(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub component: String,
    pub props: Map<String, Value>,
    pub url: String,
    pub version: PageVersion,
}

impl Page {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
