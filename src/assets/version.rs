//! Asset version resolution.
//!
//! # Responsibilities
//! - Resolve the configured bundle identifier to a file
//! - Use the file's modification time as the version string
//!
//! # Design Decisions
//! - Recomputed on every request so a rebuilt bundle is picked up without
//!   restarting the process
//! - A missing identifier or file disables versioning (`None`); it is never
//!   an error

use std::sync::Arc;
use std::time::UNIX_EPOCH;

use crate::assets::resolver::ResourceResolver;

/// Computes the server-side asset version for the current request.
#[derive(Clone)]
pub struct VersionResolver {
    resolver: Arc<dyn ResourceResolver>,
    resource: Option<String>,
}

impl VersionResolver {
    pub fn new(resolver: Arc<dyn ResourceResolver>, resource: Option<String>) -> Self {
        Self { resolver, resource }
    }

    /// A resolver that never produces a version.
    pub fn disabled(resolver: Arc<dyn ResourceResolver>) -> Self {
        Self::new(resolver, None)
    }

    /// Seconds since the Unix epoch at which the bundle was last modified.
    pub async fn resolve_version(&self) -> Option<String> {
        let resource = self.resource.as_deref()?;
        let path = self.resolver.resolve(resource)?;

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(m) if m.is_file() => m,
            Ok(_) => return None,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Asset bundle not found; versioning disabled");
                return None;
            }
        };

        let modified = metadata.modified().ok()?;
        let secs = modified.duration_since(UNIX_EPOCH).ok()?.as_secs();
        Some(secs.to_string())
    }
}

impl std::fmt::Debug for VersionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionResolver")
            .field("resource", &self.resource)
            .finish()
    }
}
