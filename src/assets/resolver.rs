//! Logical resource identifiers to filesystem paths.

use std::path::{Path, PathBuf};

/// Maps a logical asset identifier to an absolute file path.
pub trait ResourceResolver: Send + Sync {
    /// Returns `None` when the identifier cannot be mapped.
    fn resolve(&self, resource: &str) -> Option<PathBuf>;
}

/// Resolves identifiers against a root directory.
///
/// Accepts `"module: relative/path"` (module directory, then path) or a
/// plain relative path. Absolute paths are returned unchanged.
#[derive(Debug, Clone)]
pub struct FsResourceResolver {
    root: PathBuf,
}

impl FsResourceResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceResolver for FsResourceResolver {
    fn resolve(&self, resource: &str) -> Option<PathBuf> {
        let resource = resource.trim();
        if resource.is_empty() {
            return None;
        }

        let relative = match resource.split_once(':') {
            Some((module, path)) => {
                let (module, path) = (module.trim(), path.trim().trim_start_matches('/'));
                if module.is_empty() || path.is_empty() {
                    return None;
                }
                Path::new(module).join(path)
            }
            None => PathBuf::from(resource),
        };

        if relative.is_absolute() {
            Some(relative)
        } else {
            Some(self.root.join(relative))
        }
    }
}
