//! Asset versioning subsystem.
//!
//! # Data Flow
//! ```text
//! assets.app_bundle_resource ("app: client/dist/app.js")
//!     → resolver.rs (logical identifier → file path)
//!     → version.rs (file mtime → version string)
//!     → compared against X-Inertia-Version by the middleware
//! ```

pub mod resolver;
pub mod version;

pub use resolver::{FsResourceResolver, ResourceResolver};
pub use version::VersionResolver;
