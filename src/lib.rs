//! Inertia.js server-side adapter for axum.
//!
//! Controllers answer with an [`InertiaResponse`]; the middleware decides
//! whether the client gets a full HTML page embedding the page object or
//! just the page JSON, and applies the protocol's header and status rules.

pub mod assets;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod observability;
pub mod page;
pub mod render;
pub mod security;
pub mod session;

pub use config::InertiaConfig;
pub use context::{Inertia, InertiaContext, RequestInfo};
pub use error::InertiaError;
pub use http::{BodyParams, HttpServer, InertiaState};
pub use page::{InertiaResponse, Page, PageVersion, Prop, Props, Record};
pub use session::{MemorySession, Session, SessionStore};
