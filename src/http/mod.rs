//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Request
//!     → signals.rs (X-Inertia*, partial reload, error bag)
//!     → middleware.rs (context, XSRF bridge)
//!     → request.rs (normalize Inertia bodies)
//!     → application handler
//!     → response.rs (forced visit, redirect back, 303)
//!     → Send to client
//! ```

pub mod headers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;
pub mod signals;

pub use middleware::{inertia_middleware, InertiaState, InertiaStateBuilder};
pub use request::BodyParams;
pub use server::HttpServer;
pub use signals::NegotiationSignals;
