//! Security token subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → xsrf.rs (X-XSRF-TOKEN → X-<token name>)
//!     → host token check (downstream)
//! Outgoing response:
//!     → token.rs (current token value)
//!     → xsrf.rs (Set-Cookie: XSRF-TOKEN, not HttpOnly)
//! ```

pub mod token;
pub mod xsrf;

pub use token::{NoToken, SecurityToken, SessionToken};
pub use xsrf::{copy_xsrf_header, set_xsrf_cookie};
