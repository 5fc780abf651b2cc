//! Session collaborators.
//!
//! Session storage itself belongs to the host application; this module only
//! defines the read interface the adapter needs and the `errors` shared prop
//! derived from it.

pub mod errors;
pub mod store;

pub use errors::resolve_validation_errors;
pub use store::{MemorySession, Session, SessionStore};
