//! Observability subsystem.
//!
//! Negotiation decisions are logged at `debug`, ignored malformed bodies at
//! `warn`, and responses that fail to serialize or render at `error`.

pub mod logging;

pub use logging::init_logging;
