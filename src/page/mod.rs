//! Page envelope subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → Inertia::render(component)   (seeded with shared props)
//!     → InertiaResponse::with(..)    (page props, view data)
//!     → build_envelope               (partial filter → resolve → Page → JSON)
//!     → JSON body (Inertia visit) or root template (first load)
//! ```

pub mod object;
pub mod props;
pub mod response;

pub use object::{Page, PageVersion};
pub use props::{Prop, Props, Record};
pub use response::{build_envelope, InertiaResponse};
