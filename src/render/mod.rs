//! Full page rendering for non-Inertia visits.
//!
//! # Responsibilities
//! - Render the root template around the serialized page
//! - Provide the `<div id="app" data-page>` mount element
//!
//! # Design Decisions
//! - Template engines sit behind `TemplateRenderer` so hosts can bring
//!   their own; handlebars is the default
//! - Variables are a flat JSON object: caller view data plus `page` and
//!   `pageJson`

pub mod app;
pub mod hbs;

use serde_json::{Map, Value};

use crate::error::InertiaError;

pub use app::render_app;
pub use hbs::{HandlebarsRenderer, DEFAULT_ROOT_TEMPLATE};

/// Renders a named template with a variable mapping to HTML.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, vars: &Map<String, Value>) -> Result<String, InertiaError>;
}
