//! Handlebars-backed root template rendering.

use std::fs;
use std::path::Path;

use handlebars::{handlebars_helper, Handlebars};
use serde_json::{Map, Value};

use crate::error::InertiaError;
use crate::render::app::render_app;
use crate::render::TemplateRenderer;

/// Root template registered under `app` unless the host provides its own.
pub const DEFAULT_ROOT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{{#if title}}{{title}}{{else}}App{{/if}}</title>
</head>
<body>
    {{{inertia pageJson}}}
</body>
</html>
"#;

handlebars_helper!(inertia_helper: |page_json: str| render_app(page_json));

/// Template renderer on a handlebars registry.
///
/// Registers the `inertia` helper; use it triple-stashed so the already
/// escaped markup is not escaped again: `{{{inertia pageJson}}}`.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_helper("inertia", Box::new(inertia_helper));
        Self { registry }
    }

    /// A renderer with `DEFAULT_ROOT_TEMPLATE` registered as `app`.
    pub fn with_default_template() -> Self {
        let mut renderer = Self::new();
        renderer
            .registry
            .register_template_string("app", DEFAULT_ROOT_TEMPLATE)
            .expect("default root template parses");
        renderer
    }

    /// Register a template by name.
    pub fn register_template(&mut self, name: &str, source: &str) -> Result<(), InertiaError> {
        self.registry
            .register_template_string(name, source)
            .map_err(|e| InertiaError::Template(format!("{}: {}", name, e)))
    }

    /// Register every `*.hbs` file in `dir`, named by file stem.
    pub fn register_dir(&mut self, dir: &Path) -> Result<usize, InertiaError> {
        let entries = fs::read_dir(dir)
            .map_err(|e| InertiaError::Template(format!("{}: {}", dir.display(), e)))?;

        let mut count = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("hbs") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let source = fs::read_to_string(&path)
                .map_err(|e| InertiaError::Template(format!("{}: {}", path.display(), e)))?;
            self.register_template(name, &source)?;
            tracing::debug!(template = %name, path = %path.display(), "Registered template");
            count += 1;
        }
        Ok(count)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::with_default_template()
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, template: &str, vars: &Map<String, Value>) -> Result<String, InertiaError> {
        self.registry
            .render(template, vars)
            .map_err(|e| InertiaError::Render {
                template: template.to_string(),
                message: e.to_string(),
            })
    }
}
