//! Templating collaborator

use handlebars::Handlebars;
use serde_json::Value;
use std::path::Path;
use toolbar_types::{Result, ToolbarError};
use tracing::debug;

/// Name under which the toolbar view is registered
pub const TOOLBAR_TEMPLATE: &str = "toolbar";

const TOOLBAR_SOURCE: &str = include_str!("../templates/toolbar.hbs");

/// Renders a named view with bound data
///
/// Implementations must not escape bound values; every string in a
/// snapshot is already escaped at build time.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, name: &str, data: &Value) -> Result<String>;
}

/// [`TemplateRenderer`] backed by handlebars
///
/// The toolbar view is embedded in the binary. A view directory holding a
/// `toolbar.hbs` replaces it.
#[derive(Debug)]
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    /// Renderer with the embedded toolbar view
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(TOOLBAR_TEMPLATE, TOOLBAR_SOURCE)
            .map_err(|e| ToolbarError::Template(e.to_string()))?;
        Ok(Self { registry })
    }

    /// Renderer whose views come from `view_path` where present
    pub fn with_view_path(view_path: &Path) -> Result<Self> {
        let mut renderer = Self::new()?;
        let override_path = view_path.join(format!("{}.hbs", TOOLBAR_TEMPLATE));
        if override_path.is_file() {
            renderer
                .registry
                .register_template_file(TOOLBAR_TEMPLATE, &override_path)
                .map_err(|e| {
                    ToolbarError::Template(format!("{}: {}", override_path.display(), e))
                })?;
            debug!("Using toolbar view from {}", override_path.display());
        }
        Ok(renderer)
    }

    /// Register an extra view under `name`
    pub fn register(&mut self, name: &str, source: &str) -> Result<()> {
        self.registry
            .register_template_string(name, source)
            .map_err(|e| ToolbarError::Template(e.to_string()))
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, name: &str, data: &Value) -> Result<String> {
        self.registry
            .render(name, data)
            .map_err(|e| ToolbarError::Template(format!("{}: {}", name, e)))
    }
}
