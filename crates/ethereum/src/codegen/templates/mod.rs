//! Template system for event binding generation
//!
//! Wraps Handlebars with the built-in bindings template, optional user
//! templates and the case-conversion helpers templates can use.

use std::path::Path;

use convert_case::{Case, Casing};
use eventgen_common::{Error, Result};
use handlebars::{handlebars_helper, Handlebars};

use super::model::GenerationModel;

/// Name of the built-in template
pub const DEFAULT_TEMPLATE: &str = "events";

/// Name a user-supplied template is registered under
pub const CUSTOM_TEMPLATE: &str = "custom";

handlebars_helper!(snake: |s: str| s.to_case(Case::Snake));
handlebars_helper!(pascal: |s: str| s.to_case(Case::Pascal));
handlebars_helper!(screaming: |s: str| s.to_case(Case::ScreamingSnake));

/// Template manager for event binding generation
pub struct TemplateManager {
    handlebars: Handlebars<'static>,
}

impl TemplateManager {
    /// Create a new template manager with the built-in template registered
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Generated source, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        handlebars.register_helper("snake", Box::new(snake));
        handlebars.register_helper("pascal", Box::new(pascal));
        handlebars.register_helper("screaming", Box::new(screaming));

        handlebars
            .register_template_string(DEFAULT_TEMPLATE, include_str!("events.hbs"))
            .map_err(|e| {
                Error::template(format!("Failed to register {} template: {}", DEFAULT_TEMPLATE, e))
            })?;

        Ok(Self { handlebars })
    }

    /// Create a template manager that also knows the template at `path`
    pub fn with_template_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read template {}: {}", path.display(), e))
        })?;

        let mut manager = Self::new()?;
        manager.register_template(CUSTOM_TEMPLATE, &content)?;
        Ok(manager)
    }

    /// Register (or replace) a template from source
    pub fn register_template(&mut self, name: &str, content: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, content)
            .map_err(|e| Error::template(format!("Failed to register {} template: {}", name, e)))
    }

    /// Render a template with the given model
    pub fn render(&self, template_name: &str, model: &GenerationModel) -> Result<String> {
        self.handlebars
            .render(template_name, model)
            .map_err(|e| {
                Error::template(format!("Failed to render template {}: {}", template_name, e))
            })
    }

    /// Whether a template is registered under `name`
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}

/// Strip trailing whitespace, collapse runs of blank lines and end with a
/// single newline
pub fn tidy(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut blank_run = 0;

    for line in source.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 || out.is_empty() {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }

    while out.ends_with("\n\n") {
        out.pop();
    }
    if out.is_empty() {
        return out;
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
