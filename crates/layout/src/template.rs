//! `{{field}}` substitution for text content, image paths and file names.

use crate::LayoutError;
use cardwright_types::Entry;
use handlebars::Handlebars;
use serde_json::{Map, Value};
use std::sync::RwLock;

/// Handlebars registry shared by every card of a run.
///
/// Strict mode is on, so a placeholder naming a field the entry lacks is an
/// error rather than an empty string. Output is never HTML-escaped. Each
/// distinct template is compiled once, the first time it is rendered.
#[derive(Debug)]
pub struct FieldTemplates {
    registry: RwLock<Handlebars<'static>>,
}

impl Default for FieldTemplates {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldTemplates {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        Self {
            registry: RwLock::new(registry),
        }
    }

    /// Whether `template` contains placeholders at all.
    pub fn is_template(template: &str) -> bool {
        template.contains("{{")
    }

    /// Compiles `template` now so syntax errors surface before any card is drawn.
    pub fn precompile(&self, template: &str) -> Result<(), LayoutError> {
        if !Self::is_template(template) {
            return Ok(());
        }
        if self
            .registry
            .read()
            .map(|r| r.has_template(template))
            .unwrap_or(false)
        {
            return Ok(());
        }
        let mut registry = self.registry.write().map_err(|_| LayoutError::Template {
            template: template.to_string(),
            message: "template registry lock poisoned".to_string(),
        })?;
        registry
            .register_template_string(template, template)
            .map_err(|e| LayoutError::Template {
                template: template.to_string(),
                message: e.to_string(),
            })
    }

    /// Renders `template` for `entry`; `{{index}}` is the entry's position
    /// unless the entry has its own `index` field.
    pub fn render(&self, template: &str, entry: &Entry, index: usize) -> Result<String, LayoutError> {
        self.render_scoped(template, entry, index, None)
    }

    /// Like [`FieldTemplates::render`], also exposing `{{repeat}}` inside a
    /// repeated container.
    pub fn render_scoped(
        &self,
        template: &str,
        entry: &Entry,
        index: usize,
        repeat: Option<usize>,
    ) -> Result<String, LayoutError> {
        if !Self::is_template(template) {
            return Ok(template.to_string());
        }
        self.precompile(template)?;

        let mut context = Map::new();
        context.insert("index".to_string(), Value::from(index));
        if let Some(r) = repeat {
            context.insert("repeat".to_string(), Value::from(r));
        }
        for (field, value) in entry.iter() {
            context.insert(field.to_string(), Value::String(value.to_string()));
        }

        let registry = self.registry.read().map_err(|_| LayoutError::Template {
            template: template.to_string(),
            message: "template registry lock poisoned".to_string(),
        })?;
        registry
            .render(template, &Value::Object(context))
            .map_err(|e| LayoutError::Template {
                template: template.to_string(),
                message: e.to_string(),
            })
    }
}
