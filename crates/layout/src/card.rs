use crate::builder::TreeBuilder;
use crate::elements::{CardElement, CardNode, DrawContext};
use crate::environment::RenderEnvironment;
use crate::schema::Schema;
use crate::template::FieldTemplates;
use crate::LayoutError;
use cardwright_render_core::Canvas;
use cardwright_types::Entry;

/// A schema together with its built element tree, ready to render entries.
#[derive(Debug, Clone)]
pub struct CardLayout {
    schema: Schema,
    root: CardNode,
}

impl CardLayout {
    /// Validates `schema`, builds its tree and compiles every template into `templates`.
    pub fn new(schema: Schema, templates: &FieldTemplates) -> Result<Self, LayoutError> {
        schema.validate()?;
        let root = TreeBuilder::with_templates(templates).build(&schema.root)?;
        templates.precompile(&schema.output)?;
        log::debug!(
            "Built layout '{}' ({}x{}) with {} elements",
            schema.name,
            schema.width,
            schema.height,
            root.node_count()
        );
        Ok(Self { schema, root })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn root(&self) -> &CardNode {
        &self.root
    }

    /// Draws one card for `entry`.
    pub fn render(
        &self,
        entry: &Entry,
        index: usize,
        env: &RenderEnvironment,
    ) -> Result<Canvas, LayoutError> {
        let mut canvas =
            Canvas::try_new(self.schema.width, self.schema.height, &self.schema.background)?;
        let mut ctx = DrawContext::new(&mut canvas, entry, &self.schema, env, index);
        self.root.draw(&mut ctx, self.schema.card_area())?;
        Ok(canvas)
    }

    /// The output file name for `entry`, from the schema's `output` template.
    pub fn file_name(
        &self,
        entry: &Entry,
        index: usize,
        env: &RenderEnvironment,
    ) -> Result<String, LayoutError> {
        let name = env.templates.render(&self.schema.output, entry, index)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(LayoutError::Template {
                template: self.schema.output.clone(),
                message: format!("produced an empty file name for entry {}", index),
            });
        }
        Ok(name.to_string())
    }
}
