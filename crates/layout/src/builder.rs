//! Turns schema definitions into drawable element nodes.

use crate::elements::{
    CardNode, ContainerElement, ImageElement, SegmentDef, ShapeElement, TextElement,
};
use crate::schema::{ContainerDef, ElementDef, ImageDef, ShapeDef, TextDef};
use crate::template::FieldTemplates;
use crate::LayoutError;
use cardwright_style::TextStyle;

/// Builds the element tree once per schema.
///
/// Everything that can be checked without an entry is checked here: tag
/// data, override font sizes and, when a template registry is supplied,
/// placeholder syntax.
#[derive(Debug, Default)]
pub struct TreeBuilder<'a> {
    templates: Option<&'a FieldTemplates>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new() -> Self {
        Self { templates: None }
    }

    /// Also compiles every text and path template into `templates`.
    pub fn with_templates(templates: &'a FieldTemplates) -> Self {
        Self {
            templates: Some(templates),
        }
    }

    pub fn build(&self, def: &ElementDef) -> Result<CardNode, LayoutError> {
        let node = match def {
            ElementDef::Container(d) => CardNode::Container(self.build_container(d)?),
            ElementDef::Text(d) => CardNode::Text(self.build_text(d)?),
            ElementDef::Image(d) => CardNode::Image(self.build_image(d)?),
            ElementDef::Shape(d) => CardNode::Shape(self.build_shape(d)?),
        };
        Ok(node)
    }

    fn build_children(&self, defs: &[ElementDef]) -> Result<Vec<CardNode>, LayoutError> {
        defs.iter().map(|d| self.build(d)).collect()
    }

    fn precompile(&self, template: &str) -> Result<(), LayoutError> {
        match self.templates {
            Some(templates) => templates.precompile(template),
            None => Ok(()),
        }
    }

    fn build_container(&self, def: &ContainerDef) -> Result<ContainerElement, LayoutError> {
        let mut element = ContainerElement::new(def.frame.clone(), self.build_children(&def.children)?);
        element.repeat = def.repeat.clone();
        Ok(element)
    }

    fn build_text(&self, def: &TextDef) -> Result<TextElement, LayoutError> {
        let segments = match (&def.content, def.segments.is_empty()) {
            (Some(_), false) => {
                return Err(LayoutError::InvalidSchema(
                    "text element sets both `content` and `segments`".to_string(),
                ));
            }
            (Some(content), true) => vec![SegmentDef::new(content.clone(), def.tags.clone())],
            (None, _) => def.segments.clone(),
        };
        if segments.is_empty() {
            log::debug!("Text element without segments will draw nothing");
        }

        if let Some(size) = def.overrides.font_size
            && !(size.is_finite() && size > 0.0)
        {
            return Err(LayoutError::InvalidSchema(format!(
                "text font_size must be positive, got {}",
                size
            )));
        }

        let probe = TextStyle::default();
        for segment in &segments {
            probe.apply_tags(&segment.tags)?;
            self.precompile(&segment.content)?;
        }

        let mut element = TextElement::new(def.frame.clone(), segments);
        element.overrides = def.overrides.clone();
        element.text_alignment = def.text_alignment;
        element.line_alignment = def.line_alignment;
        element.spacing = def.spacing.max(0.0);
        element.children = self.build_children(&def.children)?;
        Ok(element)
    }

    fn build_image(&self, def: &ImageDef) -> Result<ImageElement, LayoutError> {
        if def.src.trim().is_empty() {
            return Err(LayoutError::InvalidSchema(
                "image element has an empty `src`".to_string(),
            ));
        }
        self.precompile(&def.src)?;

        let mut element = ImageElement::new(def.frame.clone(), def.src.clone());
        element.fit = def.fit;
        element.optional = def.optional;
        element.children = self.build_children(&def.children)?;
        Ok(element)
    }

    fn build_shape(&self, def: &ShapeDef) -> Result<ShapeElement, LayoutError> {
        if def.fill.is_none() && def.outline.is_none() {
            log::debug!("{:?} shape has neither fill nor outline", def.shape);
        }
        let mut element = ShapeElement::new(def.frame.clone(), def.shape);
        element.fill = def.fill;
        element.outline = def.outline;
        element.outline_width = def.outline_width.max(0.0);
        element.children = self.build_children(&def.children)?;
        Ok(element)
    }
}
