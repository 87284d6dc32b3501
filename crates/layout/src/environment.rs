use crate::config::LayoutConfig;
use crate::image_cache::ImageCache;
use crate::template::FieldTemplates;
use crate::text::TextBackend;
use cardwright_traits::ResourceProvider;
use std::sync::Arc;

/// Shared services used while drawing cards.
///
/// One environment serves every card of a run and may be used from several
/// render threads at once.
pub struct RenderEnvironment {
    pub text: Arc<dyn TextBackend>,
    pub resources: Arc<dyn ResourceProvider>,
    pub images: ImageCache,
    pub templates: FieldTemplates,
    pub config: LayoutConfig,
}

impl RenderEnvironment {
    pub fn new(
        text: Arc<dyn TextBackend>,
        resources: Arc<dyn ResourceProvider>,
        config: LayoutConfig,
    ) -> Self {
        Self {
            images: ImageCache::new(config.cache_capacity),
            templates: FieldTemplates::new(),
            text,
            resources,
            config,
        }
    }
}

impl std::fmt::Debug for RenderEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderEnvironment")
            .field("text", &self.text.name())
            .field("resources", &self.resources.name())
            .field("images", &self.images.len())
            .field("config", &self.config)
            .finish()
    }
}
