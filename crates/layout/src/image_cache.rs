use crate::cache::BoundedCache;
use crate::LayoutError;
use cardwright_traits::ResourceProvider;
use image::RgbaImage;
use std::sync::Arc;

/// Decoded artwork keyed by resource path.
#[derive(Debug)]
pub struct ImageCache {
    images: BoundedCache<String, Arc<RgbaImage>>,
}

impl ImageCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            images: BoundedCache::new(capacity),
        }
    }

    /// Loads and decodes `path` through `resources`, or returns the cached image.
    pub fn load(
        &self,
        path: &str,
        resources: &dyn ResourceProvider,
    ) -> Result<Arc<RgbaImage>, LayoutError> {
        self.images.get_or_try_insert(path.to_string(), || -> Result<_, LayoutError> {
            log::debug!("Decoding image '{}' via {}", path, resources.name());
            let bytes = resources.load(path)?;
            let decoded = image::load_from_memory(&bytes).map_err(|e| LayoutError::ImageDecode {
                src: path.to_string(),
                message: e.to_string(),
            })?;
            Ok(Arc::new(decoded.to_rgba8()))
        })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
