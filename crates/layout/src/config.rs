use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// The maximum number of entries each layout cache (text measurements,
    /// decoded images) holds before it is reset.
    ///
    /// - **Higher values**: fewer re-measurements of repeated text, higher memory usage.
    /// - **Lower values**: lower memory usage, more shaping work per card.
    ///
    /// Defaults to `10000`.
    pub cache_capacity: usize,

    /// Upper bound for a repeated container's count. Larger counts, most
    /// likely bad entry data, fail the card.
    ///
    /// Defaults to `1000`.
    pub max_repeat: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 10000,
            max_repeat: 1000,
        }
    }
}

impl LayoutConfig {
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_max_repeat(mut self, max_repeat: usize) -> Self {
        self.max_repeat = max_repeat;
        self
    }
}
