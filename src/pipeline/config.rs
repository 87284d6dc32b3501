pub use cardwright_layout::LayoutConfig;

fn default_batch_size() -> usize {
    num_cpus::get().max(1) * 8
}

/// Settings for a [`CardPipeline`](super::CardPipeline) run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Render cards of a batch on the rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Stop at the first failed card instead of logging it and moving on.
    pub fail_fast: bool,
    /// How many entries `generate` pulls from the source before rendering them.
    ///
    /// Defaults to eight per CPU.
    pub batch_size: usize,
    pub layout: LayoutConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            fail_fast: false,
            batch_size: default_batch_size(),
            layout: LayoutConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }
}
