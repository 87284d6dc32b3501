//! Card generation pipeline.
//!
//! - [`PipelineBuilder`]: collects the schema, fonts, resources and executor
//! - [`CardPipeline`]: renders entries into [`RenderedCard`]s
//! - [`DirectorySink`] / [`MemorySink`]: where finished cards go
//!
//! # Example
//!
//! ```ignore
//! use cardwright::{DirectorySink, JsonArraySource, PipelineBuilder};
//!
//! let pipeline = PipelineBuilder::new()
//!     .with_schema_file("cards/schema.json")?
//!     .with_font_dir("cards/fonts")
//!     .build()?;
//!
//! let mut source = JsonArraySource::from_path("cards/monsters.json")?;
//! let mut sink = DirectorySink::new("out")?;
//! let report = pipeline.generate(&mut source, &mut sink)?;
//! ```

mod builder;
pub mod config;
mod sink;

pub use builder::PipelineBuilder;
pub use config::PipelineConfig;
pub use sink::{DirectorySink, MemorySink};

use crate::error::PipelineError;
use cardwright_executor::{Executor, ExecutorImpl};
use cardwright_layout::{CardLayout, RenderEnvironment};
use cardwright_render_core::{CardSink, RenderedCard};
use cardwright_source::EntrySource;
use cardwright_types::Entry;
use std::sync::Arc;
use std::time::Instant;

/// What shared state every render task needs.
#[derive(Debug)]
struct PipelineContext {
    layout: CardLayout,
    env: RenderEnvironment,
}

impl PipelineContext {
    fn render(&self, entry: &Entry, index: usize) -> Result<RenderedCard, PipelineError> {
        let canvas = self.layout.render(entry, index, &self.env)?;
        let file_name = self.layout.file_name(entry, index, &self.env)?;
        Ok(RenderedCard::new(index, file_name, canvas.into_image()))
    }
}

/// One card that could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFailure {
    pub index: usize,
    pub message: String,
}

/// Outcome of [`CardPipeline::generate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub rendered: usize,
    pub failures: Vec<CardFailure>,
}

impl GenerationReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.rendered + self.failed()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Renders entries with one schema.
#[derive(Debug)]
pub struct CardPipeline {
    context: Arc<PipelineContext>,
    executor: ExecutorImpl,
    config: PipelineConfig,
}

impl CardPipeline {
    pub(crate) fn new(
        layout: CardLayout,
        env: RenderEnvironment,
        executor: ExecutorImpl,
        config: PipelineConfig,
    ) -> Self {
        Self {
            context: Arc::new(PipelineContext { layout, env }),
            executor,
            config,
        }
    }

    pub fn layout(&self) -> &CardLayout {
        &self.context.layout
    }

    pub fn environment(&self) -> &RenderEnvironment {
        &self.context.env
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn executor_name(&self) -> &'static str {
        self.executor.name()
    }

    /// Renders a single card on the calling thread.
    pub fn render_entry(&self, entry: &Entry, index: usize) -> Result<RenderedCard, PipelineError> {
        self.context.render(entry, index)
    }

    /// Renders every entry, numbering them from zero. Results keep entry order.
    pub fn render_all(&self, entries: Vec<Entry>) -> Vec<Result<RenderedCard, PipelineError>> {
        self.render_batch(entries.into_iter().enumerate().collect())
    }

    fn render_batch(
        &self,
        batch: Vec<(usize, Entry)>,
    ) -> Vec<Result<RenderedCard, PipelineError>> {
        let context = Arc::clone(&self.context);
        self.executor
            .execute_all_fallible(batch, move |(index, entry)| context.render(&entry, index))
    }

    /// Streams `source` through the renderer into `sink`.
    ///
    /// Entries are rendered in batches. A card that fails, or an entry the
    /// source cannot read, is logged and counted in the report; with
    /// `fail_fast` the first such failure is returned instead. Sink errors
    /// always abort the run.
    pub fn generate<S>(
        &self,
        source: &mut S,
        sink: &mut dyn CardSink,
    ) -> Result<GenerationReport, PipelineError>
    where
        S: EntrySource + ?Sized,
    {
        let start = Instant::now();
        let batch_size = self.config.batch_size.max(1);
        log::info!(
            "Generating cards for '{}' with {} (batch size {}{})",
            self.layout().schema().name,
            self.executor.name(),
            batch_size,
            source
                .size_hint()
                .map(|n| format!(", {} entries", n))
                .unwrap_or_default()
        );

        let mut report = GenerationReport::default();
        let mut next_index = 0;
        let mut exhausted = false;

        while !exhausted {
            let mut batch = Vec::with_capacity(batch_size);
            while batch.len() < batch_size {
                let Some(item) = source.next() else {
                    exhausted = true;
                    break;
                };
                let index = next_index;
                next_index += 1;
                match item {
                    Ok(entry) => batch.push((index, entry)),
                    Err(e) => {
                        if self.config.fail_fast {
                            return Err(e.into());
                        }
                        log::error!("Skipping entry {}: {}", index, e);
                        report.failures.push(CardFailure {
                            index,
                            message: e.to_string(),
                        });
                    }
                }
            }
            if batch.is_empty() {
                continue;
            }

            log::debug!("Rendering batch of {} cards", batch.len());
            let indices: Vec<usize> = batch.iter().map(|(i, _)| *i).collect();
            for (index, result) in indices.into_iter().zip(self.render_batch(batch)) {
                match result {
                    Ok(card) => {
                        sink.accept(card)?;
                        report.rendered += 1;
                    }
                    Err(e) if self.config.fail_fast => {
                        return Err(PipelineError::Card {
                            index,
                            message: e.to_string(),
                        });
                    }
                    Err(e) => {
                        log::error!("Card {} failed: {}", index, e);
                        report.failures.push(CardFailure {
                            index,
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        sink.finish()?;
        report.failures.sort_by_key(|f| f.index);
        log::info!(
            "Rendered {} of {} cards in {:.2?}",
            report.rendered,
            report.total(),
            start.elapsed()
        );
        Ok(report)
    }
}
