use super::config::PipelineConfig;
use super::CardPipeline;
use crate::error::PipelineError;
use cardwright_executor::{Executor, ExecutorImpl};
use cardwright_layout::{
    CardLayout, FontRasterizer, LayoutConfig, RenderEnvironment, Schema, SharedFontLibrary,
    TextBackend,
};
use cardwright_resource::FilesystemResourceProvider;
use cardwright_traits::ResourceProvider;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A builder for creating a [`CardPipeline`].
pub struct PipelineBuilder {
    schema: Option<Schema>,
    resource_base: Option<PathBuf>,
    resources: Option<Arc<dyn ResourceProvider>>,
    text_backend: Option<Arc<dyn TextBackend>>,
    font_library: SharedFontLibrary,
    executor: Option<ExecutorImpl>,
    config: PipelineConfig,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self {
            schema: None,
            resource_base: None,
            resources: None,
            text_backend: None,
            font_library: SharedFontLibrary::new(),
            executor: None,
            config: PipelineConfig::default(),
        }
    }
}

impl std::fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("schema", &self.schema.as_ref().map(|s| s.name.as_str()))
            .field("resource_base", &self.resource_base)
            .field("resources", &self.resources.as_ref().map(|r| r.name()))
            .field("text_backend", &self.text_backend.as_ref().map(|t| t.name()))
            .field("executor", &self.executor)
            .field("config", &self.config)
            .finish()
    }
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Loads the schema from a JSON file. Relative resource paths (fonts,
    /// images) resolve against the file's directory.
    pub fn with_schema_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        let path_ref = path.as_ref();
        let source = fs::read_to_string(path_ref).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read schema from '{}': {}", path_ref.display(), e),
            ))
        })?;
        self.schema = Some(Schema::from_json_str(&source)?);
        self.resource_base = Some(
            path_ref
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf(),
        );
        Ok(self)
    }

    /// Parses the schema from a JSON string. Resources resolve against the
    /// working directory unless a provider is given.
    pub fn with_schema_source(mut self, source: &str) -> Result<Self, PipelineError> {
        self.schema = Some(Schema::from_json_str(source)?);
        Ok(self)
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Scans a directory for font files and makes them available by family name.
    #[cfg(feature = "system-fonts")]
    pub fn with_font_dir<P: AsRef<Path>>(self, path: P) -> Self {
        self.font_library.add_font_dir(path);
        self
    }

    /// Loads the fonts installed on the host.
    #[cfg(feature = "system-fonts")]
    pub fn with_system_fonts(mut self, system_fonts: bool) -> Self {
        self.font_library = self.font_library.with_system_fonts(system_fonts);
        self
    }

    pub fn with_font_library(mut self, library: SharedFontLibrary) -> Self {
        self.font_library = library;
        self
    }

    pub fn with_resource_provider(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.resources = Some(provider);
        self
    }

    /// Replaces the font rasterizer. Schema fonts are not loaded in that case.
    pub fn with_text_backend(mut self, backend: Arc<dyn TextBackend>) -> Self {
        self.text_backend = Some(backend);
        self
    }

    /// Overrides the executor chosen from `PipelineConfig::parallel`.
    pub fn with_executor(mut self, executor: ExecutorImpl) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_layout_config(mut self, layout: LayoutConfig) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn build(self) -> Result<CardPipeline, PipelineError> {
        let schema = self.schema.ok_or_else(|| {
            PipelineError::Config(
                "No schema has been configured. Use `with_schema_file` or `with_schema`."
                    .to_string(),
            )
        })?;

        let resources: Arc<dyn ResourceProvider> = match self.resources {
            Some(provider) => provider,
            None => {
                let base = self.resource_base.unwrap_or_else(|| PathBuf::from("."));
                Arc::new(FilesystemResourceProvider::new(base))
            }
        };

        let text: Arc<dyn TextBackend> = match self.text_backend {
            Some(backend) => {
                if !schema.fonts.is_empty() {
                    log::debug!(
                        "Custom text backend '{}' set, skipping {} schema fonts",
                        backend.name(),
                        schema.fonts.len()
                    );
                }
                backend
            }
            None => {
                let loaded = schema.register_fonts(&self.font_library, resources.as_ref())?;
                log::debug!("Registered {} schema fonts", loaded);
                Arc::new(FontRasterizer::new(self.font_library, &self.config.layout))
            }
        };

        let env = RenderEnvironment::new(text, resources, self.config.layout);
        let layout = CardLayout::new(schema, &env.templates)?;
        let executor = self
            .executor
            .unwrap_or_else(|| ExecutorImpl::for_parallelism(self.config.parallel));

        log::info!(
            "Built pipeline for '{}' ({} elements, text via {}, resources via {}, {})",
            layout.schema().name,
            layout.root().node_count(),
            env.text.name(),
            env.resources.name(),
            executor.name()
        );
        Ok(CardPipeline::new(layout, env, executor, self.config))
    }
}
