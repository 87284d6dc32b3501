use cardwright_render_core::{CardSink, RenderError, RenderedCard};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Writes every card as a PNG file below one directory.
///
/// File names may contain sub-directories but must stay inside the output
/// directory.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Creates `dir` (and its parents) if needed.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, RenderError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in entry order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn target(&self, file_name: &str) -> Result<PathBuf, RenderError> {
        let relative = Path::new(file_name);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || relative.file_name().is_none() {
            return Err(RenderError::Output {
                name: file_name.to_string(),
                message: "file name must be a relative path inside the output directory"
                    .to_string(),
            });
        }
        Ok(self.dir.join(relative))
    }
}

impl CardSink for DirectorySink {
    fn accept(&mut self, card: RenderedCard) -> Result<(), RenderError> {
        let path = self.target(&card.file_name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        if path.exists() {
            log::warn!("Overwriting '{}' with card {}", path.display(), card.index);
        }
        fs::write(&path, card.encode_png()?)?;
        log::debug!("Wrote card {} to '{}'", card.index, path.display());
        self.written.push(path);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        log::info!(
            "Wrote {} cards to '{}'",
            self.written.len(),
            self.dir.display()
        );
        Ok(())
    }
}

/// Keeps every card in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    cards: Vec<RenderedCard>,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[RenderedCard] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<RenderedCard> {
        self.cards
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl CardSink for MemorySink {
    fn accept(&mut self, card: RenderedCard) -> Result<(), RenderError> {
        self.cards.push(card);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.finished = true;
        Ok(())
    }
}
