//! Loads card artwork and font files from a directory on disk.
//!
//! Paths in a schema are relative to the schema's own directory. Anything that
//! resolves outside that directory (`..` segments, absolute paths, symlinks
//! pointing elsewhere) is reported as not found.

use cardwright_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct FilesystemResourceProvider {
    root: PathBuf,
    /// `root` after canonicalization; `None` while the directory does not exist.
    canonical_root: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let canonical_root = root.canonicalize().ok();
        Self {
            root,
            canonical_root,
        }
    }

    /// A provider rooted at the directory containing `schema_path`.
    pub fn for_schema<P: AsRef<Path>>(schema_path: P) -> Self {
        let dir = schema_path
            .as_ref()
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Self::new(dir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return None;
        }

        let joined = self.root.join(relative);
        match (joined.canonicalize(), &self.canonical_root) {
            (Ok(canonical), Some(root)) if canonical.starts_with(root) => Some(canonical),
            (Ok(_), Some(_)) => None,
            _ => Some(joined),
        }
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self
            .resolve(path)
            .ok_or_else(|| ResourceError::NotFound(format!("{} (outside resource root)", path)))?;

        log::debug!("Loading resource '{}' from {}", path, full_path.display());
        match std::fs::read(&full_path) {
            Ok(bytes) => Ok(Arc::new(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ResourceError::NotFound(path.to_string())),
            Err(e) => Err(ResourceError::LoadFailed {
                path: path.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_some_and(|p| p.is_file())
    }

    fn base_path(&self) -> Option<&str> {
        self.root.to_str()
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
