//! ResourceProvider trait for abstracting where card assets come from.
//!
//! Image elements and schema font files are loaded through this seam, so the
//! layout code never touches the filesystem directly.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to load resource '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid resource format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// Shared resource data type (reference-counted bytes).
pub type SharedResourceData = Arc<Vec<u8>>;

/// Loads asset bytes (artwork, icons, font files) by relative path.
pub trait ResourceProvider: Send + Sync + Debug {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError>;

    fn exists(&self, path: &str) -> bool;

    /// Directory relative paths are resolved against, if any.
    fn base_path(&self) -> Option<&str> {
        None
    }

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Assets registered up front, keyed by the exact path string schemas use.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: RwLock<HashMap<String, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `path`, replacing any previous value.
    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        self.add_shared(path, Arc::new(data))
    }

    pub fn add_shared(
        &self,
        path: impl Into<String>,
        data: SharedResourceData,
    ) -> Result<(), ResourceError> {
        let path = path.into();
        let mut resources = self.resources.write().map_err(|_| ResourceError::LoadFailed {
            path: path.clone(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources.insert(path, data);
        Ok(())
    }

    pub fn remove(&self, path: &str) -> Option<SharedResourceData> {
        self.resources.write().ok()?.remove(path)
    }

    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let resources = self.resources.read().map_err(|_| ResourceError::LoadFailed {
            path: path.to_string(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.resources
            .read()
            .map(|r| r.contains_key(path))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_load_and_overwrite() {
        let provider = InMemoryResourceProvider::new();
        provider.add("art/dragon.png", b"v1".to_vec()).unwrap();
        provider.add("art/dragon.png", b"v2".to_vec()).unwrap();

        assert_eq!(&*provider.load("art/dragon.png").unwrap(), b"v2");
        assert_eq!(provider.len(), 1);
        assert!(provider.exists("art/dragon.png"));
        assert!(provider.base_path().is_none());
    }

    #[test]
    fn test_missing_and_removed() {
        let provider = InMemoryResourceProvider::new();
        assert!(matches!(provider.load("nope.png"), Err(ResourceError::NotFound(_))));

        provider.add("icon.png", vec![1, 2, 3]).unwrap();
        let removed = provider.remove("icon.png").unwrap();
        assert_eq!(&*removed, &[1, 2, 3]);
        assert!(provider.is_empty());
        assert!(provider.remove("icon.png").is_none());
    }

    #[test]
    fn test_error_display() {
        let err = ResourceError::LoadFailed {
            path: "frame.png".to_string(),
            message: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("frame.png"));
        assert!(err.to_string().contains("permission denied"));

        let io: ResourceError = std::io::Error::other("disk gone").into();
        assert!(matches!(io, ResourceError::Io(_)));
    }
}
