//! FontProvider trait for abstracting where font binaries come from.
//!
//! The layout crate resolves fonts through this seam first and only then
//! falls back to system font discovery, so card schemas can ship their own
//! font files and tests can run without any fonts installed.

use cardwright_style::font::{FontStyle, FontWeight};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Shared font binary (reference-counted bytes).
pub type SharedFontData = Arc<Vec<u8>>;

#[derive(Error, Debug, Clone)]
pub enum FontError {
    #[error("Font not found: {family} ({weight:?}, {style:?})")]
    NotFound {
        family: String,
        weight: FontWeight,
        style: FontStyle,
    },

    #[error("Failed to load font '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid font data: {0}")]
    InvalidData(String),
}

/// What a caller is looking for.
#[derive(Debug, Clone, PartialEq)]
pub struct FontQuery {
    pub family: String,
    pub weight: FontWeight,
    pub style: FontStyle,
    /// Families tried, in order, when `family` has no match.
    pub fallbacks: Vec<String>,
}

impl FontQuery {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            weight: FontWeight::Regular,
            style: FontStyle::Normal,
            fallbacks: Vec::new(),
        }
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_fallbacks(mut self, fallbacks: &[&str]) -> Self {
        self.fallbacks = fallbacks.iter().map(|s| s.to_string()).collect();
        self
    }

    fn families(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.family.as_str()).chain(self.fallbacks.iter().map(String::as_str))
    }
}

/// Describes one face held by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    pub family: String,
    pub weight: FontWeight,
    pub style: FontStyle,
}

/// A source of font binaries.
pub trait FontProvider: Send + Sync + Debug {
    /// Loads the best match for `query`.
    fn load_font(&self, query: &FontQuery) -> Result<SharedFontData, FontError>;

    /// Whether any face of `family` is available.
    fn has_font(&self, family: &str) -> bool;

    /// Every face this provider can serve.
    fn descriptors(&self) -> Vec<FontDescriptor> {
        Vec::new()
    }

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Fonts registered from memory, keyed by case-insensitive family name.
///
/// Within a family the exact weight and style win; otherwise the face with the
/// same style and the closest weight is used, then any face of the family.
#[derive(Debug, Default)]
pub struct InMemoryFontProvider {
    families: RwLock<HashMap<String, Vec<(FontDescriptor, SharedFontData)>>>,
}

impl InMemoryFontProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a face. A face with the same weight and style replaces the old one.
    pub fn add_font(
        &self,
        family: &str,
        weight: FontWeight,
        style: FontStyle,
        data: Vec<u8>,
    ) -> Result<(), FontError> {
        self.add_shared(family, weight, style, Arc::new(data))
    }

    pub fn add_shared(
        &self,
        family: &str,
        weight: FontWeight,
        style: FontStyle,
        data: SharedFontData,
    ) -> Result<(), FontError> {
        let mut families = self.families.write().map_err(|_| FontError::LoadFailed {
            path: family.to_string(),
            message: "font store lock poisoned".to_string(),
        })?;
        let faces = families.entry(family.to_lowercase()).or_default();
        faces.retain(|(d, _)| !(d.weight == weight && d.style == style));
        faces.push((
            FontDescriptor {
                family: family.to_string(),
                weight,
                style,
            },
            data,
        ));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.families
            .read()
            .map(|f| f.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn best_match(
        faces: &[(FontDescriptor, SharedFontData)],
        weight: FontWeight,
        style: FontStyle,
    ) -> Option<SharedFontData> {
        let target = weight.numeric_value() as i32;
        faces
            .iter()
            .min_by_key(|(d, _)| {
                let style_penalty = if d.style == style { 0 } else { 10_000 };
                style_penalty + (d.weight.numeric_value() as i32 - target).abs()
            })
            .map(|(_, data)| data.clone())
    }
}

impl FontProvider for InMemoryFontProvider {
    fn load_font(&self, query: &FontQuery) -> Result<SharedFontData, FontError> {
        let families = self.families.read().map_err(|_| FontError::LoadFailed {
            path: query.family.clone(),
            message: "font store lock poisoned".to_string(),
        })?;

        query
            .families()
            .find_map(|family| {
                families
                    .get(&family.to_lowercase())
                    .and_then(|faces| Self::best_match(faces, query.weight, query.style))
            })
            .ok_or_else(|| FontError::NotFound {
                family: query.family.clone(),
                weight: query.weight,
                style: query.style,
            })
    }

    fn has_font(&self, family: &str) -> bool {
        self.families
            .read()
            .map(|f| f.contains_key(&family.to_lowercase()))
            .unwrap_or(false)
    }

    fn descriptors(&self) -> Vec<FontDescriptor> {
        self.families
            .read()
            .map(|f| f.values().flatten().map(|(d, _)| d.clone()).collect())
            .unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "InMemoryFontProvider"
    }
}
