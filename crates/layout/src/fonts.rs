//! Font library for card text.
//!
//! `SharedFontLibrary` resolves a `(family, weight, style)` triple to font
//! binaries and caches the parsed result.
//!
//! ## Resolution order
//!
//! 1. Fonts registered by the schema under an alias (`fonts` section)
//! 2. An injected `FontProvider`, if any
//! 3. The fontdb database (feature: `system-fonts`), filled from font
//!    directories and optionally the system fonts

use cardwright_style::font::{FontStyle, FontWeight};
use cardwright_style::TextStyle;
use cardwright_traits::{FontError, FontProvider, FontQuery, InMemoryFontProvider, SharedFontData};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

/// A parsed-on-demand font binary.
///
/// Shaping uses a cheap rustybuzz view created per call; rasterization needs a
/// fully parsed fontdue font, which is built once and kept.
pub struct FontInstance {
    pub data: SharedFontData,
    raster: OnceLock<Result<fontdue::Font, String>>,
}

impl std::fmt::Debug for FontInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontInstance")
            .field("data_len", &self.data.len())
            .field("raster_ready", &self.raster.get().is_some())
            .finish()
    }
}

impl FontInstance {
    /// Wraps `data` after checking that it parses as a font face.
    pub fn new(data: SharedFontData) -> Result<Self, FontError> {
        ttf_parser::Face::parse(&data, 0).map_err(|e| FontError::InvalidData(e.to_string()))?;
        Ok(Self {
            data,
            raster: OnceLock::new(),
        })
    }

    /// Creates a lightweight Face view over the font data.
    pub fn as_face(&self) -> Option<rustybuzz::Face<'_>> {
        rustybuzz::Face::from_slice(&self.data, 0)
    }

    /// The fontdue font used for glyph coverage, parsed on first use.
    pub fn raster_font(&self) -> Result<&fontdue::Font, FontError> {
        self.raster
            .get_or_init(|| {
                fontdue::Font::from_bytes(self.data.as_slice(), fontdue::FontSettings::default())
                    .map_err(|e| e.to_string())
            })
            .as_ref()
            .map_err(|e| FontError::InvalidData(e.clone()))
    }

    /// The family name stored in the font's name table.
    pub fn family_name(&self) -> Option<String> {
        let face = ttf_parser::Face::parse(&self.data, 0).ok()?;
        face.names()
            .into_iter()
            .find(|n| n.name_id == ttf_parser::name_id::TYPOGRAPHIC_FAMILY)
            .or_else(|| {
                face.names()
                    .into_iter()
                    .find(|n| n.name_id == ttf_parser::name_id::FAMILY)
            })
            .and_then(|n| n.to_string())
    }
}

pub type FontData = Arc<FontInstance>;

/// Key for the font cache.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct FontCacheKey {
    family: String,
    weight: u16,
    style: u8,
}

impl FontCacheKey {
    fn new(family: &str, weight: FontWeight, style: FontStyle) -> Self {
        Self {
            family: family.to_lowercase(),
            weight: weight.numeric_value(),
            style: match style {
                FontStyle::Normal => 0,
                FontStyle::Italic => 1,
                FontStyle::Oblique => 2,
            },
        }
    }
}

/// Font lookup shared by every card rendered with one schema.
#[derive(Clone)]
pub struct SharedFontLibrary {
    #[cfg(feature = "system-fonts")]
    db: Arc<RwLock<fontdb::Database>>,

    /// Faces registered from the schema's `fonts` section, keyed by alias.
    aliases: Arc<InMemoryFontProvider>,

    external_provider: Option<Arc<dyn FontProvider>>,

    font_data_cache: Arc<RwLock<HashMap<FontCacheKey, FontData>>>,
}

impl std::fmt::Debug for SharedFontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedFontLibrary")
            .field("aliases", &self.aliases.len())
            .field(
                "external_provider",
                &self.external_provider.as_ref().map(|p| p.name()),
            )
            .finish()
    }
}

impl Default for SharedFontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedFontLibrary {
    /// Creates an empty library. Nothing resolves until fonts are added.
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "system-fonts")]
            db: Arc::new(RwLock::new(fontdb::Database::new())),
            aliases: Arc::new(InMemoryFontProvider::new()),
            external_provider: None,
            font_data_cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn from_provider(provider: Arc<dyn FontProvider>) -> Self {
        Self::new().with_provider(provider)
    }

    /// Fonts from the provider take precedence over fontdb.
    pub fn with_provider(mut self, provider: Arc<dyn FontProvider>) -> Self {
        self.external_provider = Some(provider);
        self
    }

    #[cfg(feature = "system-fonts")]
    pub fn with_system_fonts(self, enable: bool) -> Self {
        if enable && let Ok(mut db) = self.db.write() {
            db.load_system_fonts();
            log::debug!("Loaded system fonts, fontdb now has {} faces", db.len());
        }
        self
    }

    /// Loads every font file found under `path` into fontdb.
    #[cfg(feature = "system-fonts")]
    pub fn add_font_dir<P: AsRef<std::path::Path>>(&self, path: P) {
        if let Ok(mut db) = self.db.write() {
            let before = db.len();
            db.load_fonts_dir(path.as_ref());
            log::debug!(
                "Loaded {} faces from {}",
                db.len() - before,
                path.as_ref().display()
            );
        }
    }

    /// Adds a font binary to fontdb, addressable by its own family name.
    #[cfg(feature = "system-fonts")]
    pub fn add_font_data(&self, data: Vec<u8>) {
        if let Ok(mut db) = self.db.write() {
            db.load_font_data(data);
        }
    }

    /// Registers `data` under `alias` so text styles can name it directly.
    pub fn register_alias(
        &self,
        alias: &str,
        weight: FontWeight,
        style: FontStyle,
        data: SharedFontData,
    ) -> Result<(), FontError> {
        let instance = FontInstance::new(data.clone())?;
        log::debug!(
            "Registering font alias '{}' ({:?}, {:?}) -> {}",
            alias,
            weight,
            style,
            instance.family_name().unwrap_or_else(|| "<unnamed>".to_string())
        );
        self.aliases.add_shared(alias, weight, style, data)?;
        // An earlier lookup may have cached a different face for this key.
        if let Ok(mut cache) = self.font_data_cache.write() {
            cache.retain(|k, _| k.family != alias.to_lowercase());
        }
        Ok(())
    }

    /// Number of parsed faces currently cached.
    pub fn cached_faces(&self) -> usize {
        self.font_data_cache.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn resolve_style(&self, style: &TextStyle) -> Result<FontData, FontError> {
        self.resolve(&style.font, style.weight, style.style)
    }

    /// Resolves the font for `family`, `weight` and `style`.
    ///
    /// # Errors
    ///
    /// `FontError::NotFound` when no source has the family, or
    /// `FontError::InvalidData` when the matched binary is not a font.
    pub fn resolve(
        &self,
        family: &str,
        weight: FontWeight,
        style: FontStyle,
    ) -> Result<FontData, FontError> {
        let cache_key = FontCacheKey::new(family, weight, style);
        if let Ok(cache) = self.font_data_cache.read()
            && let Some(data) = cache.get(&cache_key)
        {
            return Ok(data.clone());
        }

        log::debug!(
            "Resolving font: family='{}', weight={:?}, style={:?}",
            family,
            weight,
            style
        );
        let query = FontQuery::new(family).with_weight(weight).with_style(style);

        let bytes = match self.aliases.load_font(&query) {
            Ok(bytes) => {
                log::debug!("  → Found schema alias");
                Some(bytes)
            }
            Err(_) => self.external_provider.as_ref().and_then(|provider| {
                let found = provider.load_font(&query).ok();
                log::debug!(
                    "  → {} in {}",
                    if found.is_some() { "Found" } else { "Not found" },
                    provider.name()
                );
                found
            }),
        };

        let bytes = match bytes {
            Some(bytes) => bytes,
            None => self.resolve_from_fontdb(family, weight, style)?,
        };

        let instance = Arc::new(FontInstance::new(bytes)?);
        if let Ok(mut cache) = self.font_data_cache.write() {
            cache.insert(cache_key, instance.clone());
        }
        Ok(instance)
    }

    #[cfg(feature = "system-fonts")]
    fn resolve_from_fontdb(
        &self,
        family: &str,
        weight: FontWeight,
        style: FontStyle,
    ) -> Result<SharedFontData, FontError> {
        let not_found = || FontError::NotFound {
            family: family.to_string(),
            weight,
            style,
        };
        let db = self.db.read().map_err(|_| FontError::LoadFailed {
            path: family.to_string(),
            message: "fontdb lock poisoned".to_string(),
        })?;

        let generic = generic_family(family);
        let families = [generic.unwrap_or(fontdb::Family::Name(family))];
        let id = db
            .query(&fontdb::Query {
                families: &families,
                weight: fontdb::Weight(weight.numeric_value()),
                stretch: fontdb::Stretch::Normal,
                style: map_style(style),
            })
            .ok_or_else(|| {
                log::debug!("  → Not found in fontdb");
                not_found()
            })?;

        let face = db.face(id).ok_or_else(not_found)?;
        log::debug!("  → Matched fontdb face {}", face.post_script_name);
        match &face.source {
            fontdb::Source::Binary(data) => Ok(Arc::new(data.as_ref().as_ref().to_vec())),
            fontdb::Source::File(path) => std::fs::read(path).map(Arc::new).map_err(|e| {
                FontError::LoadFailed {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            }),
            #[allow(unreachable_patterns)]
            _ => Err(FontError::InvalidData(
                "unsupported font source type".to_string(),
            )),
        }
    }

    #[cfg(not(feature = "system-fonts"))]
    fn resolve_from_fontdb(
        &self,
        family: &str,
        weight: FontWeight,
        style: FontStyle,
    ) -> Result<SharedFontData, FontError> {
        Err(FontError::NotFound {
            family: family.to_string(),
            weight,
            style,
        })
    }
}

#[cfg(feature = "system-fonts")]
fn generic_family(family: &str) -> Option<fontdb::Family<'static>> {
    match family.to_ascii_lowercase().as_str() {
        "serif" => Some(fontdb::Family::Serif),
        "sans-serif" | "sans" => Some(fontdb::Family::SansSerif),
        "monospace" | "mono" => Some(fontdb::Family::Monospace),
        "cursive" => Some(fontdb::Family::Cursive),
        "fantasy" => Some(fontdb::Family::Fantasy),
        _ => None,
    }
}

#[cfg(feature = "system-fonts")]
fn map_style(s: FontStyle) -> fontdb::Style {
    match s {
        FontStyle::Normal => fontdb::Style::Normal,
        FontStyle::Italic => fontdb::Style::Italic,
        FontStyle::Oblique => fontdb::Style::Oblique,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_cache_key() {
        let key1 = FontCacheKey::new("Arial", FontWeight::Bold, FontStyle::Normal);
        let key2 = FontCacheKey::new("arial", FontWeight::Bold, FontStyle::Normal);
        let key3 = FontCacheKey::new("Arial", FontWeight::Regular, FontStyle::Normal);

        assert_eq!(key1, key2);
        assert_ne!(key1, key3);
    }

    #[test]
    fn test_invalid_font_data_is_rejected() {
        let library = SharedFontLibrary::new();
        let err = library
            .register_alias("Broken", FontWeight::Regular, FontStyle::Normal, Arc::new(vec![0, 1, 2, 3]))
            .unwrap_err();
        assert!(matches!(err, FontError::InvalidData(_)));
        assert!(matches!(
            FontInstance::new(Arc::new(Vec::new())),
            Err(FontError::InvalidData(_))
        ));
    }

    #[test]
    fn test_provider_data_must_parse() {
        let provider = InMemoryFontProvider::new();
        provider
            .add_font("Fake", FontWeight::Regular, FontStyle::Normal, vec![0, 1, 2, 3])
            .unwrap();
        let library = SharedFontLibrary::from_provider(Arc::new(provider));

        let err = library
            .resolve("fake", FontWeight::Regular, FontStyle::Normal)
            .unwrap_err();
        assert!(matches!(err, FontError::InvalidData(_)));
        assert_eq!(library.cached_faces(), 0);
    }

    #[test]
    fn test_unknown_family_is_not_found() {
        let library = SharedFontLibrary::new();
        let err = library
            .resolve_style(&TextStyle::new("Nope", 12.0, Default::default()))
            .unwrap_err();
        assert!(matches!(err, FontError::NotFound { .. }));
    }
}
