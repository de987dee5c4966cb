//! Banner library - resolves banner names to font files and renders requests.
//!
//! Without caching every request loads and discards its own glyph table. With
//! caching enabled, parsed tables are kept as shared read-only `Arc`s keyed by
//! banner name.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use crate::compose::Compositor;
use crate::error::{Error, Result};
use crate::font::{load_font_with, FontConfig, GlyphTable};
use crate::types::{RenderRequest, DEFAULT_FONTS_DIR, FONT_EXTENSION, MAX_TEXT_LEN};
use crate::validate::{prepare_request, validate_banner_name};

/// Where fonts live and how requests are limited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    pub fonts_dir: PathBuf,
    /// File extension without the dot
    pub extension: String,
    pub max_text_len: usize,
    /// Keep parsed tables between requests
    pub cache: bool,
    pub font: FontConfig,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            fonts_dir: PathBuf::from(DEFAULT_FONTS_DIR),
            extension: FONT_EXTENSION.to_string(),
            max_text_len: MAX_TEXT_LEN,
            cache: false,
            font: FontConfig::default(),
        }
    }
}

impl LibraryConfig {
    pub fn with_fonts_dir(fonts_dir: impl Into<PathBuf>) -> Self {
        Self {
            fonts_dir: fonts_dir.into(),
            ..Self::default()
        }
    }
}

pub struct BannerLibrary {
    config: LibraryConfig,
    compositor: Compositor,
    cache: Option<RwLock<HashMap<String, Arc<GlyphTable>>>>,
}

impl BannerLibrary {
    pub fn new(config: LibraryConfig) -> Self {
        let compositor = Compositor::new(config.font.art_height);
        let cache = config.cache.then(|| RwLock::new(HashMap::new()));
        Self {
            config,
            compositor,
            cache,
        }
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Path of the font file for `name`.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_banner_name(name)?;
        Ok(self
            .config
            .fonts_dir
            .join(format!("{}.{}", name, self.config.extension)))
    }

    /// Load the glyph table for `name`, from the cache when enabled.
    pub fn load(&self, name: &str) -> Result<Arc<GlyphTable>> {
        if let Some(cache) = &self.cache {
            if let Some(table) = cache.read().get(name) {
                debug!("banner {name:?} served from cache");
                return Ok(Arc::clone(table));
            }
        }

        let path = self.path_for(name)?;
        let table = Arc::new(load_font_with(&path, &self.config.font)?);

        if let Some(cache) = &self.cache {
            cache.write().insert(name.to_string(), Arc::clone(&table));
        }
        Ok(table)
    }

    /// Validate, load and render in one call.
    ///
    /// Returns the art, or an error and no partial output.
    pub fn generate(&self, request: &RenderRequest) -> Result<String> {
        let text = prepare_request(request, self.config.max_text_len)?;
        let table = self.load(&request.banner)?;
        self.compositor.render(&text, &table)
    }

    /// Banner names available in the fonts dir, sorted.
    pub fn available(&self) -> Result<Vec<String>> {
        let dir = &self.config.fonts_dir;
        let unreadable = |source: std::io::Error| Error::ResourceUnreadable {
            path: dir.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(unreadable)? {
            let path = entry.map_err(unreadable)?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(self.config.extension.as_str()) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_banner_name(stem).is_ok() {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Drop every cached table.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.write().clear();
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| c.read().len())
    }
}
