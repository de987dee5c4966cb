//! Font module - parses banner font resources into glyph tables
//!
//! A banner font is a flat text file of stacked glyphs. After a header line, each
//! character from `first_glyph` through `last_glyph` takes `art_height` lines,
//! followed by one blank separator line.
//!
//! Parsing is permissive: short files are padded with empty rows instead of being
//! rejected, and characters past the end of the data are simply left out of the
//! table. The only failure is an unreadable resource.

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::types::{ART_HEIGHT, FIRST_GLYPH, HEADER_LINES, LAST_GLYPH};

/// Layout of a banner font resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontConfig {
    /// Rows per glyph
    pub art_height: usize,
    /// Lines skipped before the first glyph block
    pub header_lines: usize,
    pub first_glyph: char,
    pub last_glyph: char,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            art_height: ART_HEIGHT,
            header_lines: HEADER_LINES,
            first_glyph: FIRST_GLYPH,
            last_glyph: LAST_GLYPH,
        }
    }
}

impl FontConfig {
    /// Lines from the start of one glyph block to the start of the next.
    pub fn stride(&self) -> usize {
        self.art_height + 1
    }
}

/// Block-art rows for one character.
///
/// Rows may differ in length if the source was irregular. The glyph's width is
/// the length of its first row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphArt {
    rows: Vec<String>,
}

impl GlyphArt {
    pub fn new<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
        }
    }

    /// All-space glyph of `height` rows, each `width` wide.
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            rows: vec![" ".repeat(width); height],
        }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(String::as_str)
    }

    /// Number of stored rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the first row, 0 for a glyph without rows.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, String::len)
    }
}

/// Mapping from character to its block art, ordered by character code.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphTable {
    glyphs: BTreeMap<char, GlyphArt>,
}

impl FromIterator<(char, GlyphArt)> for GlyphTable {
    fn from_iter<T: IntoIterator<Item = (char, GlyphArt)>>(iter: T) -> Self {
        Self {
            glyphs: iter.into_iter().collect(),
        }
    }
}

impl GlyphTable {
    /// Empty table. Rendering with it always fails with `WidthIndeterminate`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, ch: char) -> Option<&GlyphArt> {
        self.glyphs.get(&ch)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Width used for blank and filler rows.
    ///
    /// This is the first-row length of the lowest character whose first row is
    /// non-empty. `None` when no glyph qualifies.
    pub fn reference_width(&self) -> Option<usize> {
        self.glyphs
            .values()
            .map(GlyphArt::width)
            .find(|&w| w > 0)
    }

    /// Serialize the table back into font resource text.
    ///
    /// Characters between `first_glyph` and the highest stored character that are
    /// missing from the table are written as empty rows. Reloading the output of a
    /// complete table with the same config yields an equal table.
    pub fn to_font_source(&self, config: &FontConfig) -> String {
        let mut out = String::new();
        for _ in 0..config.header_lines {
            out.push('\n');
        }

        let Some(&last) = self.glyphs.keys().next_back() else {
            return out;
        };
        let last = last.min(config.last_glyph);
        let empty = GlyphArt::default();

        for ch in config.first_glyph..=last {
            if ch != config.first_glyph {
                out.push('\n');
            }
            let art = self.glyphs.get(&ch).unwrap_or(&empty);
            for i in 0..config.art_height {
                out.push_str(art.row(i).unwrap_or(""));
                out.push('\n');
            }
        }
        out
    }
}

/// Parse font resource text into a glyph table.
///
/// # Examples
///
/// ```
/// use banner_art_core::font::{parse_font, FontConfig};
///
/// let config = FontConfig { art_height: 2, ..FontConfig::default() };
/// let table = parse_font("header\n  \n  \n\n##\n##", &config);
///
/// assert_eq!(table.get(' ').unwrap().rows(), ["  ", "  "]);
/// assert_eq!(table.get('!').unwrap().rows(), ["##", "##"]);
/// assert!(!table.contains('"'));
/// ```
pub fn parse_font(content: &str, config: &FontConfig) -> GlyphTable {
    let normalized = content.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let mut glyphs = BTreeMap::new();
    let mut start = config.header_lines;

    for ch in config.first_glyph..=config.last_glyph {
        let rows = (0..config.art_height)
            .map(|j| lines.get(start + j).copied().unwrap_or(""))
            .map(str::to_owned)
            .collect();
        glyphs.insert(ch, GlyphArt { rows });

        if start + config.art_height >= lines.len() {
            break;
        }
        start += config.stride();
    }

    GlyphTable { glyphs }
}

/// Read and parse the font at `path`.
///
/// Invalid UTF-8 is replaced rather than rejected; only I/O failures are errors.
pub fn load_font_with(path: impl AsRef<Path>, config: &FontConfig) -> Result<GlyphTable> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| Error::ResourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let table = parse_font(&String::from_utf8_lossy(&bytes), config);
    debug!("loaded {} glyphs from {}", table.len(), path.display());
    Ok(table)
}

/// Read and parse the font at `path` using the reference layout.
pub fn load_font(path: impl AsRef<Path>) -> Result<GlyphTable> {
    load_font_with(path, &FontConfig::default())
}
