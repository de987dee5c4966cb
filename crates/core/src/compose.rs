//! Compose module - lays out text as block art, glyph by glyph and row by row
//!
//! Each input line becomes a block of `art_height` rows. Characters missing from
//! the table render as a blank glyph sized to the table's reference width, and
//! glyphs with fewer rows than `art_height` are padded row by row. Empty input
//! lines become a single empty output line.

use log::warn;

use crate::error::{Error, Result};
use crate::font::{GlyphArt, GlyphTable};
use crate::types::ART_HEIGHT;

/// Renders text with a glyph table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compositor {
    pub art_height: usize,
}

impl Default for Compositor {
    fn default() -> Self {
        Self {
            art_height: ART_HEIGHT,
        }
    }
}

impl Compositor {
    pub fn new(art_height: usize) -> Self {
        Self { art_height }
    }

    /// Render `text` (possibly multi-line) with `table`.
    ///
    /// Fails with [`Error::WidthIndeterminate`] when no glyph in the table has a
    /// non-empty first row, whatever the text. Nothing else fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use banner_art_core::compose::Compositor;
    /// use banner_art_core::font::{GlyphArt, GlyphTable};
    ///
    /// let table: GlyphTable = [('A', GlyphArt::new(["/\\", "||"]))].into_iter().collect();
    /// let art = Compositor::new(2).render("AA", &table).unwrap();
    /// assert_eq!(art, "/\\/\\\n||||");
    /// ```
    pub fn render(&self, text: &str, table: &GlyphTable) -> Result<String> {
        let width = table.reference_width().ok_or_else(|| {
            warn!("no glyph with a non-empty first row among {} glyphs", table.len());
            Error::WidthIndeterminate
        })?;
        let blank = GlyphArt::blank(width, self.art_height);

        let blocks: Vec<String> = text
            .split('\n')
            .map(|line| self.render_line(line, table, &blank))
            .collect();
        Ok(blocks.join("\n"))
    }

    fn render_line(&self, line: &str, table: &GlyphTable, blank: &GlyphArt) -> String {
        if line.is_empty() {
            return String::new();
        }

        let mut rows = vec![String::new(); self.art_height];
        for ch in line.chars() {
            let art = table.get(ch).unwrap_or(blank);
            let filler = art.width();
            for (i, row) in rows.iter_mut().enumerate() {
                match art.row(i) {
                    Some(r) => row.push_str(r),
                    None => row.extend(std::iter::repeat(' ').take(filler)),
                }
            }
        }
        rows.join("\n")
    }
}

/// Render `text` with the reference glyph height.
pub fn render(text: &str, table: &GlyphTable) -> Result<String> {
    Compositor::default().render(text, table)
}
