//! Core types module - shared constants and plain data
//!
//! This module defines the values every other crate agrees on. All items are
//! pure data with no external dependencies, so they can be used by the font
//! loader, the compositor and the render server alike.
//!
//! # Banner Font Format
//!
//! A banner font is a plain text file. Line 0 is a header and is ignored. Every
//! printable ASCII character from space through tilde then occupies a block of
//! [`ART_HEIGHT`] lines, and blocks are separated by one blank line:
//!
//! | Character | First line of its block |
//! |-----------|-------------------------|
//! | `' '` (32) | 1 |
//! | `'!'` (33) | 10 |
//! | `'A'` (65) | 1 + 33 * 9 = 298 |
//! | `'~'` (126) | 1 + 94 * 9 = 847 |
//!
//! # Request Limits
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MAX_TEXT_LEN` | 1000 | Longest accepted input text, in bytes |
//! | `DEFAULT_FONTS_DIR` | `banners` | Where banner names are resolved |
//! | `FONT_EXTENSION` | `txt` | Extension appended to a banner name |
//!
//! # Examples
//!
//! ```
//! use banner_art_types::{glyph_block_start, is_printable_ascii, ART_HEIGHT, GLYPH_COUNT};
//!
//! assert_eq!(ART_HEIGHT, 8);
//! assert_eq!(GLYPH_COUNT, 95);
//! assert_eq!(glyph_block_start('A'), Some(298));
//!
//! assert!(is_printable_ascii('~'));
//! assert!(!is_printable_ascii('\t'));
//! ```

/// Number of rows every glyph occupies (8)
pub const ART_HEIGHT: usize = 8;

/// Number of header lines before the first glyph block (1)
pub const HEADER_LINES: usize = 1;

/// First character stored in a banner font (space, 32)
pub const FIRST_GLYPH: char = ' ';

/// Last character stored in a banner font (tilde, 126)
pub const LAST_GLYPH: char = '~';

/// Number of glyphs in a complete banner font (95)
pub const GLYPH_COUNT: usize = (LAST_GLYPH as usize) - (FIRST_GLYPH as usize) + 1;

/// Longest accepted input text in bytes (1000)
pub const MAX_TEXT_LEN: usize = 1000;

/// Directory banner names are resolved against
pub const DEFAULT_FONTS_DIR: &str = "banners";

/// Extension of banner font files (without the dot)
pub const FONT_EXTENSION: &str = "txt";

/// Banner used when a caller does not pick one
pub const DEFAULT_BANNER: &str = "standard";

/// Check whether `ch` is a printable ASCII character (32..=126).
///
/// # Examples
///
/// ```
/// use banner_art_types::is_printable_ascii;
///
/// assert!(is_printable_ascii(' '));
/// assert!(is_printable_ascii('A'));
/// assert!(!is_printable_ascii('\n'));
/// assert!(!is_printable_ascii('é'));
/// ```
pub fn is_printable_ascii(ch: char) -> bool {
    (FIRST_GLYPH..=LAST_GLYPH).contains(&ch)
}

/// Check whether `ch` may appear in input text: printable ASCII plus `\n` and `\r`.
pub fn is_accepted_text_char(ch: char) -> bool {
    ch == '\n' || ch == '\r' || is_printable_ascii(ch)
}

/// Line index where the glyph block for `ch` starts in a reference-format font.
///
/// Returns `None` for characters outside the printable ASCII range.
pub fn glyph_block_start(ch: char) -> Option<usize> {
    if !is_printable_ascii(ch) {
        return None;
    }
    let n = (ch as usize) - (FIRST_GLYPH as usize);
    Some(HEADER_LINES + n * (ART_HEIGHT + 1))
}

/// A request to render `text` with the banner called `banner`.
///
/// Nothing about the request is checked on construction; see
/// `banner_art_core::validate` for the caller-side rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderRequest {
    pub text: String,
    pub banner: String,
}

impl RenderRequest {
    pub fn new(text: impl Into<String>, banner: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            banner: banner.into(),
        }
    }
}
