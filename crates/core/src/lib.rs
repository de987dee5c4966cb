//! Core banner logic - pure, deterministic, and testable
//!
//! This crate turns banner font files into glyph tables and lays out text with
//! them. Apart from reading font files it does no I/O, which makes it:
//!
//! - **Deterministic**: the same text and table always give byte-identical art
//! - **Permissive**: short or ragged fonts degrade to blank space instead of failing
//! - **Stateless**: every call builds and drops its own buffers, so it is safe to
//!   call from any number of request handlers at once
//!
//! # Module Structure
//!
//! - [`font`]: banner font parsing into a [`GlyphTable`]
//! - [`compose`]: multi-line block-art layout with blank-glyph substitution
//! - [`validate`]: caller-side checks (empty fields, character set, length)
//! - [`library`]: banner name resolution, optional table cache, `generate`
//! - [`error`]: the error taxonomy shared by all of the above
//!
//! # Failure Modes
//!
//! Only two things stop a render once the input is valid:
//!
//! - **ResourceUnreadable**: the font file could not be read
//! - **WidthIndeterminate**: no glyph has a non-empty first row, so blank glyphs
//!   have no width
//!
//! Unknown characters, ragged glyphs and truncated fonts all render as spaces.
//!
//! # Example
//!
//! ```
//! use banner_art_core::{parse_font, Compositor, FontConfig};
//!
//! let config = FontConfig { art_height: 2, first_glyph: 'A', last_glyph: 'B', ..FontConfig::default() };
//! let table = parse_font("\n/\\\n--\n\n|)\n|)", &config);
//!
//! let art = Compositor::new(2).render("AB\n\nBA", &table).unwrap();
//! assert_eq!(art, "/\\|)\n--|)\n\n|)/\\\n|)--");
//! ```

pub mod compose;
pub mod error;
pub mod font;
pub mod library;
pub mod validate;

pub use banner_art_types as types;

// Re-export commonly used types for convenience
pub use compose::{render, Compositor};
pub use error::{Error, Result};
pub use font::{load_font, load_font_with, parse_font, FontConfig, GlyphArt, GlyphTable};
pub use library::{BannerLibrary, LibraryConfig};
pub use validate::{normalize_text, prepare_request, validate_banner_name, validate_text};
