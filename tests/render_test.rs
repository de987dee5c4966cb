//! Rendering tests - block layout, blank glyphs, and line structure

use banner_art::core::{
    load_font, parse_font, render, BannerLibrary, Error, FontConfig, GlyphArt, GlyphTable,
    LibraryConfig,
};
use banner_art::types::{RenderRequest, ART_HEIGHT};

fn hash_a_table() -> GlyphTable {
    [('A', GlyphArt::new(["#"; ART_HEIGHT]))].into_iter().collect()
}

/// Two-wide letters so column boundaries are visible.
fn letters_table() -> GlyphTable {
    ('a'..='e')
        .map(|ch| {
            let rows = (0..ART_HEIGHT).map(|i| format!("{ch}{i}"));
            (ch, GlyphArt::new(rows))
        })
        .collect()
}

fn block(row: &str) -> String {
    vec![row; ART_HEIGHT].join("\n")
}

#[test]
fn test_unknown_glyph_after_known_renders_blank() {
    let art = render("AB", &hash_a_table()).unwrap();
    assert_eq!(art, block("# "));
}

#[test]
fn test_empty_line_between_lines_is_single_empty_row() {
    let art = render("A\n\nB", &hash_a_table()).unwrap();
    let expected = [block("#"), String::new(), block(" ")].join("\n");
    assert_eq!(art, expected);
}

#[test]
fn test_empty_table_fails_for_any_text() {
    for text in ["A", "", "\n\n", "hello world"] {
        assert!(matches!(
            render(text, &GlyphTable::new()),
            Err(Error::WidthIndeterminate)
        ));
    }
}

#[test]
fn test_missing_font_never_renders() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_font(dir.path().join("standard.txt")),
        Err(Error::ResourceUnreadable { .. })
    ));

    let library = BannerLibrary::new(LibraryConfig::with_fonts_dir(dir.path()));
    let err = library
        .generate(&RenderRequest::new("hello", "standard"))
        .unwrap_err();
    assert!(matches!(err, Error::ResourceUnreadable { .. }));
}

#[test]
fn test_block_count_matches_input_lines() {
    let table = letters_table();
    let text = "abc\nde\n\nea";
    let art = render(text, &table).unwrap();
    let rows: Vec<&str> = art.split('\n').collect();

    // Three full blocks plus one empty line.
    assert_eq!(rows.len(), 3 * ART_HEIGHT + 1);
    assert_eq!(rows[0], "a0b0c0");
    assert_eq!(rows[ART_HEIGHT - 1], "a7b7c7");
    assert_eq!(rows[ART_HEIGHT], "d0e0");
    assert_eq!(rows[2 * ART_HEIGHT], "");
    assert_eq!(rows[2 * ART_HEIGHT + 1], "e0a0");
    assert_eq!(rows[3 * ART_HEIGHT], "e7a7");
}

#[test]
fn test_unknown_glyphs_use_reference_width_on_every_row() {
    let table = letters_table();
    let art = render("a?b", &table).unwrap();
    for (i, row) in art.split('\n').enumerate() {
        assert_eq!(row, format!("a{i}  b{i}"));
    }
}

#[test]
fn test_line_of_only_unknown_glyphs_is_blank() {
    let art = render("!!!", &letters_table()).unwrap();
    assert_eq!(art, block("      "));
}

#[test]
fn test_carriage_return_is_an_unknown_glyph() {
    let art = render("a\r", &letters_table()).unwrap();
    assert_eq!(art.split('\n').next(), Some("a0  "));
}

#[test]
fn test_render_is_idempotent() {
    let table = letters_table();
    let text = "abc\n\n?de";
    assert_eq!(render(text, &table).unwrap(), render(text, &table).unwrap());
}

#[test]
fn test_custom_height_font_and_compositor() {
    let config = FontConfig {
        art_height: 3,
        ..FontConfig::default()
    };
    // Header, then ' ' and '!' blocks of three rows.
    let table = parse_font("hdr\n   \n   \n   \n\n | \n | \n o ", &config);

    let art = banner_art::core::Compositor::new(3).render("! !", &table).unwrap();
    assert_eq!(art, " |     | \n |     | \n o     o ");
}

#[test]
fn test_library_generate_with_escaped_newline() {
    let dir = tempfile::tempdir().unwrap();
    let src = letters_table().to_font_source(&FontConfig::default());
    std::fs::write(dir.path().join("letters.txt"), &src).unwrap();
    let library = BannerLibrary::new(LibraryConfig::with_fonts_dir(dir.path()));

    let escaped = library
        .generate(&RenderRequest::new("ab\\nc", "letters"))
        .unwrap();
    let reloaded = parse_font(&src, &FontConfig::default());
    assert_eq!(escaped, render("ab\nc", &reloaded).unwrap());
}
