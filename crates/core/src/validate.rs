//! Caller-side checks run before a request reaches the compositor.
//!
//! Order matters and matches the form handling the renderer grew up behind:
//! empty text or banner is rejected on the raw input, then the text is
//! normalized and the character set and length are checked on the result.

use crate::error::{Error, Result};
use crate::types::{is_accepted_text_char, RenderRequest};

/// Turn literal `\n` escapes into newlines and fold CRLF into LF.
///
/// ```
/// use banner_art_core::validate::normalize_text;
///
/// assert_eq!(normalize_text(r"Hello\nThere"), "Hello\nThere");
/// assert_eq!(normalize_text("a\r\nb"), "a\nb");
/// ```
pub fn normalize_text(text: &str) -> String {
    text.replace("\\n", "\n").replace("\r\n", "\n")
}

/// Reject text with characters outside printable ASCII plus `\n`/`\r`, or longer
/// than `max_len` bytes.
pub fn validate_text(text: &str, max_len: usize) -> Result<()> {
    if let Some((position, ch)) = text.char_indices().find(|&(_, ch)| !is_accepted_text_char(ch)) {
        return Err(Error::NonAscii { ch, position });
    }
    if text.len() > max_len {
        return Err(Error::TextTooLong {
            len: text.len(),
            max: max_len,
        });
    }
    Ok(())
}

/// Banner names are plain file stems: ASCII letters, digits, `-`, `_` and `.`,
/// never starting with a dot.
pub fn validate_banner_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::EmptyBanner);
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');
    if name.starts_with('.') || !name.chars().all(allowed) {
        return Err(Error::InvalidBannerName(name.to_string()));
    }
    Ok(())
}

/// Validate `request` and return the normalized text ready for rendering.
pub fn prepare_request(request: &RenderRequest, max_len: usize) -> Result<String> {
    if request.text.is_empty() {
        return Err(Error::EmptyText);
    }
    validate_banner_name(&request.banner)?;

    let text = normalize_text(&request.text);
    validate_text(&text, max_len)?;
    Ok(text)
}
