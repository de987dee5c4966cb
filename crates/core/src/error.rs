//! Error results that can be returned from banner loading and rendering
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read banner file {path:?}: {source}")]
    ResourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not determine glyph width: no glyph has a non-empty first row")]
    WidthIndeterminate,

    #[error("text is required")]
    EmptyText,

    #[error("banner style is required")]
    EmptyBanner,

    #[error("text contains non-ASCII character {ch:?} at byte {position}")]
    NonAscii { ch: char, position: usize },

    #[error("text is {len} bytes, limit is {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("invalid banner name {0:?}")]
    InvalidBannerName(String),
}

impl Error {
    /// True when the caller sent something unusable, false when generation itself failed.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyText
                | Error::EmptyBanner
                | Error::NonAscii { .. }
                | Error::TextTooLong { .. }
                | Error::InvalidBannerName(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
