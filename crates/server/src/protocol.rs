//! Protocol module - JSON message types for the render server
//!
//! Line-delimited JSON: one request per line, one response line per request.
//! Every message has `type` and `seq`; server messages also carry `ts`
//! (timestamp in ms).

use serde::{Deserialize, Serialize};

use crate::core::Error as CoreError;

// ============== Client -> Server Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderType {
    #[serde(rename = "render")]
    Render,
}

impl Default for RenderType {
    fn default() -> Self {
        Self::Render
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListType {
    #[serde(rename = "list")]
    List,
}

impl Default for ListType {
    fn default() -> Self {
        Self::List
    }
}

/// Render request. Missing `text` or `banner` arrive as empty strings and are
/// rejected by validation, not by the parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: RenderType,
    pub seq: u64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub banner: String,
}

/// Ask for the banner names the server can render with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: ListType,
    pub seq: u64,
}

// ============== Server -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtType {
    #[serde(rename = "art")]
    Art,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BannersType {
    #[serde(rename = "banners")]
    Banners,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The request was understood but its fields are unusable.
    #[serde(rename = "bad_request")]
    BadRequest,
    /// Generation failed on the server side.
    #[serde(rename = "internal")]
    Internal,
    #[serde(rename = "invalid_message")]
    InvalidMessage,
    #[serde(rename = "line_too_long")]
    LineTooLong,
}

/// Rendered art
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtMessage {
    #[serde(rename = "type")]
    pub msg_type: ArtType,
    pub seq: u64,
    pub ts: u64,
    pub art: String,
}

/// Available banner names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannersMessage {
    #[serde(rename = "type")]
    pub msg_type: BannersType,
    pub seq: u64,
    pub ts: u64,
    pub banners: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

// ============== Message Parsing ==============

#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Render(RenderMessage),
    List(ListMessage),
    Unknown(UnknownMessage),
}

/// A well-formed JSON message with a `type` the server does not handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
}

/// Parse a JSON message from a string
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "render")]
        Render(RenderMessage),
        #[serde(rename = "list")]
        List(ListMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Render(m)) => Ok(ParsedMessage::Render(m)),
        Ok(InboundMessage::List(m)) => Ok(ParsedMessage::List(m)),
        Err(e) => {
            // Unknown message type is not a hard parse error for the protocol.
            #[derive(Debug, Deserialize)]
            struct TypeOnly<'a> {
                #[serde(rename = "type")]
                #[serde(borrow)]
                msg_type: Option<&'a str>,
            }
            let msg_type = serde_json::from_str::<TypeOnly>(json)?
                .msg_type
                .unwrap_or("unknown");
            if msg_type != "render" && msg_type != "list" {
                #[derive(Debug, Deserialize)]
                struct SeqOnly {
                    seq: Option<u64>,
                }
                let seq = serde_json::from_str::<SeqOnly>(json)?.seq.unwrap_or(0);
                return Ok(ParsedMessage::Unknown(UnknownMessage { seq }));
            }
            Err(e)
        }
    }
}

// ============== Message Creation ==============

pub fn create_render(seq: u64, text: &str, banner: &str) -> RenderMessage {
    RenderMessage {
        msg_type: RenderType::Render,
        seq,
        text: text.to_string(),
        banner: banner.to_string(),
    }
}

pub fn create_art(seq: u64, art: String) -> ArtMessage {
    ArtMessage {
        msg_type: ArtType::Art,
        seq,
        ts: current_timestamp_ms(),
        art,
    }
}

pub fn create_banners(seq: u64, banners: Vec<String>) -> BannersMessage {
    BannersMessage {
        msg_type: BannersType::Banners,
        seq,
        ts: current_timestamp_ms(),
        banners,
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Map a core failure to the message a client sees.
///
/// Generation failures never carry paths or I/O details.
pub fn error_for(seq: u64, err: &CoreError) -> ErrorMessage {
    match err {
        CoreError::EmptyText | CoreError::EmptyBanner => create_error(
            seq,
            ErrorCode::BadRequest,
            "Text and banner style are required.",
        ),
        CoreError::NonAscii { .. } => create_error(
            seq,
            ErrorCode::BadRequest,
            "Text contains non-ASCII characters.",
        ),
        CoreError::TextTooLong { max, .. } => create_error(
            seq,
            ErrorCode::BadRequest,
            &format!("Text exceeds {max} characters limit."),
        ),
        CoreError::InvalidBannerName(_) => {
            create_error(seq, ErrorCode::BadRequest, "Unknown banner style.")
        }
        CoreError::ResourceUnreadable { .. } | CoreError::WidthIndeterminate => {
            create_error(seq, ErrorCode::Internal, "Failed to generate art.")
        }
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
