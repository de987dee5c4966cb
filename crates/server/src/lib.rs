//! Render server - banner art over a TCP socket with a JSON line protocol
//!
//! This crate exposes the core renderer to other processes. It stands where a
//! web form would: it collects `text` and `banner` from a client, runs the
//! caller-side checks, and answers with the art or an error.
//!
//! # Protocol Overview
//!
//! 1. **Connection**: client connects to the TCP socket (default: 127.0.0.1:8080)
//! 2. **Requests**: one JSON object per line (`render` or `list`)
//! 3. **Responses**: exactly one JSON line per request, echoing its `seq`
//!
//! Connections are independent; there is no handshake and no shared mutable
//! state beyond the optional read-only font cache.
//!
//! # Message Types
//!
//! ## Client → Server
//!
//! - **render**: `text` and `banner` to render
//! - **list**: ask for available banner names
//!
//! ## Server → Client
//!
//! - **art**: the rendered block art
//! - **banners**: sorted banner names
//! - **error**: `bad_request`, `internal`, `invalid_message` or `line_too_long`
//!
//! Oversized or non-UTF-8 lines are answered with an error and the connection
//! stays open.
//!
//! # Environment Variables
//!
//! - `BANNER_HOST`: bind address (default: "127.0.0.1")
//! - `BANNER_PORT`: port number (default: 8080)
//! - `BANNER_FONTS_DIR`: where banner fonts live (default: "banners")
//! - `BANNER_MAX_TEXT`: longest accepted text in bytes (default: 1000)
//! - `BANNER_CACHE`: set to "1" or "true" to keep parsed fonts in memory
//! - `BANNER_DISABLED`: set to "1" or "true" to disable the server entirely
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"render","seq":1,"text":"Hi\\nthere","banner":"standard"}
//! Server -> Client: {"type":"art","seq":1,"ts":1234567890,"art":"..."}
//! Client -> Server: {"type":"render","seq":2,"text":"","banner":"standard"}
//! Server -> Client: {"type":"error","seq":2,"ts":1234567891,"code":"bad_request","message":"Text and banner style are required."}
//! ```
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 8080
//! {"type":"list","seq":1}
//! ```

pub mod protocol;
pub mod server;

pub use banner_art_core as core;
pub use banner_art_types as types;

// Re-export protocol types for convenience
pub use protocol::*;
pub use server::*;
