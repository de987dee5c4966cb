//! TCP server for banner rendering
//!
//! Handles incoming connections and answers one JSON line per request line.
//! Uses tokio for async networking; rendering itself is synchronous and runs
//! inside the connection task.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use log::{debug, error, info};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};

use crate::core::{BannerLibrary, LibraryConfig};
use crate::protocol::*;
use crate::types::RenderRequest;

fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let after_key = &s[start + 5..];
    let colon = after_key.find(':')?;
    let rest = after_key[colon + 1..].trim_start();
    let end = rest.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u64>().ok()
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub library: LibraryConfig,
    /// Longest accepted request line, newline excluded
    pub max_line_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            library: LibraryConfig::default(),
            max_line_bytes: 64 * 1024,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let host = env::var("BANNER_HOST").unwrap_or(defaults.host);
        let port = env::var("BANNER_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let mut library = defaults.library;
        if let Some(dir) = env::var("BANNER_FONTS_DIR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        {
            library.fonts_dir = PathBuf::from(dir);
        }
        if let Some(max) = env::var("BANNER_MAX_TEXT")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            library.max_text_len = max;
        }
        library.cache = env_flag("BANNER_CACHE");

        Self {
            host,
            port,
            library,
            max_line_bytes: defaults.max_line_bytes,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid socket address {}:{}", self.host, self.port))
    }
}

/// Shared server state
pub struct ServerState {
    config: ServerConfig,
    library: BannerLibrary,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        let library = BannerLibrary::new(config.library.clone());
        Self { config, library }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn library(&self) -> &BannerLibrary {
        &self.library
    }

    /// Check if the server is disabled via environment
    pub fn is_disabled() -> bool {
        env_flag("BANNER_DISABLED")
    }
}

/// One response line.
#[derive(Debug, Clone)]
pub enum ClientOutbound {
    Art(ArtMessage),
    Banners(BannersMessage),
    Error(ErrorMessage),
}

impl ClientOutbound {
    pub fn seq(&self) -> u64 {
        match self {
            ClientOutbound::Art(m) => m.seq,
            ClientOutbound::Banners(m) => m.seq,
            ClientOutbound::Error(m) => m.seq,
        }
    }
}

/// Answer a single request line.
///
/// Never fails: anything the server cannot act on becomes an error message.
pub fn handle_line(state: &ServerState, line: &str) -> ClientOutbound {
    match parse_message(line) {
        Ok(ParsedMessage::Render(msg)) => {
            let request = RenderRequest::new(msg.text, msg.banner);
            match state.library().generate(&request) {
                Ok(art) => ClientOutbound::Art(create_art(msg.seq, art)),
                Err(e) => {
                    if e.is_client_error() {
                        debug!("rejected render seq {}: {}", msg.seq, e);
                    } else {
                        error!("ASCII generation error: {}", e);
                    }
                    ClientOutbound::Error(error_for(msg.seq, &e))
                }
            }
        }
        Ok(ParsedMessage::List(msg)) => match state.library().available() {
            Ok(names) => ClientOutbound::Banners(create_banners(msg.seq, names)),
            Err(e) => {
                error!("listing banners failed: {}", e);
                ClientOutbound::Error(create_error(
                    msg.seq,
                    ErrorCode::Internal,
                    "Failed to list banners.",
                ))
            }
        },
        Ok(ParsedMessage::Unknown(msg)) => ClientOutbound::Error(create_error(
            msg.seq,
            ErrorCode::InvalidMessage,
            "Unknown message type",
        )),
        Err(e) => {
            let seq = extract_seq_best_effort(line).unwrap_or(0);
            ClientOutbound::Error(create_error(
                seq,
                ErrorCode::InvalidMessage,
                &format!("Invalid message: {}", e),
            ))
        }
    }
}

/// Start the TCP server
pub async fn run_server(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    if ServerState::is_disabled() {
        info!("render server disabled via BANNER_DISABLED");
        return Ok(());
    }

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    let bound = listener.local_addr()?;
    info!("render server listening on {}", bound);
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let state = Arc::new(ServerState::new(config));
    let mut client_id_counter = 0usize;

    // Accept incoming connections
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;

        info!("client {} connected from {}", client_id, addr);

        let state_clone = Arc::clone(&state);

        // Spawn task to handle this client
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, state_clone).await {
                error!("client {} error: {}", client_id, e);
            }
            info!("client {} disconnected", client_id);
        });
    }
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    state: Arc<ServerState>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = tokio::io::split(socket);
    let mut reader = BufReader::new(reader);
    let max_line = state.config().max_line_bytes;

    // Channel to send messages to this client
    let (tx, mut rx) = mpsc::unbounded_channel::<ClientOutbound>();

    // Spawn task to write messages to client
    let write_task = tokio::spawn(async move {
        let mut buf: Vec<u8> = Vec::with_capacity(4096);
        while let Some(msg) = rx.recv().await {
            buf.clear();
            let encoded = match &msg {
                ClientOutbound::Art(m) => serde_json::to_writer(&mut buf, m),
                ClientOutbound::Banners(m) => serde_json::to_writer(&mut buf, m),
                ClientOutbound::Error(m) => serde_json::to_writer(&mut buf, m),
            };
            if encoded.is_err() {
                continue;
            }
            buf.push(b'\n');
            if writer.write_all(&buf).await.is_err() {
                break;
            }
            if writer.flush().await.is_err() {
                break;
            }
        }
    });

    // Handle incoming messages
    let mut buf: Vec<u8> = Vec::new();

    loop {
        buf.clear();
        let bytes_read = (&mut reader)
            .take(max_line as u64 + 1)
            .read_until(b'\n', &mut buf)
            .await?;

        if bytes_read == 0 {
            // Client disconnected
            break;
        }

        if !buf.ends_with(b"\n") && bytes_read > max_line {
            let seq = extract_seq_best_effort(&String::from_utf8_lossy(&buf)).unwrap_or(0);
            let _ = tx.send(ClientOutbound::Error(create_error(
                seq,
                ErrorCode::LineTooLong,
                &format!("Request line exceeds {} bytes", max_line),
            )));
            discard_rest_of_line(&mut reader, max_line).await?;
            continue;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(_) => {
                let seq = extract_seq_best_effort(&String::from_utf8_lossy(&buf)).unwrap_or(0);
                debug!("client {} sent a non-UTF-8 line (seq {})", client_id, seq);
                let _ = tx.send(ClientOutbound::Error(create_error(
                    seq,
                    ErrorCode::InvalidMessage,
                    "Request line is not valid UTF-8",
                )));
                continue;
            }
        };

        let trimmed = line.trim_end_matches(['\n', '\r']).trim();
        if trimmed.is_empty() {
            continue;
        }

        let reply = handle_line(&state, trimmed);
        debug!("client {} seq {} answered", client_id, reply.seq());
        if tx.send(reply).is_err() {
            break;
        }
    }

    drop(tx);
    let _ = write_task.await;
    Ok(())
}

async fn discard_rest_of_line<R>(reader: &mut R, chunk: usize) -> anyhow::Result<()>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let mut scratch = Vec::new();
    loop {
        scratch.clear();
        let n = (&mut *reader)
            .take(chunk as u64 + 1)
            .read_until(b'\n', &mut scratch)
            .await?;
        if n == 0 || scratch.ends_with(b"\n") {
            return Ok(());
        }
    }
}

/// Fail fast when `host:port` cannot be bound.
pub fn check_tcp_listen_available(host: &str, port: u16) -> std::io::Result<()> {
    std::net::TcpListener::bind((host, port)).map(drop)
}
