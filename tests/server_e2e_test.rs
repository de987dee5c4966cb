use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

use banner_art::core::{FontConfig, GlyphArt, GlyphTable, LibraryConfig};
use banner_art::server::protocol::create_render;
use banner_art::server::server::{run_server, ServerConfig};
use banner_art::types::ART_HEIGHT;

fn write_hash_font(dir: &std::path::Path) {
    let table: GlyphTable = [('A', GlyphArt::new(["#"; ART_HEIGHT]))].into_iter().collect();
    std::fs::write(
        dir.join("hash.txt"),
        table.to_font_source(&FontConfig::default()),
    )
    .unwrap();
}

#[tokio::test]
async fn server_render_list_and_errors() {
    let dir = tempfile::tempdir().unwrap();
    write_hash_font(dir.path());

    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        library: LibraryConfig::with_fonts_dir(dir.path()),
        max_line_bytes: 4096,
    };

    let (ready_tx, ready_rx) = oneshot::channel();
    let server_handle = tokio::spawn(async move {
        let _ = run_server(config, Some(ready_tx)).await;
    });

    let addr = tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .expect("server did not signal ready")
        .expect("ready channel dropped");

    let stream = TcpStream::connect(addr).await.expect("connect failed");
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    // render
    let req = create_render(1, "AZ", "hash");
    let req_line = serde_json::to_string(&req).unwrap();
    write_half.write_all(req_line.as_bytes()).await.unwrap();
    write_half.write_all(b"\n").await.unwrap();
    write_half.flush().await.unwrap();

    let art_line = tokio::time::timeout(Duration::from_secs(2), lines.next_line())
        .await
        .unwrap()
        .unwrap()
        .expect("expected art line");
    let art_v: serde_json::Value = serde_json::from_str(&art_line).unwrap();
    assert_eq!(art_v["type"], "art");
    assert_eq!(art_v["seq"], 1);
    assert_eq!(
        art_v["art"].as_str().unwrap(),
        vec!["# "; ART_HEIGHT].join("\n")
    );

    // list
    write_half
        .write_all(b"{\"type\":\"list\",\"seq\":2}\n")
        .await
        .unwrap();
    let list_line = tokio::time::timeout(Duration::from_secs(2), lines.next_line())
        .await
        .unwrap()
        .unwrap()
        .expect("expected banners line");
    let list_v: serde_json::Value = serde_json::from_str(&list_line).unwrap();
    assert_eq!(list_v["type"], "banners");
    assert_eq!(list_v["banners"], serde_json::json!(["hash"]));

    // non-ASCII text
    let bad = create_render(3, "caf\u{e9}", "hash");
    let bad_line = serde_json::to_string(&bad).unwrap();
    write_half.write_all(bad_line.as_bytes()).await.unwrap();
    write_half.write_all(b"\n").await.unwrap();
    let err_line = tokio::time::timeout(Duration::from_secs(2), lines.next_line())
        .await
        .unwrap()
        .unwrap()
        .expect("expected error line");
    let err_v: serde_json::Value = serde_json::from_str(&err_line).unwrap();
    assert_eq!(err_v["type"], "error");
    assert_eq!(err_v["seq"], 3);
    assert_eq!(err_v["code"], "bad_request");
    assert_eq!(err_v["message"], "Text contains non-ASCII characters.");

    // unknown banner is a generation failure
    let missing = create_render(4, "A", "missing");
    let missing_line = serde_json::to_string(&missing).unwrap();
    write_half.write_all(missing_line.as_bytes()).await.unwrap();
    write_half.write_all(b"\n").await.unwrap();
    let err_line = tokio::time::timeout(Duration::from_secs(2), lines.next_line())
        .await
        .unwrap()
        .unwrap()
        .expect("expected error line");
    let err_v: serde_json::Value = serde_json::from_str(&err_line).unwrap();
    assert_eq!(err_v["code"], "internal");
    assert_eq!(err_v["message"], "Failed to generate art.");

    server_handle.abort();
}

#[tokio::test]
async fn server_rejects_oversized_lines_and_keeps_going() {
    let dir = tempfile::tempdir().unwrap();
    write_hash_font(dir.path());

    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        library: LibraryConfig::with_fonts_dir(dir.path()),
        max_line_bytes: 64,
    };

    let (ready_tx, ready_rx) = oneshot::channel();
    let server_handle = tokio::spawn(async move {
        let _ = run_server(config, Some(ready_tx)).await;
    });
    let addr = tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .unwrap()
        .unwrap();

    let stream = TcpStream::connect(addr).await.unwrap();
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    let long = format!(
        "{{\"type\":\"render\",\"seq\":7,\"text\":\"{}\",\"banner\":\"hash\"}}\n",
        "A".repeat(300)
    );
    write_half.write_all(long.as_bytes()).await.unwrap();

    let line = tokio::time::timeout(Duration::from_secs(2), lines.next_line())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let v: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(v["code"], "line_too_long");
    assert_eq!(v["seq"], 7);

    // The connection is still usable after the oversized line.
    write_half
        .write_all(b"{\"type\":\"render\",\"seq\":8,\"text\":\"A\",\"banner\":\"hash\"}\n")
        .await
        .unwrap();
    let line = tokio::time::timeout(Duration::from_secs(2), lines.next_line())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let v: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(v["type"], "art");
    assert_eq!(v["seq"], 8);

    server_handle.abort();
}

async fn next_json<R>(lines: &mut tokio::io::Lines<R>) -> serde_json::Value
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    let line = tokio::time::timeout(Duration::from_secs(2), lines.next_line())
        .await
        .expect("timed out waiting for reply")
        .unwrap()
        .expect("connection closed");
    serde_json::from_str(&line).unwrap()
}

#[tokio::test]
async fn server_answers_malformed_bytes_and_keeps_going() {
    let dir = tempfile::tempdir().unwrap();
    write_hash_font(dir.path());

    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        library: LibraryConfig::with_fonts_dir(dir.path()),
        max_line_bytes: 64,
    };

    let (ready_tx, ready_rx) = oneshot::channel();
    let server_handle = tokio::spawn(async move {
        let _ = run_server(config, Some(ready_tx)).await;
    });
    let addr = tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .unwrap()
        .unwrap();

    let stream = TcpStream::connect(addr).await.unwrap();
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    // Oversized line whose limit falls inside a two-byte character.
    let mut long = String::from("{\"type\":\"render\",\"seq\":9,\"text\":\"");
    while long.len() < 64 {
        long.push('A');
    }
    long.push('\u{e9}');
    long.push_str("AAAA\",\"banner\":\"hash\"}\n");
    write_half.write_all(long.as_bytes()).await.unwrap();

    let v = next_json(&mut lines).await;
    assert_eq!(v["code"], "line_too_long");
    assert_eq!(v["seq"], 9);

    // Invalid UTF-8 inside an otherwise well-formed request.
    write_half
        .write_all(b"{\"type\":\"render\",\"seq\":3,\"text\":\"caf\xFF\",\"banner\":\"hash\"}\n")
        .await
        .unwrap();

    let v = next_json(&mut lines).await;
    assert_eq!(v["type"], "error");
    assert_eq!(v["code"], "invalid_message");
    assert_eq!(v["seq"], 3);

    write_half
        .write_all(b"{\"type\":\"render\",\"seq\":8,\"text\":\"A\",\"banner\":\"hash\"}\n")
        .await
        .unwrap();

    let v = next_json(&mut lines).await;
    assert_eq!(v["type"], "art");
    assert_eq!(v["seq"], 8);

    server_handle.abort();
}
