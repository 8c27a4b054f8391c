//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

/// Start a mock upstream returning a fixed status line, content type, and
/// body on every connection. Returns the bound address.
pub async fn start_mock_upstream(
    status_line: &'static str,
    content_type: &'static str,
    body: Vec<u8>,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let body = body.clone();
                    tokio::spawn(async move {
                        let header = format!(
                            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                            status_line,
                            content_type,
                            body.len()
                        );
                        let _ = socket.write_all(header.as_bytes()).await;
                        let _ = socket.write_all(&body).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock upstream that dribbles the body out in `chunk`-sized writes
/// with a pause between each, so the reader observes a multi-chunk stream.
#[allow(dead_code)]
pub async fn start_dribble_upstream(
    content_type: &'static str,
    body: Vec<u8>,
    chunk: usize,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let body = body.clone();
                    tokio::spawn(async move {
                        let header = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                            content_type,
                            body.len()
                        );
                        if socket.write_all(header.as_bytes()).await.is_err() {
                            return;
                        }
                        let _ = socket.flush().await;
                        for part in body.chunks(chunk) {
                            // The reader hangs up early on bounded actions;
                            // a failed write just ends the dribble.
                            if socket.write_all(part).await.is_err() {
                                return;
                            }
                            let _ = socket.flush().await;
                            tokio::time::sleep(Duration::from_millis(20)).await;
                        }
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
