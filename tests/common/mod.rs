//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use spa_dev_server::config::DevServerConfig;
use spa_dev_server::http::HttpServer;
use spa_dev_server::lifecycle::Shutdown;
use spa_dev_server::proxy::Forwarder;
use spa_dev_server::routing::RouteTable;
use spa_dev_server::views;

/// Request head captured by a mock upstream.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub method: String,
    /// Request target as sent, including any query string.
    pub path: String,
    pub headers: Vec<(String, String)>,
}

#[allow(dead_code)]
impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Start a mock upstream that records request heads and answers with a
/// programmable status/body.
#[allow(dead_code)]
pub async fn start_recording_upstream<F, Fut>(
    respond: F,
) -> (SocketAddr, Arc<Mutex<Vec<RecordedRequest>>>)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorded = Arc::new(Mutex::new(Vec::new()));

    let log = recorded.clone();
    let respond = Arc::new(respond);
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let respond = respond.clone();
                    let log = log.clone();
                    tokio::spawn(async move {
                        let raw = read_request(&mut socket).await;
                        if let Some(request) = parse_head(&raw) {
                            log.lock().unwrap().push(request);
                        }

                        let (status, body) = respond().await;
                        let status_text = match status {
                            200 => "200 OK",
                            302 => "302 Found",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nContent-Type: text/plain\r\nX-Upstream: mock\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, recorded)
}

/// Read a full request (head + body) so the peer never sees its upload cut
/// short. Handles both content-length and chunked uploads.
async fn read_request(socket: &mut tokio::net::TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        if let Some(head_end) = find_head_end(&buf) {
            let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
            let complete = if head.contains("transfer-encoding: chunked") {
                buf.ends_with(b"0\r\n\r\n")
            } else if let Some(len) = content_length(&head) {
                buf.len() >= head_end + 4 + len
            } else {
                true
            };
            if complete {
                return buf;
            }
        }

        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return buf,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn content_length(head: &str) -> Option<usize> {
    head.lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse().ok())
}

fn parse_head(raw: &[u8]) -> Option<RecordedRequest> {
    let head_end = find_head_end(raw)?;
    let head = String::from_utf8_lossy(&raw[..head_end]).to_string();
    let mut lines = head.lines();

    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let headers = lines
        .filter_map(|line| {
            line.split_once(':')
                .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
        })
        .collect();

    Some(RecordedRequest {
        method,
        path,
        headers,
    })
}

/// Spawn a dev server on an ephemeral port. The returned `Shutdown` stops it.
#[allow(dead_code)]
pub async fn spawn_server(config: DevServerConfig) -> (SocketAddr, Shutdown) {
    let registry = views::default_registry();
    let table = Arc::new(RouteTable::from_config(config.routes.clone(), &registry).unwrap());
    let forwarder = Arc::new(Forwarder::from_config(&config.forward).unwrap());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config, table, forwarder);
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}
