//! Shared test fixtures
//!
//! An in-process HTTP asset server and stub initializers for exercising
//! the bootstrap pipeline without a real deployment.

use async_trait::async_trait;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use module_bootstrap::{BinaryPayload, InitializeError, Initializer};

/// Minimal HTTP server serving fixed byte bodies for configured paths
///
/// Closes each connection after one response, so the accepted-connection
/// count equals the number of retrievals performed against it.
pub struct StubAssetServer {
    addr: SocketAddr,
    connections: Arc<AtomicUsize>,
    accept_handle: JoinHandle<()>,
}

impl StubAssetServer {
    /// Bind an ephemeral port and serve `routes` (path, status, body)
    pub async fn serve(routes: Vec<(&str, u16, Vec<u8>)>) -> Self {
        let routes: Arc<HashMap<String, (u16, Vec<u8>)>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, status, body)| (path.to_string(), (status, body)))
                .collect(),
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub asset server");
        let addr = listener.local_addr().expect("stub asset server addr");
        let connections = Arc::new(AtomicUsize::new(0));

        let accepted = Arc::clone(&connections);
        let accept_handle = tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((stream, _)) => {
                        accepted.fetch_add(1, Ordering::SeqCst);
                        let routes = Arc::clone(&routes);
                        tokio::spawn(handle_connection(stream, routes));
                    }
                    Err(_) => break,
                }
            }
        });

        Self {
            addr,
            connections,
            accept_handle,
        }
    }

    /// Absolute URL for `path` on this server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Base URL for resolving relative references
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Number of connections accepted (one per retrieval)
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

impl Drop for StubAssetServer {
    fn drop(&mut self) {
        self.accept_handle.abort();
    }
}

async fn handle_connection(mut stream: TcpStream, routes: Arc<HashMap<String, (u16, Vec<u8>)>>) {
    let mut request = Vec::new();
    let mut buffer = [0u8; 1024];

    // Read the request head; GET requests carry no body
    loop {
        match stream.read(&mut buffer).await {
            Ok(0) => return,
            Ok(n) => {
                request.extend_from_slice(&buffer[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            Err(_) => return,
        }
    }

    let head = String::from_utf8_lossy(&request);
    let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();

    let (status, body) = routes
        .get(&path)
        .cloned()
        .unwrap_or((404, b"not found".to_vec()));
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Error",
    };

    let header = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason,
        body.len()
    );
    let _ = stream.write_all(header.as_bytes()).await;
    let _ = stream.write_all(&body).await;
    let _ = stream.shutdown().await;
}

/// Opaque handle returned by the stub initializers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubHandle {
    pub payload_len: usize,
}

/// Initializer stub that accepts any payload and counts invocations
pub struct CountingInitializer {
    calls: Arc<AtomicUsize>,
}

impl CountingInitializer {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Initializer for CountingInitializer {
    type Handle = StubHandle;

    async fn initialize(&self, payload: BinaryPayload) -> Result<StubHandle, InitializeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(StubHandle {
            payload_len: payload.len(),
        })
    }
}

/// Initializer stub that rejects every payload as malformed
pub struct RejectingInitializer {
    calls: Arc<AtomicUsize>,
}

impl RejectingInitializer {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Initializer for RejectingInitializer {
    type Handle = StubHandle;

    async fn initialize(&self, payload: BinaryPayload) -> Result<StubHandle, InitializeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(InitializeError::MalformedBinary(format!(
            "{} bytes do not form a valid module",
            payload.len()
        )))
    }
}
