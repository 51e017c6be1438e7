//! MCP server — stdio transport and TCP accept loop.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use rmcp::model::ErrorCode;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tokio::net::TcpListener;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;

use super::codec::{read_message, write_message, Frame};
use super::protocol::Response;
use super::router::McpRouter;
use crate::types::TransportConfig;

/// MCP server wrapping the method router.
#[derive(Debug, Clone)]
pub struct McpServer {
    router: Arc<McpRouter>,
    transport: TransportConfig,
    cancel: CancellationToken,
}

impl McpServer {
    pub fn new(router: McpRouter, transport: TransportConfig) -> Self {
        Self {
            router: Arc::new(router),
            transport,
            cancel: CancellationToken::new(),
        }
    }

    /// Serve one client over stdin/stdout until EOF or shutdown.
    pub async fn serve_stdio(&self) -> std::io::Result<()> {
        tracing::info!("MCP server ready on stdio");
        let mut reader = BufReader::new(tokio::io::stdin());
        let mut writer = tokio::io::stdout();
        self.serve_connection(&mut reader, &mut writer, None).await
    }

    /// Bind `addr` and serve TCP clients until cancelled.
    pub async fn serve_tcp(&self, addr: SocketAddr) -> std::io::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve_listener(listener).await
    }

    /// Accept loop over an already-bound listener.
    pub async fn serve_listener(&self, listener: TcpListener) -> std::io::Result<()> {
        let max_connections = self.transport.max_connections;
        let conn_semaphore = Arc::new(Semaphore::new(max_connections));
        tracing::info!(
            "MCP server listening on {} (max_connections={})",
            listener.local_addr()?,
            max_connections,
        );

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!("MCP server shutting down");
                    break;
                }
                accept = listener.accept() => {
                    let (stream, peer) = accept?;

                    let permit = match conn_semaphore.clone().try_acquire_owned() {
                        Ok(permit) => permit,
                        Err(_) => {
                            tracing::warn!(
                                "Connection from {} rejected: at max_connections ({})",
                                peer,
                                max_connections,
                            );
                            drop(stream);
                            continue;
                        }
                    };

                    tracing::debug!(
                        "MCP connection from {} (active={})",
                        peer,
                        max_connections - conn_semaphore.available_permits(),
                    );
                    let server = self.clone();
                    tokio::spawn(async move {
                        if let Err(e) = server.handle_tcp(stream, permit).await {
                            tracing::warn!("Connection from {} error: {}", peer, e);
                        }
                    });
                }
            }
        }
        Ok(())
    }

    /// Request graceful shutdown of the accept loop and open connections.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    async fn handle_tcp(
        &self,
        stream: tokio::net::TcpStream,
        _permit: OwnedSemaphorePermit, // held for connection lifetime
    ) -> std::io::Result<()> {
        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);
        let read_timeout = Duration::from_secs(self.transport.read_timeout_secs);
        self.serve_connection(&mut reader, &mut writer, Some(read_timeout))
            .await
    }

    /// Read messages, route them, and write replies until EOF, shutdown, or
    /// an idle read exceeding `read_timeout`.
    pub async fn serve_connection<R, W>(
        &self,
        reader: &mut R,
        writer: &mut W,
        read_timeout: Option<Duration>,
    ) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let write_timeout = Duration::from_secs(self.transport.write_timeout_secs);
        let max_bytes = self.transport.max_message_bytes;

        loop {
            let read = async {
                match read_timeout {
                    Some(limit) => tokio::time::timeout(limit, read_message(reader, max_bytes))
                        .await
                        .ok(),
                    None => Some(read_message(reader, max_bytes).await),
                }
            };

            let frame = tokio::select! {
                _ = self.cancel.cancelled() => break,
                frame = read => frame,
            };

            let frame = match frame {
                None => {
                    tracing::debug!(
                        "Read timeout ({}s), dropping connection",
                        self.transport.read_timeout_secs
                    );
                    break;
                }
                Some(result) => match result? {
                    Some(f) => f,
                    None => break, // clean EOF
                },
            };

            let response = match frame {
                Frame::Oversized => Some(Response::error(
                    None,
                    ErrorCode::INVALID_REQUEST,
                    format!("Message exceeds {} bytes", max_bytes),
                )),
                Frame::Message(line) => self.router.handle_line(&line).await,
            };

            if let Some(response) = response {
                timed_write(writer, &response, write_timeout).await?;
            }
        }

        Ok(())
    }
}

/// Write a message with a timeout so slow consumers cannot hold a connection.
async fn timed_write<W: AsyncWrite + Unpin>(
    writer: &mut W,
    message: &Response,
    timeout: Duration,
) -> std::io::Result<()> {
    tokio::time::timeout(timeout, write_message(writer, message))
        .await
        .map_err(|_| {
            tracing::warn!("Write timeout ({}s), dropping connection", timeout.as_secs());
            std::io::Error::new(std::io::ErrorKind::TimedOut, "write timeout")
        })?
}
