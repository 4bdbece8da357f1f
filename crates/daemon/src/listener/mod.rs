// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connection supervisor.
//!
//! The Listener accepts TCP connections and spawns one task per connection.
//! Each task reads a single framed request, answers it with a single framed
//! response and closes the stream. Every failure inside a connection is
//! turned into a textual response; nothing propagates to the accept loop.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use rectify_wire::{ProtocolError, ReadOutcome};
use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::command::{Dispatcher, Request, UNEXPECTED_FAILURE};

/// Reply when no length prefix (or an empty payload) was received.
pub const INVALID_PREFIX: &[u8] = b"invalid prefix";

/// Reply when the payload is not a non-empty JSON object.
pub const INVALID_JSON: &[u8] = b"invalid json data";

/// Pause after a failed accept so resource exhaustion does not spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Shared, read-only context for all connection tasks.
#[derive(Debug)]
pub struct ListenCtx {
    pub dispatcher: Dispatcher,
    /// Bound on each read while assembling a request.
    pub read_timeout: Duration,
}

/// Listener task for accepting TCP connections.
pub struct Listener {
    tcp: TcpListener,
    ctx: Arc<ListenCtx>,
}

/// Errors from connection handling.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Listener {
    pub fn new(tcp: TcpListener, ctx: Arc<ListenCtx>) -> Self {
        Self { tcp, ctx }
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.tcp.local_addr()
    }

    /// Accept connections until `shutdown` is cancelled.
    ///
    /// Connections already accepted run to completion on their own tasks.
    pub async fn run(self, shutdown: CancellationToken) {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    debug!("listener shutting down");
                    break;
                }
                result = self.tcp.accept() => {
                    match result {
                        Ok((stream, peer)) => {
                            let ctx = Arc::clone(&self.ctx);
                            tokio::spawn(async move {
                                let (reader, writer) = stream.into_split();
                                if let Err(e) = handle_connection(reader, writer, peer, ctx).await {
                                    log_connection_error(peer, e);
                                }
                            });
                        }
                        Err(e) => {
                            error!("TCP accept error: {}", e);
                            tokio::time::sleep(ACCEPT_BACKOFF).await;
                        }
                    }
                }
            }
        }
    }
}

fn log_connection_error(peer: SocketAddr, e: ConnectionError) {
    match e {
        ConnectionError::Io(ref io) | ConnectionError::Protocol(ProtocolError::Io(ref io))
            if matches!(
                io.kind(),
                std::io::ErrorKind::BrokenPipe | std::io::ErrorKind::ConnectionReset
            ) =>
        {
            debug!(%peer, "client disconnected before the response was sent")
        }
        _ => error!(%peer, "Connection error: {}", e),
    }
}

/// Handle a single client connection: read, respond, close.
///
/// Generic over reader/writer types so tests can drive it with in-memory
/// streams. Both halves are owned here and dropped on return, which closes
/// the connection exactly once on every path.
pub(crate) async fn handle_connection<R, W>(
    mut reader: R,
    mut writer: W,
    peer: SocketAddr,
    ctx: Arc<ListenCtx>,
) -> Result<(), ConnectionError>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    info!(%peer, "received");

    let outcome = match rectify_wire::read_frame(&mut reader, ctx.read_timeout).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(%peer, error = %e, "failed to read request");
            ReadOutcome::Empty
        }
    };

    let message = respond(outcome, &ctx).await;
    debug!(%peer, bytes = message.len(), "sending response");

    rectify_wire::write_frame(&mut writer, &message).await?;
    writer.shutdown().await?;

    info!(%peer, "served");
    Ok(())
}

/// Turn whatever arrived on the wire into a response payload.
async fn respond(outcome: ReadOutcome, ctx: &Arc<ListenCtx>) -> Vec<u8> {
    let payload = match outcome {
        ReadOutcome::Empty => {
            info!("empty length prefix");
            return INVALID_PREFIX.to_vec();
        }
        ReadOutcome::MalformedPrefix(raw) => {
            info!(?raw, "invalid length prefix");
            return INVALID_PREFIX.to_vec();
        }
        ReadOutcome::Truncated { expected, payload } => {
            debug!(expected, received = payload.len(), "request truncated");
            payload
        }
        ReadOutcome::Complete(payload) => payload,
    };

    if payload.is_empty() {
        return INVALID_PREFIX.to_vec();
    }
    let Some(request) = parse_request(&payload) else {
        return INVALID_JSON.to_vec();
    };

    // Handlers are CPU-bound; a panic inside one surfaces here as a JoinError.
    let ctx = Arc::clone(ctx);
    match tokio::task::spawn_blocking(move || ctx.dispatcher.respond(request)).await {
        Ok(message) => message,
        Err(e) => {
            warn!(error = %e, "unexpected exception");
            UNEXPECTED_FAILURE.as_bytes().to_vec()
        }
    }
}

/// Parse a payload into a non-empty JSON object.
fn parse_request(payload: &[u8]) -> Option<Request> {
    match serde_json::from_slice::<Value>(payload) {
        Ok(Value::Object(map)) if !map.is_empty() => Some(map),
        Ok(_) => {
            debug!("request is not a non-empty object");
            None
        }
        Err(e) => {
            debug!(error = %e, "invalid json");
            None
        }
    }
}

#[cfg(test)]
#[path = "../listener_tests.rs"]
mod tests;
