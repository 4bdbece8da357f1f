// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Size of the big-endian length prefix in bytes.
pub const PREFIX_LEN: usize = 4;

/// Per-read timeout used while assembling a payload.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Upper bound on a single read into the payload buffer.
const CHUNK_SIZE: usize = 64 * 1024;

/// Cap on up-front allocation; a peer can declare up to 4 GiB.
const MAX_PREALLOC: usize = 1024 * 1024;

/// Errors from frame I/O.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Payload of {0} bytes does not fit a 32-bit length prefix")]
    TooLarge(usize),
}

/// What a single [`read_frame`] call managed to assemble.
///
/// Short payloads are not errors: a slow or stalled peer yields whatever
/// arrived before a read attempt timed out, and the caller decides what
/// to do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Nothing arrived before the stream closed or a read timed out.
    Empty,
    /// The stream ended or stalled inside the length prefix.
    MalformedPrefix(Vec<u8>),
    /// Exactly the declared number of payload bytes arrived.
    Complete(Vec<u8>),
    /// A read timed out or the stream ended before the declared length.
    Truncated { expected: usize, payload: Vec<u8> },
}

impl ReadOutcome {
    /// Payload bytes, empty when no prefix could be read.
    pub fn into_payload(self) -> Vec<u8> {
        match self {
            ReadOutcome::Empty | ReadOutcome::MalformedPrefix(_) => Vec::new(),
            ReadOutcome::Complete(payload) | ReadOutcome::Truncated { payload, .. } => payload,
        }
    }
}

/// Prepend the big-endian length prefix to `payload`.
pub fn encode_frame(payload: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    let len = u32::try_from(payload.len()).map_err(|_| ProtocolError::TooLarge(payload.len()))?;
    let mut frame = Vec::with_capacity(PREFIX_LEN + payload.len());
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

/// Read one length-prefixed frame.
///
/// Every read, prefix and payload alike, is bounded by `read_timeout`; the
/// first read that times out ends assembly.
pub async fn read_frame<R>(
    reader: &mut R,
    read_timeout: Duration,
) -> Result<ReadOutcome, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let mut prefix = [0u8; PREFIX_LEN];
    let mut filled = 0;
    while filled < PREFIX_LEN {
        match tokio::time::timeout(read_timeout, reader.read(&mut prefix[filled..])).await {
            Ok(Ok(0)) => break,
            Ok(Ok(n)) => filled += n,
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                debug!(received = filled, "prefix read timed out");
                break;
            }
        }
    }

    if filled == 0 {
        return Ok(ReadOutcome::Empty);
    }
    if filled < PREFIX_LEN {
        return Ok(ReadOutcome::MalformedPrefix(prefix[..filled].to_vec()));
    }

    let expected = u32::from_be_bytes(prefix) as usize;
    debug!(expected, "frame length");

    let mut payload = Vec::with_capacity(expected.min(MAX_PREALLOC));
    let mut chunk = vec![0u8; expected.clamp(1, CHUNK_SIZE)];
    while payload.len() < expected {
        let want = (expected - payload.len()).min(chunk.len());
        match tokio::time::timeout(read_timeout, reader.read(&mut chunk[..want])).await {
            Ok(Ok(0)) => {
                debug!(expected, received = payload.len(), "stream closed mid-payload");
                break;
            }
            Ok(Ok(n)) => payload.extend_from_slice(&chunk[..n]),
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                debug!(expected, received = payload.len(), "payload read timed out");
                break;
            }
        }
    }

    if payload.len() == expected {
        Ok(ReadOutcome::Complete(payload))
    } else {
        Ok(ReadOutcome::Truncated { expected, payload })
    }
}

/// Write `payload` as one frame and flush.
///
/// No write timeout: a peer that never drains its socket holds the caller.
pub async fn write_frame<W>(writer: &mut W, payload: &[u8]) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let frame = encode_frame(payload)?;
    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}
