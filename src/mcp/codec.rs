//! Line codec for the MCP stdio framing.
//!
//! Message format:
//! ```text
//! ┌──────────────────────────────┬──────┐
//! │   JSON-RPC message (UTF-8)   │  \n  │
//! └──────────────────────────────┴──────┘
//! ```
//! One JSON object per line. A trailing `\r` is stripped. The message itself
//! must not contain a raw newline.

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// One line read from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Line contents without the terminator. May be blank.
    Message(Vec<u8>),
    /// The line exceeded the size limit and was discarded.
    Oversized,
}

/// Read one line from the stream.
///
/// Returns `None` on clean EOF. A final line without a terminator is still
/// returned. Lines longer than `max_message_bytes` are consumed up to their
/// newline and reported as [`Frame::Oversized`] without being buffered.
pub async fn read_message<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    max_message_bytes: usize,
) -> std::io::Result<Option<Frame>> {
    let mut line = Vec::new();
    let mut oversized = false;
    let mut seen_any = false;

    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            if !seen_any {
                return Ok(None);
            }
            break;
        }
        seen_any = true;

        let newline = available.iter().position(|b| *b == b'\n');
        let (content_len, consumed) = match newline {
            Some(i) => (i, i + 1),
            None => (available.len(), available.len()),
        };

        if !oversized {
            if line.len() + content_len > max_message_bytes {
                oversized = true;
                line = Vec::new();
            } else {
                line.extend_from_slice(&available[..content_len]);
            }
        }

        reader.consume(consumed);
        if newline.is_some() {
            break;
        }
    }

    if oversized {
        return Ok(Some(Frame::Oversized));
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    Ok(Some(Frame::Message(line)))
}

/// Write one JSON message followed by a newline, then flush.
pub async fn write_message<W, T>(writer: &mut W, message: &T) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize + ?Sized,
{
    let mut payload = serde_json::to_vec(message)?;
    payload.push(b'\n');
    writer.write_all(&payload).await?;
    writer.flush().await?;
    Ok(())
}
