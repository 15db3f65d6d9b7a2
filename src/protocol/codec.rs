//! Framing
//!
//! Messages are newline-delimited JSON: one object per line. Frames are read
//! through a size cap so a misbehaving peer cannot make us buffer without bound.

use crate::error::{RecommenderError, Result, TransportError};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

pub const MAX_FRAME_BYTES: u64 = 256 * 1024 * 1024;

/// Serializes `message` as one JSON line and flushes it.
pub async fn write_frame<W, T>(writer: &mut W, message: &T) -> Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut buffer = serde_json::to_vec(message)?;
    buffer.push(b'\n');

    writer.write_all(&buffer).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads the next JSON line and decodes it.
///
/// A peer that closes the stream before sending anything yields
/// `TransportError::ConnectionClosed`. A final frame without a trailing newline is
/// still accepted, as long as the peer closed its write side after it.
pub async fn read_frame<R, T>(reader: &mut R) -> Result<T>
where
    R: AsyncBufRead + Unpin,
    T: DeserializeOwned,
{
    read_frame_limited(reader, MAX_FRAME_BYTES).await
}

pub(crate) async fn read_frame_limited<R, T>(reader: &mut R, limit: u64) -> Result<T>
where
    R: AsyncBufRead + Unpin,
    T: DeserializeOwned,
{
    let mut line = Vec::new();
    let read = (&mut *reader).take(limit).read_until(b'\n', &mut line).await?;

    if read == 0 {
        return Err(TransportError::ConnectionClosed.into());
    }

    if read as u64 >= limit && line.last() != Some(&b'\n') {
        return Err(RecommenderError::Decode(format!(
            "frame exceeds {} bytes",
            limit
        )));
    }

    Ok(serde_json::from_slice(trim_newline(&line))?)
}

fn trim_newline(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
