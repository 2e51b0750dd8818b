//! Length-prefixed framing
//!
//! Each message travels as a 4-byte length in the host's native byte order
//! followed by exactly that many body bytes: `[i32 length][body]`.

use std::io::{ErrorKind, Read, Write};

use crate::error::{BtpdError, Result};

/// Size of the length prefix
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Maximum body size accepted in either direction (64 MB)
pub const MAX_FRAME_SIZE: usize = 64 * 1024 * 1024;

/// Prefix `payload` with its length
pub fn encode_frame(payload: &[u8]) -> Result<Vec<u8>> {
    let len = frame_len(payload.len())?;
    let mut frame = Vec::with_capacity(LENGTH_PREFIX_SIZE + payload.len());
    frame.extend_from_slice(&len.to_ne_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

/// Split one frame off the front of `buf`.
///
/// Returns the body and whatever follows it.
pub fn decode_frame(buf: &[u8]) -> Result<(&[u8], &[u8])> {
    if buf.len() < LENGTH_PREFIX_SIZE {
        return Err(BtpdError::TruncatedResponse(format!(
            "length prefix needs {} bytes, got {}",
            LENGTH_PREFIX_SIZE,
            buf.len()
        )));
    }

    let (prefix, rest) = buf.split_at(LENGTH_PREFIX_SIZE);
    let len = body_len(prefix)?;
    if rest.len() < len {
        return Err(BtpdError::TruncatedResponse(format!(
            "expected {} body bytes, got {}",
            len,
            rest.len()
        )));
    }
    Ok(rest.split_at(len))
}

/// Write one frame to a stream
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<()> {
    let len = frame_len(payload.len())?;
    writer.write_all(&len.to_ne_bytes())?;
    writer.write_all(payload)?;
    writer.flush()?;
    Ok(())
}

/// Read one frame from a stream (blocking)
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
    reader
        .read_exact(&mut prefix)
        .map_err(|e| truncated(e, "length prefix"))?;

    let len = body_len(&prefix)?;
    let mut body = vec![0u8; len];
    if len > 0 {
        reader
            .read_exact(&mut body)
            .map_err(|e| truncated(e, &format!("{}-byte body", len)))?;
    }
    Ok(body)
}

fn frame_len(len: usize) -> Result<i32> {
    if len > MAX_FRAME_SIZE {
        return Err(BtpdError::FrameTooLarge(len));
    }
    i32::try_from(len).map_err(|_| BtpdError::FrameTooLarge(len))
}

fn body_len(prefix: &[u8]) -> Result<usize> {
    let mut raw = [0u8; LENGTH_PREFIX_SIZE];
    raw.copy_from_slice(prefix);
    let len = i32::from_ne_bytes(raw);

    let len = usize::try_from(len)
        .map_err(|_| BtpdError::Protocol(format!("negative frame length {}", len)))?;
    if len > MAX_FRAME_SIZE {
        return Err(BtpdError::FrameTooLarge(len));
    }
    Ok(len)
}

fn truncated(err: std::io::Error, what: &str) -> BtpdError {
    if err.kind() == ErrorKind::UnexpectedEof {
        BtpdError::TruncatedResponse(format!("peer closed before {} arrived", what))
    } else {
        BtpdError::Io(err)
    }
}
