//! Length-prefixed JSON frames.
//!
//! ```text
//! +----------------+------------------+
//! | length (4 BE)  |  JSON payload    |
//! +----------------+------------------+
//! ```
//!
//! A zero length or one above [`MAX_MESSAGE_SIZE`] is rejected before the
//! payload is read.

use serde::{Serialize, de::DeserializeOwned};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::MAX_MESSAGE_SIZE;
use crate::error::{ProtocolError, ProtocolResult};

/// Serializes `message` into one complete frame.
///
/// ```rust
/// use calbridge_protocol::{encode_message, Envelope, NativeCall, NativeMethod};
///
/// let envelope = Envelope::new("req-1", NativeCall::bare(NativeMethod::GetCalendars));
/// let frame = encode_message(&envelope).unwrap();
/// assert_eq!(u32::from_be_bytes(frame[..4].try_into().unwrap()) as usize, frame.len() - 4);
/// ```
pub fn encode_message<T: Serialize>(message: &T) -> ProtocolResult<Vec<u8>> {
    let json = serde_json::to_vec(message)?;
    let size = u32::try_from(json.len()).unwrap_or(u32::MAX);
    if size > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge {
            size,
            max: MAX_MESSAGE_SIZE,
        });
    }

    let mut frame = Vec::with_capacity(4 + json.len());
    frame.extend_from_slice(&size.to_be_bytes());
    frame.extend(json);
    Ok(frame)
}

/// Validates a length prefix and returns the payload size it announces.
pub fn payload_len(prefix: [u8; 4]) -> ProtocolResult<usize> {
    match u32::from_be_bytes(prefix) {
        0 => Err(ProtocolError::EmptyMessage),
        size if size > MAX_MESSAGE_SIZE => Err(ProtocolError::MessageTooLarge {
            size,
            max: MAX_MESSAGE_SIZE,
        }),
        size => Ok(size as usize),
    }
}

/// Returns the size of the frame at the head of `buf`, prefix included, or
/// `None` while it is still incomplete.
pub fn frame_len(buf: &[u8]) -> ProtocolResult<Option<usize>> {
    let Some((prefix, rest)) = buf.split_first_chunk::<4>() else {
        return Ok(None);
    };
    let len = payload_len(*prefix)?;
    Ok((rest.len() >= len).then_some(4 + len))
}

/// Parses one complete frame held in memory.
///
/// Trailing bytes after the announced payload are ignored.
pub fn decode_message<T: DeserializeOwned>(frame: &[u8]) -> ProtocolResult<T> {
    let Some((prefix, rest)) = frame.split_first_chunk::<4>() else {
        return Err(ProtocolError::IncompleteMessage {
            expected: 4,
            received: frame.len(),
        });
    };
    let len = payload_len(*prefix)?;
    let Some(payload) = rest.get(..len) else {
        return Err(ProtocolError::IncompleteMessage {
            expected: 4 + len,
            received: frame.len(),
        });
    };
    Ok(serde_json::from_slice(payload)?)
}

/// Writes `message` as one frame and flushes.
pub async fn write_frame<W, T>(writer: &mut W, message: &T) -> ProtocolResult<()>
where
    W: AsyncWrite + Unpin + ?Sized,
    T: Serialize,
{
    let frame = encode_message(message)?;
    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads the next frame from `reader`.
///
/// Returns `Ok(None)` when the stream ends cleanly between frames. A stream
/// ending inside a frame is an [`ProtocolError::IncompleteMessage`].
pub async fn read_frame<R, T>(reader: &mut R) -> ProtocolResult<Option<T>>
where
    R: AsyncRead + Unpin + ?Sized,
    T: DeserializeOwned,
{
    let mut prefix = [0u8; 4];
    let got = read_full(reader, &mut prefix).await?;
    if got == 0 {
        return Ok(None);
    }
    if got < prefix.len() {
        return Err(ProtocolError::IncompleteMessage {
            expected: 4,
            received: got,
        });
    }

    let len = payload_len(prefix)?;
    let mut payload = vec![0u8; len];
    let got = read_full(reader, &mut payload).await?;
    if got < len {
        return Err(ProtocolError::IncompleteMessage {
            expected: 4 + len,
            received: 4 + got,
        });
    }
    Ok(Some(serde_json::from_slice(&payload)?))
}

/// Fills `buf` unless the stream ends first; returns the bytes read.
async fn read_full<R>(reader: &mut R, buf: &mut [u8]) -> ProtocolResult<usize>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]).await? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}
