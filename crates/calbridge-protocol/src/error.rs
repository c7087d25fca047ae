//! Wire-level failures.

use thiserror::Error;

/// Result type for framing and parsing.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// A frame could not be produced, carried or understood.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("frame of {size} bytes exceeds the {max} byte limit")]
    MessageTooLarge { size: u32, max: u32 },

    #[error("malformed JSON frame: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The peer answered with an envelope of another protocol version.
    #[error("native host speaks protocol version {0:?}")]
    UnsupportedVersion(String),

    /// Name not in the native method table.
    #[error("unknown native method: {0}")]
    UnknownMethod(String),

    #[error("stream I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended inside a frame.
    #[error("stream ended inside a frame: expected {expected} bytes, got {received}")]
    IncompleteMessage { expected: usize, received: usize },

    #[error("frame announces an empty payload")]
    EmptyMessage,

    /// The peer closed the stream while a reply was outstanding.
    #[error("native host closed the stream")]
    Closed,

    /// A reply carried a request id no call is waiting for.
    #[error("reply for unknown request {0:?}")]
    UnexpectedReply(String),

    /// An earlier failure left the stream between frames unknown.
    #[error("stream to the native host is out of sync after an earlier failure")]
    Desynchronized,
}
