//! Wire types for talking to a native calendar provider.
//!
//! The bridge never touches calendar storage itself. Each operation becomes
//! one [`NativeCall`] naming an entry point of the native capability table
//! plus positional JSON arguments, answered by one [`NativeReply`].
//!
//! An out-of-process provider is driven over any async byte stream with
//! [`write_frame`] and [`read_frame`]. A frame is a big-endian `u32` length
//! followed by that many bytes of JSON, at most [`MAX_MESSAGE_SIZE`]. Calls
//! and replies travel inside an [`Envelope`] carrying the
//! [`PROTOCOL_VERSION`] and a request id the reply echoes back.
//!
//! # Example
//!
//! ```rust
//! use calbridge_protocol::{Envelope, NativeCall, NativeMethod, encode_message, decode_message};
//!
//! let call = Envelope::new("req-123", NativeCall::bare(NativeMethod::GetSources));
//! let bytes = encode_message(&call).unwrap();
//! let decoded: Envelope<NativeCall> = decode_message(&bytes).unwrap();
//! assert_eq!(decoded, call);
//! ```

mod error;
mod framing;
mod types;

pub use error::{ProtocolError, ProtocolResult};
pub use framing::{
    decode_message, encode_message, frame_len, payload_len, read_frame, write_frame,
};
pub use types::{Envelope, NativeCall, NativeMethod, NativeReply};

/// Version stamped on every envelope; replies with another value are rejected.
pub const PROTOCOL_VERSION: &str = "1";

/// Largest accepted frame payload, 1 MiB.
pub const MAX_MESSAGE_SIZE: u32 = 1024 * 1024;
