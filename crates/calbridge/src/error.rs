//! Error types for bridge operations.
//!
//! [`NativeError`] is what the native provider (or the transport in front of
//! it) reports. [`BridgeError`] is what every bridge operation returns: it
//! adds the failures detected before a call crosses into native code.

use std::path::PathBuf;

use calbridge_core::Platform;
use calbridge_protocol::ProtocolError;
use thiserror::Error;

/// Code used for failures of the byte-stream transport itself.
pub const TRANSPORT_ERROR_CODE: &str = "ERR_BRIDGE_TRANSPORT";

/// A failure reported by the native provider.
///
/// The code and message are kept exactly as the native layer produced them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct NativeError {
    code: String,
    message: String,
}

impl NativeError {
    /// Creates a native error with the given code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Wraps a framing or I/O failure of the native transport.
    pub fn transport(err: &ProtocolError) -> Self {
        Self::new(TRANSPORT_ERROR_CODE, err.to_string())
    }

    /// Returns the native error code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the native error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if the failure happened in the transport, not the provider.
    pub fn is_transport(&self) -> bool {
        self.code == TRANSPORT_ERROR_CODE
    }
}

/// Result type for raw native invocations.
pub type NativeResult<T> = Result<T, NativeError>;

/// An error returned by a bridge operation.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The native capability table has no entry for the operation.
    #[error("The method or property {module}.{operation} is not available on {platform}")]
    Unavailable {
        module: String,
        operation: &'static str,
        platform: Platform,
    },

    /// Caller-supplied arguments were rejected before dispatch.
    #[error("{message}")]
    InvalidArgument {
        operation: &'static str,
        message: String,
    },

    /// The native provider rejected the call.
    #[error(transparent)]
    Native(#[from] NativeError),

    /// The native provider answered with data of the wrong shape.
    #[error("{operation} received an invalid response: {source}")]
    InvalidResponse {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl BridgeError {
    /// Creates an argument error for the given operation.
    pub fn invalid_argument(operation: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation,
            message: message.into(),
        }
    }

    /// Returns the operation name the error is attributed to, if any.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Unavailable { operation, .. }
            | Self::InvalidArgument { operation, .. }
            | Self::InvalidResponse { operation, .. } => Some(operation),
            Self::Native(_) => None,
        }
    }

    /// Returns true if the operation is missing on this platform.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Returns true if the arguments were rejected before dispatch.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns the native error, if the provider rejected the call.
    pub fn as_native(&self) -> Option<&NativeError> {
        match self {
            Self::Native(err) => Some(err),
            _ => None,
        }
    }
}

/// A specialized Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Errors that can occur while loading a [`BridgeConfig`](crate::BridgeConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has the wrong shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is not acceptable.
    #[error("invalid config value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}
