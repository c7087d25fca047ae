//! Validating, normalizing bridge to native calendar providers.
//!
//! This crate sits between application code and a platform calendar
//! provider reached through a [`NativeBinding`]:
//!
//! - [`CalendarBridge`] - Validates arguments, reshapes payloads per platform
//!   and dispatches exactly one native call per operation
//! - [`NativeBinding`] - The capability table of native entry points
//! - [`FramedBinding`] - A binding driving a native host over a byte stream
//! - [`PermissionHook`] - Reactive handle on calendar/reminders permissions
//! - [`BridgeError`] - Failures raised before or by the native call
//!
//! # Architecture
//!
//! ```text
//!   application
//!       │
//!       ▼
//! ┌───────────────┐  PlatformProfile (denylists, required fields)
//! │ CalendarBridge│◄──────────────────────────────────────────────
//! └──────┬────────┘
//!        │ NativeCall { method, args }
//!        ▼
//! ┌───────────────┐     ┌──────────────────┐
//! │ NativeBinding │────►│ FramedBinding<S> │──► native host
//! └───────────────┘     └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use calbridge::{CalendarBridge, FramedBinding};
//! use calbridge_core::{EventPatch, Platform};
//!
//! async fn schedule(stream: tokio::net::UnixStream) -> calbridge::BridgeResult<String> {
//!     let binding = Arc::new(FramedBinding::new(stream, Platform::Android));
//!     let bridge = CalendarBridge::for_platform(binding, Platform::Android);
//!     let details = EventPatch::new()
//!         .with_title("Standup")
//!         .with_dates("2024-05-09T09:00:00.000Z", "2024-05-09T09:15:00.000Z");
//!     bridge.create_event("calendar-id", &details).await
//! }
//! ```

pub mod binding;
pub mod bridge;
pub mod config;
pub mod error;
pub mod framed;
pub mod normalize;
pub mod permissions;
pub mod profile;

// Re-export main types at crate root
pub use binding::{BoxFuture, NativeBinding, RecordingBinding, UnsupportedBinding};
pub use bridge::CalendarBridge;
pub use config::{BridgeConfig, DEFAULT_MODULE_NAME};
pub use error::{
    BridgeError, BridgeResult, ConfigError, NativeError, NativeResult, TRANSPORT_ERROR_CODE,
};
pub use framed::FramedBinding;
pub use normalize::{coerce_integer, parse_color};
pub use permissions::{PermissionHook, PermissionHookOptions};
pub use profile::PlatformProfile;
