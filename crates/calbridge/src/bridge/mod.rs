//! The request normalizer.
//!
//! [`CalendarBridge`] is the only entry point callers use. Every operation
//! runs the same pipeline:
//! 1. Capability check against the binding (fails with `Unavailable`)
//! 2. Argument validation (fails with `InvalidArgument`)
//! 3. Payload normalization (ids, colors, dates, platform shape)
//! 4. One native invocation
//! 5. Decoding of the native reply into the expected record
//!
//! Operations are grouped per record type in the submodules.

mod attendees;
mod calendars;
mod events;
mod permissions;
mod reminders;
mod sources;

use std::fmt;
use std::sync::Arc;

use calbridge_core::{DateValue, Platform};
use calbridge_protocol::{NativeCall, NativeMethod};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::binding::NativeBinding;
use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::normalize::{Payload, read_only_fields};
use crate::profile::PlatformProfile;

/// Validating, normalizing front end to a native calendar provider.
///
/// The bridge holds no mutable state; share it freely between tasks.
#[derive(Clone)]
pub struct CalendarBridge {
    binding: Arc<dyn NativeBinding>,
    config: BridgeConfig,
    profile: &'static PlatformProfile,
}

impl fmt::Debug for CalendarBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarBridge")
            .field("binding", &self.binding.name())
            .field("config", &self.config)
            .finish()
    }
}

impl CalendarBridge {
    /// Creates a bridge dispatching into `binding`.
    pub fn new(binding: Arc<dyn NativeBinding>, config: BridgeConfig) -> Self {
        let profile = PlatformProfile::for_platform(config.platform);
        Self {
            binding,
            config,
            profile,
        }
    }

    /// Creates a bridge for `platform` with the default configuration.
    pub fn for_platform(binding: Arc<dyn NativeBinding>, platform: Platform) -> Self {
        Self::new(binding, BridgeConfig::new(platform))
    }

    /// Returns the platform the bridge normalizes for.
    pub fn platform(&self) -> Platform {
        self.config.platform
    }

    /// Returns the active platform profile.
    pub fn profile(&self) -> &'static PlatformProfile {
        self.profile
    }

    /// Returns the bridge configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Returns true if the native calendar module is present.
    ///
    /// Does not check permissions and performs no I/O.
    pub fn is_available(&self) -> bool {
        self.binding.supports(NativeMethod::GetCalendars)
    }

    /// Fails with `Unavailable` unless the binding has `method`.
    fn require(&self, method: NativeMethod, operation: &'static str) -> BridgeResult<()> {
        if self.binding.supports(method) {
            Ok(())
        } else {
            Err(BridgeError::Unavailable {
                module: self.config.module_name.clone(),
                operation,
                platform: self.config.platform,
            })
        }
    }

    /// Invokes `method` once and returns the raw reply data.
    async fn dispatch(
        &self,
        operation: &'static str,
        method: NativeMethod,
        args: Vec<Value>,
    ) -> BridgeResult<Value> {
        debug!(
            operation,
            method = %method,
            binding = self.binding.name(),
            "dispatching native call"
        );
        let data = self.binding.invoke(NativeCall::new(method, args)).await?;
        Ok(data)
    }

    /// Invokes `method` and decodes the reply into `T`.
    async fn dispatch_as<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        method: NativeMethod,
        args: Vec<Value>,
    ) -> BridgeResult<T> {
        let data = self.dispatch(operation, method, args).await?;
        serde_json::from_value(data)
            .map_err(|source| BridgeError::InvalidResponse { operation, source })
    }

    /// Invokes `method` and discards whatever the provider returned.
    async fn dispatch_unit(
        &self,
        operation: &'static str,
        method: NativeMethod,
        args: Vec<Value>,
    ) -> BridgeResult<()> {
        self.dispatch(operation, method, args).await.map(drop)
    }

    /// Logs an advisory when `payload` carries fields the platform ignores.
    fn warn_read_only(&self, operation: &'static str, payload: &Payload, denylist: &[&'static str]) {
        if !self.config.warn_read_only {
            return;
        }
        let fields = read_only_fields(payload, denylist);
        if !fields.is_empty() {
            warn!(
                operation,
                platform = %self.config.platform,
                fields = ?fields,
                "{operation} was called with one or more read-only properties, which will not be updated"
            );
        }
    }
}

/// Fails with `InvalidArgument` when `id` is empty or blank.
fn require_id(operation: &'static str, id: &str, target: &str) -> BridgeResult<()> {
    if id.trim().is_empty() {
        return Err(BridgeError::invalid_argument(
            operation,
            format!("{operation} must be called with an id (string) of the target {target}"),
        ));
    }
    Ok(())
}

/// Returns the wire form of an optional date, `null` when missing or blank.
fn date_or_null(date: Option<&DateValue>) -> Value {
    match date {
        Some(date) if !date.is_blank() => Value::String(date.to_wire_string()),
        _ => Value::Null,
    }
}

/// Picks the indefinite article for a field name in error messages.
fn article(word: &str) -> &'static str {
    match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}
