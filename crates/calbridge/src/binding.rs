//! NativeBinding trait definition.
//!
//! This module defines the [`NativeBinding`] trait, the capability table the
//! bridge dispatches into. A binding is responsible for:
//! - Reporting which native entry points exist on the running platform
//! - Carrying one [`NativeCall`] to the native provider and returning its data
//! - Reporting native failures as [`NativeError`] with code and message intact

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, MutexGuard, PoisonError};

use calbridge_core::Platform;
use calbridge_protocol::{NativeCall, NativeMethod};
use serde_json::Value;

use crate::error::{NativeError, NativeResult};
use crate::profile::PlatformProfile;

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so the bridge can hold an
/// `Arc<dyn NativeBinding>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A table of named native operations.
///
/// # Implementation Notes
///
/// - Implementations should be `Send + Sync`; one binding serves every task
/// - `supports` must not perform I/O, it is consulted before validation
/// - `invoke` is only called for methods `supports` accepted
///
/// # Example Implementation
///
/// ```ignore
/// struct JniBinding { env: JavaVm }
///
/// impl NativeBinding for JniBinding {
///     fn name(&self) -> &str { "jni" }
///
///     fn supports(&self, method: NativeMethod) -> bool {
///         PlatformProfile::android().exposes(method)
///     }
///
///     fn invoke(&self, call: NativeCall) -> BoxFuture<'_, NativeResult<Value>> {
///         Box::pin(async move { self.env.call_module("ExpoCalendar", call).await })
///     }
/// }
/// ```
pub trait NativeBinding: Send + Sync {
    /// Returns the name of this binding (e.g. "framed", "jni").
    fn name(&self) -> &str;

    /// Returns true if the native capability table has an entry for `method`.
    fn supports(&self, method: NativeMethod) -> bool;

    /// Invokes a native entry point with positional arguments.
    ///
    /// # Errors
    ///
    /// Returns the native provider's rejection unchanged.
    fn invoke(&self, call: NativeCall) -> BoxFuture<'_, NativeResult<Value>>;
}

/// A binding with an empty capability table.
///
/// Stands in for platforms without a native calendar module, such as the web.
#[derive(Debug, Clone, Default)]
pub struct UnsupportedBinding;

impl NativeBinding for UnsupportedBinding {
    fn name(&self) -> &str {
        "unsupported"
    }

    fn supports(&self, _method: NativeMethod) -> bool {
        false
    }

    fn invoke(&self, call: NativeCall) -> BoxFuture<'_, NativeResult<Value>> {
        let error = NativeError::new(
            "ERR_UNAVAILABLE",
            format!("{} is not available", call.method),
        );
        Box::pin(async move { Err(error) })
    }
}

/// An in-process binding that records every call and answers from canned
/// replies.
///
/// Useful for testing code built on the bridge without a native host.
/// Methods without a canned reply resolve to `null`.
#[derive(Debug, Default)]
pub struct RecordingBinding {
    methods: HashSet<NativeMethod>,
    replies: Mutex<HashMap<NativeMethod, NativeResult<Value>>>,
    calls: Mutex<Vec<NativeCall>>,
}

impl RecordingBinding {
    /// Creates a binding exposing exactly `methods`.
    pub fn new(methods: impl IntoIterator<Item = NativeMethod>) -> Self {
        Self {
            methods: methods.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Creates a binding exposing the methods of `platform`.
    pub fn for_platform(platform: Platform) -> Self {
        Self::new(PlatformProfile::for_platform(platform).methods.iter().copied())
    }

    /// Builder method to answer `method` with `data`.
    pub fn with_reply(self, method: NativeMethod, data: Value) -> Self {
        lock(&self.replies).insert(method, Ok(data));
        self
    }

    /// Builder method to reject `method` with `error`.
    pub fn with_error(self, method: NativeMethod, error: NativeError) -> Self {
        lock(&self.replies).insert(method, Err(error));
        self
    }

    /// Builder method to remove `method` from the capability table.
    pub fn without(mut self, method: NativeMethod) -> Self {
        self.methods.remove(&method);
        self
    }

    /// Returns every call received so far, oldest first.
    pub fn calls(&self) -> Vec<NativeCall> {
        lock(&self.calls).clone()
    }

    /// Returns the most recent call.
    pub fn last_call(&self) -> Option<NativeCall> {
        lock(&self.calls).last().cloned()
    }
}

impl NativeBinding for RecordingBinding {
    fn name(&self) -> &str {
        "recording"
    }

    fn supports(&self, method: NativeMethod) -> bool {
        self.methods.contains(&method)
    }

    fn invoke(&self, call: NativeCall) -> BoxFuture<'_, NativeResult<Value>> {
        let reply = lock(&self.replies)
            .get(&call.method)
            .cloned()
            .unwrap_or(Ok(Value::Null));
        lock(&self.calls).push(call);
        Box::pin(async move { reply })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
