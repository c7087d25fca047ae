//! Reactive permission handle.
//!
//! [`PermissionHook`] keeps the last observed [`PermissionResponse`] for one
//! resource in a `watch` channel. It never polls on its own; callers decide
//! when to query (`refresh`) or prompt (`request`).

use calbridge_core::{PermissionResource, PermissionResponse};
use tokio::sync::watch;
use tracing::debug;

use crate::bridge::CalendarBridge;
use crate::error::BridgeResult;

/// What a [`PermissionHook`] does when mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionHookOptions {
    /// Query the current status on mount.
    pub get: bool,
    /// Prompt on mount. Takes precedence over `get`.
    pub request: bool,
}

impl Default for PermissionHookOptions {
    fn default() -> Self {
        Self {
            get: true,
            request: false,
        }
    }
}

impl PermissionHookOptions {
    /// Mounts without touching the native layer.
    pub fn lazy() -> Self {
        Self {
            get: false,
            request: false,
        }
    }

    /// Prompts as soon as the hook is mounted.
    pub fn prompt() -> Self {
        Self {
            get: false,
            request: true,
        }
    }
}

/// Poll-on-demand handle on the permission state of one resource.
pub struct PermissionHook {
    bridge: CalendarBridge,
    resource: PermissionResource,
    tx: watch::Sender<Option<PermissionResponse>>,
}

impl PermissionHook {
    /// Creates the hook and runs the mount-time query or prompt.
    pub async fn mount(
        bridge: CalendarBridge,
        resource: PermissionResource,
        options: PermissionHookOptions,
    ) -> BridgeResult<Self> {
        let (tx, _rx) = watch::channel(None);
        let hook = Self {
            bridge,
            resource,
            tx,
        };

        if options.request {
            hook.request().await?;
        } else if options.get {
            hook.refresh().await?;
        }
        Ok(hook)
    }

    /// Mounts a hook on calendar access.
    pub async fn calendar(bridge: CalendarBridge, options: PermissionHookOptions) -> BridgeResult<Self> {
        Self::mount(bridge, PermissionResource::Calendar, options).await
    }

    /// Mounts a hook on reminders access (iOS).
    pub async fn reminders(bridge: CalendarBridge, options: PermissionHookOptions) -> BridgeResult<Self> {
        Self::mount(bridge, PermissionResource::Reminders, options).await
    }

    /// Returns the resource this hook tracks.
    pub fn resource(&self) -> PermissionResource {
        self.resource
    }

    /// Returns the last observed status, `None` before the first query.
    pub fn status(&self) -> Option<PermissionResponse> {
        *self.tx.borrow()
    }

    /// Re-queries the status without prompting.
    pub async fn refresh(&self) -> BridgeResult<PermissionResponse> {
        let response = self.bridge.get_permissions(self.resource).await?;
        self.publish(response);
        Ok(response)
    }

    /// Prompts for access and records the outcome.
    pub async fn request(&self) -> BridgeResult<PermissionResponse> {
        let response = self.bridge.request_permissions_for(self.resource).await?;
        self.publish(response);
        Ok(response)
    }

    /// Returns a receiver notified whenever the observed status changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<PermissionResponse>> {
        self.tx.subscribe()
    }

    fn publish(&self, response: PermissionResponse) {
        debug!(
            resource = self.resource.as_str(),
            status = ?response.status,
            "permission status observed"
        );
        self.tx.send_if_modified(|current| {
            if *current == Some(response) {
                false
            } else {
                *current = Some(response);
                true
            }
        });
    }
}

impl std::fmt::Debug for PermissionHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionHook")
            .field("resource", &self.resource)
            .field("status", &self.status())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use calbridge_core::{PermissionStatus, Platform};
    use calbridge_protocol::NativeMethod;
    use serde_json::json;

    use super::*;
    use crate::binding::RecordingBinding;
    use crate::error::NativeError;

    fn response(status: &str) -> serde_json::Value {
        json!({
            "status": status,
            "expires": "never",
            "granted": status == "granted",
            "canAskAgain": true
        })
    }

    fn mount_bridge(binding: RecordingBinding) -> (CalendarBridge, Arc<RecordingBinding>) {
        let binding = Arc::new(binding);
        let bridge = CalendarBridge::for_platform(binding.clone(), Platform::Ios);
        (bridge, binding)
    }

    #[tokio::test]
    async fn mount_queries_status_by_default() {
        let (bridge, binding) = mount_bridge(
            RecordingBinding::for_platform(Platform::Ios)
                .with_reply(NativeMethod::GetCalendarPermissions, response("undetermined")),
        );

        let hook = PermissionHook::calendar(bridge, Default::default())
            .await
            .unwrap();
        assert_eq!(hook.resource(), PermissionResource::Calendar);
        assert!(hook.status().unwrap().is_undetermined());
        assert_eq!(
            binding.last_call().unwrap().method,
            NativeMethod::GetCalendarPermissions
        );
    }

    #[tokio::test]
    async fn lazy_mount_makes_no_call() {
        let (bridge, binding) = mount_bridge(RecordingBinding::for_platform(Platform::Ios));

        let hook = PermissionHook::mount(
            bridge,
            PermissionResource::Reminders,
            PermissionHookOptions::lazy(),
        )
        .await
        .unwrap();
        assert_eq!(hook.status(), None);
        assert!(binding.calls().is_empty());
    }

    #[tokio::test]
    async fn prompt_mount_requests_instead_of_querying() {
        let (bridge, binding) = mount_bridge(
            RecordingBinding::for_platform(Platform::Ios)
                .with_reply(NativeMethod::RequestRemindersPermissions, response("granted")),
        );

        let hook = PermissionHook::reminders(bridge, PermissionHookOptions::prompt())
            .await
            .unwrap();
        assert_eq!(hook.status().unwrap().status, PermissionStatus::Granted);
        let calls = binding.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, NativeMethod::RequestRemindersPermissions);
    }

    #[tokio::test]
    async fn subscribers_see_request_outcome() {
        let (bridge, _) = mount_bridge(
            RecordingBinding::for_platform(Platform::Ios)
                .with_reply(NativeMethod::GetCalendarPermissions, response("undetermined"))
                .with_reply(NativeMethod::RequestCalendarPermissions, response("granted")),
        );
        let hook = PermissionHook::mount(bridge, PermissionResource::Calendar, Default::default())
            .await
            .unwrap();

        let mut rx = hook.subscribe();
        assert!(!rx.has_changed().unwrap());

        hook.request().await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().unwrap().granted);

        // Same answer again does not wake subscribers.
        hook.request().await.unwrap();
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn errors_propagate_and_keep_last_status() {
        let (bridge, _) = mount_bridge(
            RecordingBinding::for_platform(Platform::Ios)
                .with_reply(NativeMethod::GetCalendarPermissions, response("denied"))
                .with_error(
                    NativeMethod::RequestCalendarPermissions,
                    NativeError::new("E_MISSING_PERMISSIONS", "prompt unavailable"),
                ),
        );
        let hook = PermissionHook::mount(bridge, PermissionResource::Calendar, Default::default())
            .await
            .unwrap();

        let err = hook.request().await.unwrap_err();
        assert_eq!(err.as_native().unwrap().code(), "E_MISSING_PERMISSIONS");
        assert_eq!(hook.status().unwrap().status, PermissionStatus::Denied);
    }

    #[tokio::test]
    async fn mount_fails_where_resource_is_unavailable() {
        let binding = Arc::new(RecordingBinding::for_platform(Platform::Android));
        let bridge = CalendarBridge::for_platform(binding, Platform::Android);

        let err = PermissionHook::mount(bridge, PermissionResource::Reminders, Default::default())
            .await
            .unwrap_err();
        assert!(err.is_unavailable());
    }
}
