use calbridge_core::{PermissionResource, PermissionResponse};
use calbridge_protocol::NativeMethod;
use tracing::warn;

use super::CalendarBridge;
use crate::error::BridgeResult;

impl CalendarBridge {
    /// Queries calendar access without prompting.
    pub async fn get_calendar_permissions(&self) -> BridgeResult<PermissionResponse> {
        self.get_permissions(PermissionResource::Calendar).await
    }

    /// Prompts for calendar access if the OS still allows asking.
    pub async fn request_calendar_permissions(&self) -> BridgeResult<PermissionResponse> {
        self.request_permissions_for(PermissionResource::Calendar).await
    }

    /// Queries reminders access without prompting (iOS).
    pub async fn get_reminders_permissions(&self) -> BridgeResult<PermissionResponse> {
        self.get_permissions(PermissionResource::Reminders).await
    }

    /// Prompts for reminders access (iOS).
    pub async fn request_reminders_permissions(&self) -> BridgeResult<PermissionResponse> {
        self.request_permissions_for(PermissionResource::Reminders).await
    }

    /// Prompts for calendar access.
    #[deprecated(note = "use `request_calendar_permissions` instead")]
    pub async fn request_permissions(&self) -> BridgeResult<PermissionResponse> {
        warn!("requestPermissionsAsync is deprecated. Use requestCalendarPermissionsAsync instead.");
        self.request_calendar_permissions().await
    }

    /// Queries the permission status of `resource`.
    pub async fn get_permissions(&self, resource: PermissionResource) -> BridgeResult<PermissionResponse> {
        let (method, operation) = match resource {
            PermissionResource::Calendar => (
                NativeMethod::GetCalendarPermissions,
                "getCalendarPermissionsAsync",
            ),
            PermissionResource::Reminders => (
                NativeMethod::GetRemindersPermissions,
                "getRemindersPermissionsAsync",
            ),
        };
        self.require(method, operation)?;
        self.dispatch_as(operation, method, Vec::new()).await
    }

    /// Requests access to `resource`.
    pub async fn request_permissions_for(
        &self,
        resource: PermissionResource,
    ) -> BridgeResult<PermissionResponse> {
        let (method, operation) = match resource {
            PermissionResource::Calendar => (
                NativeMethod::RequestCalendarPermissions,
                "requestCalendarPermissionsAsync",
            ),
            PermissionResource::Reminders => (
                NativeMethod::RequestRemindersPermissions,
                "requestRemindersPermissionsAsync",
            ),
        };
        self.require(method, operation)?;
        self.dispatch_as(operation, method, Vec::new()).await
    }
}
