use calbridge_core::Source;
use calbridge_protocol::NativeMethod;
use serde_json::Value;

use super::{CalendarBridge, require_id};
use crate::error::BridgeResult;

impl CalendarBridge {
    /// Lists the accounts calendars can belong to (iOS).
    pub async fn get_sources(&self) -> BridgeResult<Vec<Source>> {
        const OP: &str = "getSourcesAsync";
        self.require(NativeMethod::GetSources, OP)?;

        self.dispatch_as(OP, NativeMethod::GetSources, Vec::new()).await
    }

    /// Returns source `id` (iOS).
    pub async fn get_source(&self, id: &str) -> BridgeResult<Source> {
        const OP: &str = "getSourceAsync";
        self.require(NativeMethod::GetSourceById, OP)?;
        require_id(OP, id, "source")?;

        self.dispatch_as(OP, NativeMethod::GetSourceById, vec![Value::from(id)])
            .await
    }
}

#[cfg(test)]
mod tests {
    use calbridge_core::{Platform, SourceType};
    use serde_json::json;

    use super::super::test_support::{bridge, native};
    use crate::binding::RecordingBinding;

    use super::*;

    #[tokio::test]
    async fn get_sources_decodes_known_types() {
        let (bridge, binding) = bridge(
            Platform::Ios,
            RecordingBinding::for_platform(Platform::Ios).with_reply(
                NativeMethod::GetSources,
                json!([
                    {"id": "s1", "type": "caldav", "name": "iCloud"},
                    {"id": "s2", "type": "exchange", "name": "Work"}
                ]),
            ),
        );

        let sources = bridge.get_sources().await.unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].known_type(), Some(SourceType::CalDav));
        assert!(binding.last_call().unwrap().args.is_empty());
    }

    #[tokio::test]
    async fn get_source_validates_id() {
        let (bridge, binding) = native(Platform::Ios);
        let err = bridge.get_source(" ").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "getSourceAsync must be called with an id (string) of the target source"
        );
        assert!(binding.calls().is_empty());
    }

    #[tokio::test]
    async fn sources_are_unavailable_on_android_before_validation() {
        let (bridge, _) = native(Platform::Android);
        let err = bridge.get_source("").await.unwrap_err();
        assert!(err.is_unavailable());
    }
}
