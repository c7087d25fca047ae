//! Bridge configuration.
//!
//! Hosts usually build a [`BridgeConfig`] in code, but it can also be read
//! from a `calbridge.toml`:
//!
//! ```toml
//! platform = "android"
//! module_name = "Calendar"
//! warn_read_only = true
//! ```

use std::path::Path;

use calbridge_core::Platform;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Module name used in unavailability messages.
pub const DEFAULT_MODULE_NAME: &str = "Calendar";

/// Configuration for a [`CalendarBridge`](crate::CalendarBridge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Platform whose profile drives validation and payload shape.
    pub platform: Platform,

    /// Module name reported when an operation is unavailable.
    pub module_name: String,

    /// Log an advisory when an update touches read-only fields.
    pub warn_read_only: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            platform: Platform::current(),
            module_name: DEFAULT_MODULE_NAME.to_string(),
            warn_read_only: true,
        }
    }
}

impl BridgeConfig {
    /// Creates the default configuration for `platform`.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            ..Self::default()
        }
    }

    /// Builder method to set the module name.
    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = name.into();
        self
    }

    /// Builder method to toggle the read-only field advisory.
    pub fn with_read_only_warnings(mut self, enabled: bool) -> Self {
        self.warn_read_only = enabled;
        self
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.module_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "module_name",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = BridgeConfig::new(Platform::Ios);
        assert_eq!(config.platform, Platform::Ios);
        assert_eq!(config.module_name, "Calendar");
        assert!(config.warn_read_only);
    }

    #[test]
    fn builder_methods() {
        let config = BridgeConfig::new(Platform::Android)
            .with_module_name("ExpoCalendar")
            .with_read_only_warnings(false);
        assert_eq!(config.module_name, "ExpoCalendar");
        assert!(!config.warn_read_only);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = BridgeConfig::from_toml_str(r#"platform = "android""#).unwrap();
        assert_eq!(config.platform, Platform::Android);
        assert_eq!(config.module_name, DEFAULT_MODULE_NAME);
        assert!(config.warn_read_only);
    }

    #[test]
    fn rejects_unknown_platform() {
        let err = BridgeConfig::from_toml_str(r#"platform = "windows""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_empty_module_name() {
        let err = BridgeConfig::from_toml_str(r#"module_name = "  ""#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "module_name", .. }));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "platform = \"ios\"\nwarn_read_only = false").unwrap();

        let config = BridgeConfig::load_from(file.path()).unwrap();
        assert_eq!(config.platform, Platform::Ios);
        assert!(!config.warn_read_only);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BridgeConfig::load_from(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
