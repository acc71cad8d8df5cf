use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngageResult;

/// Root configuration. Loaded from environment variables with the prefix
/// `ENGAGE__` (e.g. `ENGAGE__ADOBE__DEBUG=true`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngageConfig {
    #[serde(default)]
    pub common: CommonConfiguration,
    #[serde(default)]
    pub adobe: AdobeSettings,
}

/// App/device facts every provider is constructed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonConfiguration {
    #[serde(default)]
    pub user_agent: String,
    #[serde(default = "default_os_type")]
    pub os_type: String,
    #[serde(default)]
    pub os_version: String,
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default)]
    pub app_id: String,
    #[serde(default = "default_app_version")]
    pub app_version: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdobeSettings {
    /// Forwarded to the SDK's `init`; enables verbose SDK logging.
    #[serde(default)]
    pub debug: bool,
}

fn default_os_type() -> String {
    "unknown".to_string()
}
fn default_app_name() -> String {
    "app".to_string()
}
fn default_app_version() -> String {
    "0.0.0".to_string()
}

impl Default for CommonConfiguration {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            os_type: default_os_type(),
            os_version: String::new(),
            app_name: default_app_name(),
            app_id: String::new(),
            app_version: default_app_version(),
        }
    }
}

impl EngageConfig {
    /// Load configuration from environment variables.
    pub fn load() -> EngageResult<Self> {
        let loaded = Self::from_source(Self::environment())?;
        debug!(
            app_name = %loaded.common.app_name,
            adobe_debug = loaded.adobe.debug,
            "engage configuration loaded"
        );
        Ok(loaded)
    }

    /// `ENGAGE__<SECTION>__<KEY>` variables, values parsed as bool/number
    /// where possible.
    fn environment() -> config::Environment {
        config::Environment::with_prefix("ENGAGE")
            .separator("__")
            .try_parsing(true)
    }

    fn from_source<S>(source: S) -> EngageResult<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(source)
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> config::Environment {
        let source: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngageConfig::environment().source(Some(source))
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EngageConfig::from_source(env(&[])).unwrap();
        assert!(!config.adobe.debug);
        assert_eq!(config.common, CommonConfiguration::default());
    }

    #[test]
    fn test_load_from_process_environment() {
        let config = EngageConfig::load().unwrap();
        assert!(!config.common.app_name.is_empty());
        assert!(!config.common.os_type.is_empty());
    }

    #[test]
    fn test_env_overrides() {
        let config = EngageConfig::from_source(env(&[
            ("ENGAGE__ADOBE__DEBUG", "true"),
            ("ENGAGE__COMMON__APP_NAME", "pirateship"),
            ("ENGAGE__COMMON__OS_TYPE", "ios"),
        ]))
        .unwrap();

        assert!(config.adobe.debug);
        assert_eq!(config.common.app_name, "pirateship");
        assert_eq!(config.common.os_type, "ios");
        assert_eq!(config.common.app_version, "0.0.0");
    }
}
