//! Demo configuration.
//!
//! One JSON document shared by the browser build (stored in `localStorage`)
//! and the terminal driver (read from a file, then overridden by flags).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Runtime configuration for a demo page.
///
/// Every field has a default so partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Catch detection faults and render a generic message instead of
    /// propagating them to the caller.
    #[serde(default = "default_true")]
    pub guard_detection: bool,
    /// Threshold used by the built-in module.
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    /// Where the web build fetches the compiled module from.
    #[serde(default)]
    pub module: ModuleSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSource {
    #[serde(default = "default_module_url")]
    pub url: String,
    #[serde(default = "default_export")]
    pub export: String,
}

fn default_true() -> bool {
    true
}

fn default_threshold() -> f32 {
    0.5
}

fn default_module_url() -> String {
    "./pkg/anomaly_demo_bg.wasm".to_string()
}

fn default_export() -> String {
    "detect_anomaly".to_string()
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            guard_detection: default_true(),
            threshold: default_threshold(),
            module: ModuleSource::default(),
        }
    }
}

impl Default for ModuleSource {
    fn default() -> Self {
        Self {
            url: default_module_url(),
            export: default_export(),
        }
    }
}

impl DemoConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = DemoConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, DemoConfig::default());
        assert!(cfg.guard_detection);
        assert_eq!(cfg.threshold, 0.5);
        assert_eq!(cfg.module.export, "detect_anomaly");
    }

    #[test]
    fn partial_module_section_keeps_other_defaults() {
        let cfg = DemoConfig::from_json_str(
            r#"{ "guard_detection": false, "module": { "url": "/m.wasm" } }"#,
        )
        .unwrap();
        assert!(!cfg.guard_detection);
        assert_eq!(cfg.module.url, "/m.wasm");
        assert_eq!(cfg.module.export, "detect_anomaly");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = DemoConfig::from_json_str("{ guard").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DemoConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut cfg = DemoConfig::default();
        cfg.threshold = 2.0;
        let raw = serde_json::to_string_pretty(&cfg).unwrap();
        assert_eq!(DemoConfig::from_json_str(&raw).unwrap(), cfg);
    }
}
