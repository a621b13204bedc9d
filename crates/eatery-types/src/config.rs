//! Global configuration types for Eatery.
//!
//! `GlobalConfig` represents the top-level `config.toml` that selects the
//! database file and toggles OpenTelemetry export.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the restaurant catalog.
///
/// Loaded from `~/.eatery/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// SQLite file name, relative to the data directory.
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Bridge tracing spans to the OpenTelemetry stdout exporter.
    #[serde(default)]
    pub enable_otel: bool,
}

fn default_database_file() -> String {
    "eatery.db".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            enable_otel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_default_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.database_file, "eatery.db");
        assert!(!config.enable_otel);
    }

    #[test]
    fn test_global_config_deserialize_with_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn test_global_config_deserialize_with_values() {
        let toml_str = r#"
database_file = "catalog.db"
enable_otel = true
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.database_file, "catalog.db");
        assert!(config.enable_otel);
    }
}
