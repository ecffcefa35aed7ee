//! Optional TOML configuration for a check run
//!
//! ```toml
//! [check]
//! direction = "descending"
//! baseline = "adjacent"
//! fail_on_violation = true
//! ```

use std::path::{Path, PathBuf};

use order_check_core::{Baseline, Direction};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors during config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub check: CheckSection,
}

/// Unset keys fall back to command-line flags, then to defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckSection {
    pub direction: Option<Direction>,
    pub baseline: Option<Baseline>,
    pub fail_on_violation: Option<bool>,
}

impl CheckConfig {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: CheckConfig = toml::from_str(
            r#"
            [check]
            direction = "ascending"
            baseline = "running"
            fail_on_violation = true
            "#,
        )
        .unwrap();

        assert_eq!(config.check.direction, Some(Direction::Ascending));
        assert_eq!(config.check.baseline, Some(Baseline::Running));
        assert_eq!(config.check.fail_on_violation, Some(true));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CheckConfig = toml::from_str("").unwrap();
        assert_eq!(config, CheckConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<CheckConfig, _> = toml::from_str("[check]\norder = \"desc\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_reports_path() {
        let path = std::env::temp_dir().join(format!("order-check-{}.toml", std::process::id()));
        std::fs::write(&path, "[check]\nbaseline = \"sideways\"\n").unwrap();

        let err = CheckConfig::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("order-check-"));
    }
}
