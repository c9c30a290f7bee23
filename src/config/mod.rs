//! Bridge configuration.
//!
//! Project-level config: `.hover-bridge/config.yaml` in the working directory.
//! An explicit `--config FILE` replaces the project file.
//!
//! Resolution: explicit file → project file → defaults, then CLI overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::engine::PositionConvention;

/// Project config location, relative to the working directory.
pub const PROJECT_CONFIG: &str = ".hover-bridge/config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("{field} must be 0 or 1, got {value}")]
    InvalidBase { field: &'static str, value: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// How request `line`/`column` integers are counted.
    pub positions: PositionConvention,
    /// Resolve imports against `.py` files next to the request's `path`.
    pub search_local_modules: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            positions: PositionConvention::default(),
            search_local_modules: true,
        }
    }
}

impl BridgeConfig {
    /// Load config. An explicit path must exist and parse; the project file
    /// is optional and falls back to defaults when it is broken.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => Self::load_project_config(Path::new(PROJECT_CONFIG)),
        };
        config.validate()?;
        Ok(config)
    }

    fn load_project_config(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "ignoring project config");
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file is a valid, all-default config.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_base("line_base", self.positions.line_base)?;
        check_base("column_base", self.positions.column_base)
    }
}

fn check_base(field: &'static str, value: u8) -> Result<(), ConfigError> {
    match value {
        0 | 1 => Ok(()),
        _ => Err(ConfigError::InvalidBase { field, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.positions.line_base, 1);
        assert_eq!(config.positions.column_base, 0);
        assert!(config.search_local_modules);
    }

    #[test]
    fn load_from_yaml_string() {
        let yaml = r#"
positions:
  line_base: 0
search_local_modules: false
"#;
        let config = BridgeConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.positions.line_base, 0);
        assert_eq!(config.positions.column_base, 0);
        assert!(!config.search_local_modules);
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(BridgeConfig::from_yaml("").unwrap(), BridgeConfig::default());
        assert_eq!(BridgeConfig::from_yaml("\n  \n").unwrap(), BridgeConfig::default());
    }

    #[test]
    fn round_trip_yaml() {
        let mut config = BridgeConfig::default();
        config.positions.column_base = 1;
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(BridgeConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn explicit_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "positions:\n  column_base: 1").unwrap();
        let config = BridgeConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.positions.column_base, 1);
        assert_eq!(config.positions.line_base, 1);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BridgeConfig::load(Some(&dir.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn invalid_explicit_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "positions: [1, 2").unwrap();
        let err = BridgeConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn out_of_range_base_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "positions:\n  line_base: 2").unwrap();
        let err = BridgeConfig::load(Some(file.path())).unwrap_err();
        assert_eq!(err.to_string(), "line_base must be 0 or 1, got 2");
    }

    #[test]
    fn broken_project_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "search_local_modules: [").unwrap();
        assert_eq!(BridgeConfig::load_project_config(&path), BridgeConfig::default());
    }

    #[test]
    fn absent_project_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = BridgeConfig::load_project_config(&dir.path().join("config.yaml"));
        assert_eq!(config, BridgeConfig::default());
    }
}
