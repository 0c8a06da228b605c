//! Configuration for a [`CoordinateRegistry`](crate::registry::CoordinateRegistry)
//!
//! Loaded from JSON; every field is optional and falls back to its default.
//!
//! ```json
//! { "tolerance": 1e-6, "cache_enabled": true }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coordinates::EPSILON;

/// Error type for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Registry settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoordinateConfig {
    /// Distance at or below which two coordinates are considered equal
    pub tolerance: f64,
    /// Whether constructors share canonical instances
    pub cache_enabled: bool,
}

impl Default for CoordinateConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON,
            cache_enabled: true,
        }
    }
}

impl CoordinateConfig {
    /// Parses and validates a JSON config document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: CoordinateConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded coordinate config from {}", path.display());
        Self::from_json_str(&contents)
    }

    /// Checks that `tolerance` is finite and positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tolerance must be finite and positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = CoordinateConfig::from_json_str("{}").unwrap();
        assert_eq!(config, CoordinateConfig::default());
        assert_eq!(config.tolerance, 1e-6);
        assert!(config.cache_enabled);
    }

    #[test]
    fn test_partial_override() {
        let config = CoordinateConfig::from_json_str(r#"{"cache_enabled": false}"#).unwrap();
        assert!(!config.cache_enabled);
        assert_eq!(config.tolerance, EPSILON);
    }

    #[test]
    fn test_invalid_tolerance() {
        assert!(matches!(
            CoordinateConfig::from_json_str(r#"{"tolerance": -1.0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            CoordinateConfig::from_json_str(r#"{"tolerance": 0.0}"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            CoordinateConfig::from_json_str(r#"{"tolerence": 1e-3}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"tolerance": 0.001}}"#).unwrap();

        let config = CoordinateConfig::from_file(file.path()).unwrap();
        assert_eq!(config.tolerance, 0.001);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(matches!(
            CoordinateConfig::from_file(&missing),
            Err(ConfigError::Io { .. })
        ));
    }
}
