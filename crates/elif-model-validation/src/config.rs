//! Validation engine configuration

use serde::{Deserialize, Serialize};
use service_builder::builder;
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for '{key}': '{value}'. Expected: {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

/// Options shared by every field of a model schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[builder]
pub struct ValidationConfig {
    /// Stop evaluating a field's rules after its first failure
    #[builder(default = "false", getter)]
    pub fail_fast: bool,

    /// Recurse into nested models held by association fields
    #[builder(default = "true", getter)]
    pub validate_associations: bool,

    /// Association nesting depth at which validation is refused
    #[builder(default = "32", getter)]
    pub max_depth: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            validate_associations: true,
            max_depth: 32,
        }
    }
}

impl ValidationConfig {
    pub const FAIL_FAST_VAR: &'static str = "ELIF_VALIDATION_FAIL_FAST";
    pub const ASSOCIATIONS_VAR: &'static str = "ELIF_VALIDATION_ASSOCIATIONS";
    pub const MAX_DEPTH_VAR: &'static str = "ELIF_VALIDATION_MAX_DEPTH";

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(fail_fast) = read_var(Self::FAIL_FAST_VAR, "true or false")? {
            config.fail_fast = fail_fast;
        }

        if let Some(associations) = read_var(Self::ASSOCIATIONS_VAR, "true or false")? {
            config.validate_associations = associations;
        }

        if let Some(max_depth) = read_var(Self::MAX_DEPTH_VAR, "a non-negative integer")? {
            config.max_depth = max_depth;
        }

        Ok(config)
    }
}

fn read_var<T: FromStr>(key: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::invalid_value(key, raw, expected)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var(ValidationConfig::FAIL_FAST_VAR);
        env::remove_var(ValidationConfig::ASSOCIATIONS_VAR);
        env::remove_var(ValidationConfig::MAX_DEPTH_VAR);
    }

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert!(!config.fail_fast);
        assert!(config.validate_associations);
        assert_eq!(config.max_depth, 32);
    }

    #[test]
    fn test_config_builder() {
        let config = ValidationConfigBuilder::new()
            .fail_fast(true)
            .max_depth(4)
            .build()
            .expect("Failed to build config");

        assert!(*config.get_fail_fast());
        assert_eq!(*config.get_max_depth(), 4);
        assert!(*config.get_validate_associations()); // Default
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        assert_eq!(ValidationConfig::from_env().unwrap(), ValidationConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        env::set_var(ValidationConfig::FAIL_FAST_VAR, "true");
        env::set_var(ValidationConfig::ASSOCIATIONS_VAR, "false");
        env::set_var(ValidationConfig::MAX_DEPTH_VAR, " 8 ");

        let config = ValidationConfig::from_env().unwrap();
        clear_env();

        assert!(config.fail_fast);
        assert!(!config.validate_associations);
        assert_eq!(config.max_depth, 8);
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_value() {
        clear_env();
        env::set_var(ValidationConfig::MAX_DEPTH_VAR, "deep");

        let result = ValidationConfig::from_env();
        clear_env();

        match result {
            Err(ConfigError::InvalidValue { key, value, .. }) => {
                assert_eq!(key, ValidationConfig::MAX_DEPTH_VAR);
                assert_eq!(value, "deep");
            }
            other => panic!("expected invalid value error, got {:?}", other),
        }
    }
}
