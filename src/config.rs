use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::matrix::ZeroStrategy;

pub const DEFAULT_MAX_TRACE_STEPS: usize = 256;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub matrix: MatrixConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatrixConfig {
    pub strategy: ZeroStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    /// Record a dry-run table for variable window scans.
    pub trace: bool,
    pub max_trace_steps: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            trace: false,
            max_trace_steps: DEFAULT_MAX_TRACE_STEPS,
        }
    }
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.max_trace_steps == 0 {
            return Err(ConfigError::invalid_value(
                "window.max_trace_steps",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.matrix.strategy, ZeroStrategy::ConstantSpace);
        assert_eq!(config.window.max_trace_steps, DEFAULT_MAX_TRACE_STEPS);
    }

    #[test]
    fn test_parse_full_document() {
        let config = Config::from_toml_str(
            r#"
            [matrix]
            strategy = "aux-sets"

            [window]
            trace = true
            max_trace_steps = 16
            "#,
        )
        .unwrap();
        assert_eq!(config.matrix.strategy, ZeroStrategy::AuxSets);
        assert!(config.window.trace);
        assert_eq!(config.window.max_trace_steps, 16);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = Config::from_toml_str("[window]\ntracing = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let err = Config::from_toml_str("[matrix]\nstrategy = \"fastest\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_trace_steps_invalid() {
        let err = Config::from_toml_str("[window]\nmax_trace_steps = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[window]\ntrace = true").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert!(config.window.trace);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }
}
