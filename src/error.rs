use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the matrix and window algorithms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("Row {row} has {found} columns, expected {expected}")]
    InvalidShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Window size {size} is invalid for a sequence of length {len}")]
    InvalidWindowSize { size: usize, len: usize },

    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    #[error("Element at index {index} must be positive")]
    NonPositiveElement { index: usize },

    #[error("Sum of the window starting at {start} does not fit the element type")]
    Overflow { start: usize },
}

pub type ScanResult<T> = Result<T, ScanError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_message() {
        let err = ScanError::InvalidShape {
            row: 2,
            expected: 3,
            found: 1,
        };
        assert_eq!(err.to_string(), "Row 2 has 1 columns, expected 3");
    }

    #[test]
    fn test_window_size_error_message() {
        let err = ScanError::InvalidWindowSize { size: 0, len: 4 };
        assert!(err.to_string().contains("Window size 0"));
    }

    #[test]
    fn test_overflow_error_message() {
        let err = ScanError::Overflow { start: 4 };
        assert!(err.to_string().contains("starting at 4"));
    }

    #[test]
    fn test_config_invalid_value_helper() {
        let err = ConfigError::invalid_value("window.max_trace_steps", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid value for field 'window.max_trace_steps': must be positive"
        );
    }
}
