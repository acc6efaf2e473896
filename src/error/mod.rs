//! Error types and handling for `perfbase`.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Supports `anyhow` integration for ad-hoc failures
//! - Provides recovery hints for user-facing errors
//! - Separates fatal run errors from per-file skip-and-continue failures
//!   (the loader records the latter instead of returning them)
//! - Provides structured JSON output for scripted callers

mod context;
mod structured;

pub use context::{OptionExt, ResultExt};
pub use structured::{ErrorCode, StructuredError};

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for `perfbase` operations.
#[derive(Error, Debug)]
pub enum PerfError {
    // === Input Errors ===
    /// Benchmark (or other input) directory does not exist.
    #[error("Directory not found: '{path}'")]
    DirectoryNotFound { path: PathBuf },

    /// The benchmark directory holds no `*.json` files.
    #[error("No JSON files found in '{path}'")]
    NoBenchmarkFiles { path: PathBuf },

    /// A source path given on the command line does not exist.
    #[error("Path not found: '{path}'")]
    PathNotFound { path: PathBuf },

    // === Dataset Errors ===
    /// A benchmark file does not have the expected shape.
    #[error("Invalid benchmark file '{path}': {reason}")]
    InvalidDataset { path: PathBuf, reason: String },

    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Multiple validation errors occurred.
    #[error("Validation errors: {errors:?}")]
    ValidationErrors { errors: Vec<ValidationError> },

    // === Configuration Errors ===
    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A configuration key holds a value of the wrong type.
    #[error("Invalid value for '{key}': '{value}' (expected {expected})")]
    InvalidConfigValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Directory traversal error.
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    // === Wrapped errors ===
    /// Error with additional context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Wrapped anyhow error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// The reason for the validation failure.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl PerfError {
    /// Can the user fix this without code changes?
    #[must_use]
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DirectoryNotFound { .. }
                | Self::NoBenchmarkFiles { .. }
                | Self::PathNotFound { .. }
                | Self::InvalidDataset { .. }
                | Self::Validation { .. }
                | Self::ValidationErrors { .. }
                | Self::InvalidConfigValue { .. }
        )
    }

    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::DirectoryNotFound { .. } => Some(
                "Create the directory and add <set>.json (baseline) and <set>_new.json (new) files, or pass --dir",
            ),
            Self::NoBenchmarkFiles { .. } => {
                Some("Add <set>.json baseline files to the benchmark directory")
            }
            Self::InvalidDataset { .. } => Some(
                "Benchmark files must be a JSON object mapping test names to objects of numeric metrics",
            ),
            Self::InvalidConfigValue { .. } => {
                Some("Check .perfbase.yaml and PERFBASE_* environment variables")
            }
            _ => None,
        }
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        1
    }

    /// Create a validation error for a specific field.
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid-dataset error for a file.
    #[must_use]
    pub fn invalid_dataset(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidDataset {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create from multiple validation errors.
    #[must_use]
    pub fn from_validation_errors(errors: Vec<ValidationError>) -> Self {
        if errors.len() == 1 {
            let err = &errors[0];
            Self::Validation {
                field: err.field.clone(),
                reason: err.message.clone(),
            }
        } else {
            Self::ValidationErrors { errors }
        }
    }
}

/// Result type using `PerfError`.
pub type Result<T> = std::result::Result<T, PerfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PerfError::DirectoryNotFound {
            path: PathBuf::from("benchmark"),
        };
        assert_eq!(err.to_string(), "Directory not found: 'benchmark'");
    }

    #[test]
    fn test_validation_error() {
        let err = PerfError::validation("t1.mid_ms", "must be non-negative");
        assert_eq!(
            err.to_string(),
            "Validation failed: t1.mid_ms: must be non-negative"
        );
    }

    #[test]
    fn test_user_recoverable() {
        let recoverable = PerfError::NoBenchmarkFiles {
            path: PathBuf::from("benchmark"),
        };
        assert!(recoverable.is_user_recoverable());

        let not_recoverable = PerfError::Io(std::io::Error::other("disk on fire"));
        assert!(!not_recoverable.is_user_recoverable());
    }

    #[test]
    fn test_suggestion() {
        let err = PerfError::DirectoryNotFound {
            path: PathBuf::from("benchmark"),
        };
        assert!(err.suggestion().unwrap().contains("_new.json"));

        let err = PerfError::Config("broken".to_string());
        assert_eq!(err.suggestion(), None);
    }

    #[test]
    fn test_from_validation_errors_single_collapses() {
        let err = PerfError::from_validation_errors(vec![ValidationError::new(
            "t1.cv",
            "must be finite",
        )]);
        assert!(matches!(err, PerfError::Validation { .. }));

        let err = PerfError::from_validation_errors(vec![
            ValidationError::new("a.mid_ms", "must be finite"),
            ValidationError::new("b.mid_ms", "must be finite"),
        ]);
        assert!(matches!(err, PerfError::ValidationErrors { errors } if errors.len() == 2));
    }

    #[test]
    fn test_validation_error_struct() {
        let err = ValidationError::new("t1.iterations", "must be an integer");
        assert_eq!(err.to_string(), "t1.iterations: must be an integer");
    }
}
