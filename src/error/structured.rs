//! Structured error output for scripted callers.
//!
//! Provides machine-parseable error information with:
//! - Error codes for categorization
//! - Hints for self-correction
//! - Retryability flags
//! - Context for debugging

use crate::error::PerfError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Machine-readable error codes.
///
/// These codes are stable and can be used for programmatic error handling.
/// Format: `SCREAMING_SNAKE_CASE` for easy parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // === Input Errors (exit code 2) ===
    /// Input directory not found
    DirectoryNotFound,
    /// No benchmark files in the directory
    NoBenchmarkFiles,
    /// Source path not found
    PathNotFound,

    // === Dataset Errors (exit code 3) ===
    /// Benchmark file has the wrong shape
    InvalidDataset,

    // === Validation Errors (exit code 4) ===
    /// Field validation failed
    ValidationFailed,

    // === Config Errors (exit code 7) ===
    /// Configuration error
    ConfigError,
    /// Config value has the wrong type
    InvalidConfigValue,

    // === I/O Errors (exit code 8) ===
    /// File I/O error
    IoError,
    /// JSON serialization error
    JsonError,
    /// YAML parsing error
    YamlError,

    // === Internal Errors (exit code 1) ===
    /// Unexpected internal error
    InternalError,
}

impl ErrorCode {
    /// Get the string representation for JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DirectoryNotFound => "DIRECTORY_NOT_FOUND",
            Self::NoBenchmarkFiles => "NO_BENCHMARK_FILES",
            Self::PathNotFound => "PATH_NOT_FOUND",
            Self::InvalidDataset => "INVALID_DATASET",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::ConfigError => "CONFIG_ERROR",
            Self::InvalidConfigValue => "INVALID_CONFIG_VALUE",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::YamlError => "YAML_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Whether this error is potentially retryable after fixing the input.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::DirectoryNotFound
                | Self::NoBenchmarkFiles
                | Self::PathNotFound
                | Self::InvalidDataset
                | Self::ValidationFailed
                | Self::InvalidConfigValue
        )
    }

    /// Get the exit code for this error category.
    ///
    /// Exit codes are grouped by error category:
    /// - 1: Internal/unknown errors
    /// - 2: Input errors
    /// - 3: Dataset errors
    /// - 4: Validation errors
    /// - 7: Config errors
    /// - 8: I/O errors
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::DirectoryNotFound | Self::NoBenchmarkFiles | Self::PathNotFound => 2,
            Self::InvalidDataset => 3,
            Self::ValidationFailed => 4,
            Self::ConfigError | Self::InvalidConfigValue => 7,
            Self::IoError | Self::JsonError | Self::YamlError => 8,
            Self::InternalError => 1,
        }
    }
}

/// Structured error for machine-parseable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional hint for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether the operation can be retried
    pub retryable: bool,
    /// Additional context data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl StructuredError {
    /// Create a new structured error from a `PerfError`.
    #[must_use]
    pub fn from_error(err: &PerfError) -> Self {
        let (code, context) = Self::extract_code_and_context(err);
        let hint = Self::generate_hint(err);

        Self {
            code,
            message: err.to_string(),
            hint,
            retryable: code.is_retryable(),
            context,
        }
    }

    /// Serialize to JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "code": self.code.as_str(),
                "message": self.message,
                "hint": self.hint,
                "retryable": self.retryable,
                "context": self.context,
            }
        })
    }

    /// Format for human-readable output.
    #[must_use]
    pub fn to_human(&self, color: bool) -> String {
        let mut output = String::new();

        if color {
            output.push_str("\x1b[31mError:\x1b[0m ");
        } else {
            output.push_str("Error: ");
        }

        output.push_str(&self.message);

        if let Some(hint) = &self.hint {
            output.push('\n');
            if color {
                output.push_str("\x1b[33mHint:\x1b[0m ");
            } else {
                output.push_str("Hint: ");
            }
            output.push_str(hint);
        }

        output
    }

    fn extract_code_and_context(err: &PerfError) -> (ErrorCode, Option<Value>) {
        match err {
            PerfError::DirectoryNotFound { path } => (
                ErrorCode::DirectoryNotFound,
                Some(json!({
                    "path": path.display().to_string(),
                    "expected_layout": [
                        "<set>.json (baseline data)",
                        "<set>_new.json (new test data, optional)"
                    ]
                })),
            ),
            PerfError::NoBenchmarkFiles { path } => (
                ErrorCode::NoBenchmarkFiles,
                Some(json!({"path": path.display().to_string()})),
            ),
            PerfError::PathNotFound { path } => (
                ErrorCode::PathNotFound,
                Some(json!({"path": path.display().to_string()})),
            ),
            PerfError::InvalidDataset { path, reason } => (
                ErrorCode::InvalidDataset,
                Some(json!({"path": path.display().to_string(), "reason": reason})),
            ),
            PerfError::Validation { field, reason } => (
                ErrorCode::ValidationFailed,
                Some(json!({"field": field, "reason": reason})),
            ),
            PerfError::ValidationErrors { errors } => (
                ErrorCode::ValidationFailed,
                Some(json!({
                    "errors": errors.iter()
                        .map(|e| json!({"field": e.field, "message": e.message}))
                        .collect::<Vec<_>>()
                })),
            ),
            PerfError::Config(_) => (ErrorCode::ConfigError, None),
            PerfError::InvalidConfigValue {
                key,
                value,
                expected,
            } => (
                ErrorCode::InvalidConfigValue,
                Some(json!({"key": key, "value": value, "expected": expected})),
            ),
            PerfError::Io(_) | PerfError::Walk(_) => (ErrorCode::IoError, None),
            PerfError::Json(_) => (ErrorCode::JsonError, None),
            PerfError::Yaml(_) => (ErrorCode::YamlError, None),
            PerfError::WithContext { context, source } => {
                let code = if source.is::<std::io::Error>() {
                    ErrorCode::IoError
                } else if source.is::<serde_json::Error>() {
                    ErrorCode::JsonError
                } else {
                    ErrorCode::InternalError
                };
                (code, Some(json!({"context": context})))
            }
            PerfError::Other(_) => (ErrorCode::InternalError, None),
        }
    }

    fn generate_hint(err: &PerfError) -> Option<String> {
        if let Some(suggestion) = err.suggestion() {
            return Some(suggestion.to_string());
        }

        match err {
            PerfError::ValidationErrors { errors } => Some(format!(
                "{} fields failed validation; metric values must be finite and non-negative",
                errors.len()
            )),
            PerfError::Validation { .. } => {
                Some("Metric values must be finite and non-negative".to_string())
            }
            PerfError::Yaml(_) => Some("Check the syntax of .perfbase.yaml".to_string()),
            _ => None,
        }
    }
}
