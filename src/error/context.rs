//! Context helpers for attaching paths and operations to errors.

use super::{PerfError, Result};
use std::path::PathBuf;

/// Extension trait adding context to foreign `Result`s.
pub trait ResultExt<T> {
    /// Wrap the error with a fixed context message.
    ///
    /// # Errors
    ///
    /// Returns `PerfError::WithContext` if `self` is an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Wrap the error with a lazily built context message.
    ///
    /// # Errors
    ///
    /// Returns `PerfError::WithContext` if `self` is an error.
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|source| PerfError::WithContext {
            context: context.into(),
            source: Box::new(source),
        })
    }

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| PerfError::WithContext {
            context: f().into(),
            source: Box::new(source),
        })
    }
}

/// Extension trait turning `None` into a path error.
pub trait OptionExt<T> {
    /// Convert `None` into `PerfError::PathNotFound`.
    ///
    /// # Errors
    ///
    /// Returns `PerfError::PathNotFound` if `self` is `None`.
    fn ok_or_path_not_found(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_path_not_found(self, path: impl Into<PathBuf>) -> Result<T> {
        self.ok_or_else(|| PerfError::PathNotFound { path: path.into() })
    }
}
