//! `perfbase`: compare benchmark results against a baseline, render an HTML
//! performance report, and fold improvements back into the baseline.

pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod merge;
pub mod model;
pub mod output;
pub mod report;
pub mod storage;
pub mod util;
pub mod validation;

pub use error::{ErrorCode, PerfError, Result, StructuredError};
