//! Shared utilities for `perfbase`.
//!
//! Common functionality used across modules:
//! - Float truncation for written benchmark data
//! - Progress indicators (for per-set batch work)
//! - Artifact copying
//! - License header rewriting

pub mod copy;
pub mod license;
pub mod progress;
pub mod truncate;

pub use copy::{CopyOutcome, copy_path};
pub use license::{LicenseAction, LicenseOutcome, apply_license, render_license};
pub use truncate::{DEFAULT_DECIMALS, truncate_f64, truncate_value};
