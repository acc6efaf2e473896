//! Command implementations.

pub mod compare;
pub mod completions;
pub mod config;
pub mod copy;
pub mod license;
pub mod merge;
pub mod report;
pub mod schema;
pub mod version;

use crate::config::Settings;
use crate::output::OutputContext;
use crate::storage::{LoadOptions, LoadReport};

/// Loader options derived from resolved settings.
pub(crate) fn load_options(settings: &Settings) -> LoadOptions {
    LoadOptions {
        new_suffix: settings.new_suffix.clone(),
    }
}

/// Surface files the loader had to skip.
pub(crate) fn warn_load_failures(report: &LoadReport, ctx: &OutputContext) {
    for failure in &report.failures {
        ctx.warning(&format!(
            "Skipped {} ({}): {}",
            failure.path.display(),
            failure.side,
            failure.reason
        ));
    }
}
