//! Report command implementation.

use super::compare::print_plain_summary;
use super::{load_options, warn_load_failures};
use crate::cli::ReportArgs;
use crate::compare::{Thresholds, compare_all};
use crate::config::Settings;
use crate::error::Result;
use crate::format::ChartLimits;
use crate::model::SummaryStatistics;
use crate::output::{OutputContext, SummaryPanel};
use crate::report::{ReportDocument, ReportOptions};
use crate::storage::discover;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

#[derive(Serialize)]
struct ReportOutput<'a> {
    generated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    report_file: Option<&'a Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a SummaryStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// Execute the report command.
///
/// An empty benchmark directory is reported as a warning, not an error.
///
/// # Errors
///
/// Returns `DirectoryNotFound` if the benchmark directory is missing, or an
/// I/O error if the report cannot be written.
pub fn execute(args: &ReportArgs, settings: &Settings, ctx: &OutputContext) -> Result<()> {
    let output = args.output.as_deref().unwrap_or(&settings.report_file);
    let options = ReportOptions {
        thresholds: Thresholds {
            unchanged: args.threshold.unwrap_or(settings.unchanged_threshold),
        },
        limits: args
            .top
            .map_or_else(|| settings.chart_limits(), ChartLimits::with_top),
    };

    let report = discover(&settings.benchmark_dir, &load_options(settings))?;
    if report.is_empty() {
        let reason = format!(
            "No JSON files found in '{}'",
            settings.benchmark_dir.display()
        );
        warn!(dir = %settings.benchmark_dir.display(), "No benchmark files; report not generated");
        ctx.warning(&reason);
        return ctx.json(&ReportOutput {
            generated: false,
            report_file: None,
            summary: None,
            reason: Some(reason),
        });
    }
    warn_load_failures(&report, ctx);

    let result = compare_all(&report, options.thresholds);
    let document = ReportDocument::from_comparison(&result, &options);
    document.write_html(output)?;
    info!(path = %output.display(), tests = result.summary.total_tests, "Report generated");

    if ctx.is_json() {
        return ctx.json(&ReportOutput {
            generated: true,
            report_file: Some(output),
            summary: Some(&result.summary),
            reason: None,
        });
    }

    ctx.success(&format!(
        "Performance report generated: {}",
        output.display()
    ));
    if ctx.is_rich() {
        let panel = SummaryPanel::new("Summary", &result.summary, ctx.theme()).build();
        ctx.render(&panel);
    } else if ctx.is_plain() {
        print_plain_summary(&result.summary);
    }

    Ok(())
}
