//! Compare command implementation.

use super::{load_options, warn_load_failures};
use crate::cli::CompareArgs;
use crate::compare::{Thresholds, compare_all};
use crate::config::Settings;
use crate::error::Result;
use crate::format::{ReportRow, build_rows, csv, format_row_line, terminal_width};
use crate::model::SummaryStatistics;
use crate::output::{ComparisonTable, OutputContext, SummaryPanel};
use crate::storage::discover;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Serialize)]
struct CompareOutput<'a> {
    summary: &'a SummaryStatistics,
    rows: &'a [ReportRow],
}

/// Execute the compare command.
///
/// # Errors
///
/// Returns `DirectoryNotFound` if the benchmark directory is missing.
pub fn execute(args: &CompareArgs, settings: &Settings, ctx: &OutputContext) -> Result<()> {
    let thresholds = Thresholds {
        unchanged: args.threshold.unwrap_or(settings.unchanged_threshold),
    };
    info!(dir = %settings.benchmark_dir.display(), threshold = thresholds.unchanged, "Comparing benchmarks");

    let report = discover(&settings.benchmark_dir, &load_options(settings))?;
    warn_load_failures(&report, ctx);

    let result = compare_all(&report, thresholds);
    let rows = build_rows(&result.records, thresholds.unchanged);
    debug!(rows = rows.len(), "Built comparison rows");

    if args.csv {
        let fields = csv::parse_fields(args.fields.as_deref());
        print!("{}", csv::to_csv_string(&rows, &fields));
        return Ok(());
    }

    if ctx.is_json() {
        return ctx.json(&CompareOutput {
            summary: &result.summary,
            rows: &rows,
        });
    }

    if rows.is_empty() {
        ctx.info(&format!(
            "No comparable test items in '{}'",
            settings.benchmark_dir.display()
        ));
        return Ok(());
    }

    if ctx.is_rich() {
        let table = ComparisonTable::new(&rows, ctx.theme())
            .detailed(args.detailed)
            .title("Benchmark comparison")
            .build();
        ctx.render(&table);
        let panel = SummaryPanel::new("Summary", &result.summary, ctx.theme()).build();
        ctx.render(&panel);
    } else if ctx.is_plain() {
        let width = terminal_width();
        for row in &rows {
            println!("{}", format_row_line(row, Some(width)));
        }
        println!();
        print_plain_summary(&result.summary);
    }

    Ok(())
}

/// Plain-text summary lines shared with the report command.
pub(crate) fn print_plain_summary(summary: &SummaryStatistics) {
    println!("Total benchmark sets: {}", summary.total_sets);
    println!("Total test items: {}", summary.total_tests);
    println!("Improved: {}", summary.improved);
    println!("Regressed: {}", summary.regressed);
    println!("Unchanged: {}", summary.unchanged);
}
