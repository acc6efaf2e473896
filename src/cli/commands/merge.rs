//! Merge command implementation.

use super::{load_options, warn_load_failures};
use crate::cli::MergeArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::merge::{MergeOptions, MergeSummary, merge_report};
use crate::output::{MergeTable, OutputContext};
use crate::storage::discover;
use crate::util::progress::should_show_progress;
use tracing::{info, warn};

/// Execute the merge command.
///
/// A missing benchmark directory is reported and the command returns
/// successfully without writing anything.
///
/// # Errors
///
/// Returns an I/O error if merged files cannot be written.
pub fn execute(args: &MergeArgs, settings: &Settings, ctx: &OutputContext) -> Result<()> {
    let input = &settings.benchmark_dir;
    let output = args.output_dir.as_deref().unwrap_or(&settings.output_dir);

    if !input.is_dir() {
        warn!(dir = %input.display(), "Benchmark directory not found; nothing to merge");
        ctx.error_panel(
            "Benchmark directory not found",
            &format!("'{}' does not exist", input.display()),
            &[
                "Expected layout: <dir>/<set>.json (baseline) and <dir>/<set>_new.json (new)",
                "Pass --dir to point at another directory",
            ],
        );
        return ctx.json(&MergeSummary {
            input_dir: input.clone(),
            output_dir: output.to_path_buf(),
            ..MergeSummary::default()
        });
    }

    let options = MergeOptions {
        load: load_options(settings),
        decimals: args.decimals.unwrap_or(settings.decimals),
        show_progress: ctx.is_rich() && should_show_progress(),
    };

    let report = discover(input, &options.load)?;
    warn_load_failures(&report, ctx);
    let summary = merge_report(&report, output, &options)?;
    info!(
        sets = summary.sets.len(),
        improved = summary.improved_sets(),
        replaced = summary.replaced_items(),
        "Merge complete"
    );

    if ctx.is_json() {
        return ctx.json(&summary);
    }

    if summary.sets.is_empty() {
        ctx.info(&format!("No benchmark sets found in '{}'", input.display()));
        return Ok(());
    }

    if ctx.is_rich() {
        ctx.render(&MergeTable::new(&summary, ctx.theme()).build());
    } else if ctx.is_plain() {
        for set in &summary.sets {
            println!(
                "{}: {} -> {}",
                set.set_name,
                set.action.as_str(),
                set.output.display()
            );
        }
    }
    ctx.success(&format!(
        "Merged {} sets into {} ({} improved, {} items replaced)",
        summary.sets.len(),
        output.display(),
        summary.improved_sets(),
        summary.replaced_items()
    ));

    Ok(())
}
