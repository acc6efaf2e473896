//! License header command implementation.

use crate::cli::LicenseArgs;
use crate::error::{PerfError, Result, ResultExt};
use crate::output::OutputContext;
use crate::util::{LicenseAction, LicenseOutcome, apply_license, render_license};
use chrono::{Datelike, Local};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct LicenseEntry<'a> {
    path: &'a Path,
    action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

#[derive(Serialize)]
struct LicenseOutput<'a> {
    year: i32,
    updated: usize,
    unchanged: usize,
    ignored: usize,
    failed: usize,
    files: Vec<LicenseEntry<'a>>,
}

fn count(outcomes: &[LicenseOutcome], action: &str) -> usize {
    outcomes
        .iter()
        .filter(|o| o.action.as_str() == action)
        .count()
}

/// Execute the license command.
///
/// # Errors
///
/// Returns an error if the template cannot be read or the target does not
/// exist. Per-file failures are reported, not returned.
pub fn execute(args: &LicenseArgs, ctx: &OutputContext) -> Result<()> {
    if !args.template.is_file() {
        return Err(PerfError::PathNotFound {
            path: args.template.clone(),
        });
    }
    let template = fs::read_to_string(&args.template)
        .with_context(|| format!("reading license template {}", args.template.display()))?;
    let year = args.year.unwrap_or_else(|| Local::now().year());
    let license = render_license(&template, year);

    let outcomes = apply_license(&args.target, &license)?;
    let updated = count(&outcomes, "updated");
    info!(path = %args.target.display(), year, files = outcomes.len(), updated, "License pass complete");

    if ctx.is_json() {
        let files = outcomes
            .iter()
            .map(|o| LicenseEntry {
                path: &o.path,
                action: o.action.as_str(),
                reason: match &o.action {
                    LicenseAction::Failed(reason) => Some(reason.as_str()),
                    _ => None,
                },
            })
            .collect();
        return ctx.json(&LicenseOutput {
            year,
            updated,
            unchanged: count(&outcomes, "unchanged"),
            ignored: count(&outcomes, "ignored"),
            failed: count(&outcomes, "failed"),
            files,
        });
    }

    for outcome in &outcomes {
        let path = outcome.path.display();
        match &outcome.action {
            LicenseAction::Updated => ctx.print(&format!("Update success: {path}")),
            LicenseAction::Unchanged => ctx.print(&format!("No need modify: {path}")),
            LicenseAction::Ignored => ctx.print(&format!("Ignore: {path}")),
            LicenseAction::Failed(reason) => ctx.warning(&format!("Failed: {path}: {reason}")),
        }
    }
    ctx.success(&format!(
        "Updated {updated} of {} files",
        outcomes.len()
    ));
    Ok(())
}
