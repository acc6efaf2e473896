//! Merging new measurements back into baseline data.
//!
//! Per item present on both sides:
//! - a strictly lower new median replaces the whole baseline entry
//! - otherwise extended statistics present only in the new entry are copied
//!   into the baseline entry
//!
//! Items that only exist in the new data are not added. A new dataset with
//! no baseline file becomes the baseline. Output goes to a separate
//! directory; input files are never modified.

use crate::error::{Result, ResultExt};
use crate::model::Dataset;
use crate::storage::{LoadOptions, LoadReport, discover, write_atomic, write_dataset};
use crate::util::DEFAULT_DECIMALS;
use crate::util::progress::create_progress_bar;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of merging one baseline/new dataset pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOutcome {
    pub dataset: Dataset,
    /// Items fully replaced by the new entry.
    pub replaced: Vec<String>,
    /// Items that received extended fields from the new entry.
    pub enriched: Vec<String>,
}

impl MergeOutcome {
    #[must_use]
    pub fn has_improvements(&self) -> bool {
        !self.replaced.is_empty()
    }
}

/// Merge `new` into a copy of `baseline`.
#[must_use]
pub fn merge_datasets(baseline: &Dataset, new: &Dataset) -> MergeOutcome {
    let mut outcome = MergeOutcome {
        dataset: baseline.clone(),
        ..MergeOutcome::default()
    };

    for (item, entry) in &mut outcome.dataset {
        let Some(candidate) = new.get(item) else {
            continue;
        };

        if entry.is_improved_by(candidate) {
            debug!(item = %item, "Replacing with improved measurement");
            *entry = candidate.clone();
            outcome.replaced.push(item.clone());
            continue;
        }

        let copied = entry.enrich_from(candidate);
        if !copied.is_empty() {
            debug!(item = %item, fields = ?copied, "Copied extended fields");
            outcome.enriched.push(item.clone());
        }
    }

    outcome
}

/// What happened to one set during a directory merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MergeAction {
    /// Baseline and new data were merged.
    Merged { replaced: usize, enriched: usize },
    /// Baseline had no new data and was written unchanged.
    Copied,
    /// New data without a baseline became the baseline.
    Created,
    /// Baseline file could not be loaded and was copied byte-for-byte.
    Fallback { reason: String },
}

impl MergeAction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Merged { .. } => "merged",
            Self::Copied => "copied",
            Self::Created => "created",
            Self::Fallback { .. } => "fallback",
        }
    }
}

/// Per-set merge result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetMerge {
    pub set_name: String,
    pub output: PathBuf,
    #[serde(flatten)]
    pub action: MergeAction,
}

/// Result of merging a whole benchmark directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeSummary {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub sets: Vec<SetMerge>,
    /// Files that could not be loaded, including fallbacks.
    pub skipped_files: Vec<PathBuf>,
}

impl MergeSummary {
    /// Number of sets with at least one replaced item.
    #[must_use]
    pub fn improved_sets(&self) -> usize {
        self.sets
            .iter()
            .filter(|s| matches!(s.action, MergeAction::Merged { replaced, .. } if replaced > 0))
            .count()
    }

    /// Total items replaced across sets.
    #[must_use]
    pub fn replaced_items(&self) -> usize {
        self.sets
            .iter()
            .map(|s| match s.action {
                MergeAction::Merged { replaced, .. } => replaced,
                _ => 0,
            })
            .sum()
    }

    #[must_use]
    pub fn count(&self, action: &str) -> usize {
        self.sets.iter().filter(|s| s.action.as_str() == action).count()
    }
}

/// Options for a directory merge.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub load: LoadOptions,
    pub decimals: u32,
    pub show_progress: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            load: LoadOptions::default(),
            decimals: DEFAULT_DECIMALS,
            show_progress: false,
        }
    }
}

/// Discover the benchmark files in `input` and write merged sets to `output`.
///
/// # Errors
///
/// Returns `DirectoryNotFound` if `input` is missing, or an I/O error when
/// writing fails.
pub fn merge_directory(input: &Path, output: &Path, options: &MergeOptions) -> Result<MergeSummary> {
    let report = discover(input, &options.load)?;
    merge_report(&report, output, options)
}

/// Write merged sets for an already loaded report.
///
/// # Errors
///
/// Returns an I/O error when the output directory or a file cannot be
/// written.
pub fn merge_report(report: &LoadReport, output: &Path, options: &MergeOptions) -> Result<MergeSummary> {
    let mut summary = MergeSummary {
        input_dir: report.dir.clone(),
        output_dir: output.to_path_buf(),
        skipped_files: report.failures.iter().map(|f| f.path.clone()).collect(),
        ..MergeSummary::default()
    };
    if report.is_empty() {
        return Ok(summary);
    }

    fs::create_dir_all(output).with_context(|| format!("creating {}", output.display()))?;

    let total = report.sets.len() + report.orphans.len() + report.failed_baselines().count();
    let progress = create_progress_bar(total as u64, "Merging benchmark sets", options.show_progress);

    for (name, set) in &report.sets {
        progress.set_message(name.clone());
        let dest = output.join(format!("{name}.json"));
        let Some(baseline) = set.baseline.as_ref() else {
            continue;
        };

        let action = if let Some(new) = set.new.as_ref() {
            let outcome = merge_datasets(baseline, new);
            write_dataset(&dest, &outcome.dataset, options.decimals)?;
            if outcome.has_improvements() {
                info!(set = %name, replaced = outcome.replaced.len(), "Merged improved results");
            } else {
                info!(set = %name, "No improvements; baseline kept");
            }
            MergeAction::Merged {
                replaced: outcome.replaced.len(),
                enriched: outcome.enriched.len(),
            }
        } else {
            write_dataset(&dest, baseline, options.decimals)?;
            info!(set = %name, "No new data; baseline copied");
            MergeAction::Copied
        };

        summary.sets.push(SetMerge {
            set_name: name.clone(),
            output: dest,
            action,
        });
        progress.inc(1);
    }

    for (name, set) in &report.orphans {
        progress.set_message(name.clone());
        let Some(new) = set.new.as_ref() else {
            continue;
        };
        let dest = output.join(format!("{name}.json"));
        write_dataset(&dest, new, options.decimals)?;
        info!(set = %name, "Created baseline from new data");
        summary.sets.push(SetMerge {
            set_name: name.clone(),
            output: dest,
            action: MergeAction::Created,
        });
        progress.inc(1);
    }

    for failure in report.failed_baselines() {
        progress.set_message(failure.set_name.clone());
        let dest = output.join(format!("{}.json", failure.set_name));
        warn!(
            path = %failure.path.display(),
            reason = %failure.reason,
            "Baseline could not be loaded; copying it unchanged"
        );
        let raw = fs::read(&failure.path)
            .with_context(|| format!("reading {}", failure.path.display()))?;
        write_atomic(&dest, &raw)?;
        summary.sets.push(SetMerge {
            set_name: failure.set_name.clone(),
            output: dest,
            action: MergeAction::Fallback {
                reason: failure.reason.clone(),
            },
        });
        progress.inc(1);
    }

    progress.finish_and_clear();
    summary.sets.sort_by(|a, b| a.set_name.cmp(&b.set_name));

    Ok(summary)
}
