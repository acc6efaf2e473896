//! Benchmark file discovery and parsing.
//!
//! A benchmark directory holds `<set>.json` baseline files and optional
//! `<set>_new.json` files with fresh measurements. Files are read in sorted
//! path order; a file that cannot be read, parsed or validated is skipped
//! with a warning and recorded as a `LoadFailure`.

use crate::error::{PerfError, Result, ResultExt};
use crate::model::{BenchmarkSet, Dataset, Side};
use crate::validation::DatasetValidator;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Stem suffix marking a file as new measurements.
pub const DEFAULT_NEW_SUFFIX: &str = "_new";

const JSON_EXTENSION: &str = "json";

/// Options controlling discovery.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub new_suffix: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            new_suffix: DEFAULT_NEW_SUFFIX.to_string(),
        }
    }
}

/// Derive the set name and side from a file stem.
///
/// The suffix is stripped once, from the end only. A stem that is exactly
/// the suffix is new data for the set with the empty name.
#[must_use]
pub fn classify_stem(stem: &str, new_suffix: &str) -> (String, Side) {
    match stem.strip_suffix(new_suffix) {
        Some(set) if !new_suffix.is_empty() => (set.to_string(), Side::New),
        _ => (stem.to_string(), Side::Baseline),
    }
}

/// A file that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub set_name: String,
    pub side: Side,
    pub reason: String,
}

/// Per-file result of discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Loaded {
        path: PathBuf,
        set_name: String,
        side: Side,
        items: usize,
    },
    Skipped(LoadFailure),
}

impl FileOutcome {
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// Everything discovered in a benchmark directory.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub dir: PathBuf,
    /// Sets with a loaded baseline, keyed by set name.
    pub sets: BTreeMap<String, BenchmarkSet>,
    /// New datasets whose baseline file does not exist at all.
    pub orphans: BTreeMap<String, BenchmarkSet>,
    pub baseline_files: Vec<PathBuf>,
    pub new_files: Vec<PathBuf>,
    pub failures: Vec<LoadFailure>,
    pub outcomes: Vec<FileOutcome>,
}

impl LoadReport {
    /// True when the directory held no JSON files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.baseline_files.is_empty() && self.new_files.is_empty()
    }

    /// Failure recorded for the given set and side, if any.
    #[must_use]
    pub fn failure_for(&self, set_name: &str, side: Side) -> Option<&LoadFailure> {
        self.failures
            .iter()
            .find(|f| f.set_name == set_name && f.side == side)
    }

    /// Set names with a baseline file that failed to load.
    pub fn failed_baselines(&self) -> impl Iterator<Item = &LoadFailure> {
        self.failures.iter().filter(|f| f.side == Side::Baseline)
    }
}

/// Read and parse one benchmark file into a validated dataset.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or `InvalidDataset`
/// when it is not an object of metric objects or fails validation.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let dataset: Dataset =
        serde_json::from_str(&text).map_err(|e| PerfError::invalid_dataset(path, e.to_string()))?;

    DatasetValidator::validate(&dataset).map_err(|errors| {
        let reason = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        PerfError::invalid_dataset(path, reason)
    })?;

    Ok(dataset)
}

/// List `*.json` files directly inside `dir`, sorted by path.
///
/// # Errors
///
/// Returns `DirectoryNotFound` if `dir` is not a directory.
pub fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(PerfError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == JSON_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Discover, parse and group the benchmark files in `dir`.
///
/// # Errors
///
/// Returns `DirectoryNotFound` when `dir` does not exist. Per-file problems
/// are recorded in the report instead.
pub fn discover(dir: &Path, options: &LoadOptions) -> Result<LoadReport> {
    let files = list_json_files(dir)?;
    debug!(dir = %dir.display(), count = files.len(), "Discovered benchmark files");

    let mut report = LoadReport {
        dir: dir.to_path_buf(),
        ..LoadReport::default()
    };
    let mut groups: BTreeMap<String, BenchmarkSet> = BTreeMap::new();

    for path in files {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!(path = %path.display(), "Skipping file with non UTF-8 name");
            continue;
        };
        let (set_name, side) = classify_stem(stem, &options.new_suffix);

        match side {
            Side::Baseline => report.baseline_files.push(path.clone()),
            Side::New => report.new_files.push(path.clone()),
        }

        match load_dataset(&path) {
            Ok(dataset) => {
                debug!(
                    path = %path.display(),
                    set = %set_name,
                    side = %side,
                    items = dataset.len(),
                    "Loaded benchmark file"
                );
                report.outcomes.push(FileOutcome::Loaded {
                    path: path.clone(),
                    set_name: set_name.clone(),
                    side,
                    items: dataset.len(),
                });
                let set = groups
                    .entry(set_name.clone())
                    .or_insert_with(|| BenchmarkSet::new(set_name));
                match side {
                    Side::Baseline => {
                        set.baseline = Some(dataset);
                        set.baseline_path = Some(path);
                    }
                    Side::New => {
                        set.new = Some(dataset);
                        set.new_path = Some(path);
                    }
                }
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Skipping benchmark file");
                let failure = LoadFailure {
                    path,
                    set_name,
                    side,
                    reason: err.to_string(),
                };
                report.failures.push(failure.clone());
                report.outcomes.push(FileOutcome::Skipped(failure));
            }
        }
    }

    for (name, set) in groups {
        if set.is_valid() {
            report.sets.insert(name, set);
        } else if report.failure_for(&name, Side::Baseline).is_none() {
            info!(set = %name, "New data without baseline");
            report.orphans.insert(name, set);
        }
    }

    Ok(report)
}
