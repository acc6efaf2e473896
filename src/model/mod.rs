//! Core data types for `perfbase`.
//!
//! This module defines the fundamental types used throughout the application:
//! - `MetricSet` - Timing statistics for one test item
//! - `Dataset` - Test item name to `MetricSet` mapping (one JSON file)
//! - `BenchmarkSet` - A named baseline/new dataset pair
//! - `ChangeType` - Classification of a baseline vs new change
//! - `ComparisonRecord` - One compared (set, item) pair
//! - `SummaryStatistics` - Aggregates over all comparison records

use crate::util::truncate::{truncate_f64, truncate_value};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Magnitude below which a percent change counts as unchanged.
pub const DEFAULT_UNCHANGED_THRESHOLD: f64 = 0.1;

/// Optional statistical fields that the merger may copy into a baseline entry.
pub const EXTENDED_FIELDS: &[&str] = &["std_dev", "cv", "iterations", "total_time_ms"];

/// Timing statistics for one test item.
///
/// Recognized keys are typed; anything else is carried through untouched in
/// `extra`. Float keys that were JSON integers on input are listed in
/// `integer_fields` and serialize back as integers.
#[derive(Debug, Clone, Default, PartialEq, JsonSchema)]
pub struct MetricSet {
    /// Median execution time in milliseconds (primary comparison metric).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
    /// Coefficient of variation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time_ms: Option<f64>,
    /// Unrecognized keys, preserved as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
    #[serde(skip)]
    pub integer_fields: BTreeSet<&'static str>,
}

/// Wire form of `MetricSet`: float keys keep their JSON number kind.
#[derive(Serialize, Deserialize)]
struct MetricSetRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mid_ms: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avg_ms: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_ms: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_ms: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    std_dev: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cv: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iterations: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_time_ms: Option<Number>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl From<MetricSetRepr> for MetricSet {
    fn from(repr: MetricSetRepr) -> Self {
        let mut integer_fields = BTreeSet::new();
        let mut read = |key: &'static str, number: Option<Number>| {
            number.and_then(|n| {
                if !n.is_f64() {
                    integer_fields.insert(key);
                }
                n.as_f64()
            })
        };
        let mid_ms = read("mid_ms", repr.mid_ms);
        let avg_ms = read("avg_ms", repr.avg_ms);
        let min_ms = read("min_ms", repr.min_ms);
        let max_ms = read("max_ms", repr.max_ms);
        let std_dev = read("std_dev", repr.std_dev);
        let cv = read("cv", repr.cv);
        let total_time_ms = read("total_time_ms", repr.total_time_ms);
        Self {
            mid_ms,
            avg_ms,
            min_ms,
            max_ms,
            std_dev,
            cv,
            iterations: repr.iterations,
            total_time_ms,
            extra: repr.extra,
            integer_fields,
        }
    }
}

impl From<&MetricSet> for MetricSetRepr {
    fn from(metrics: &MetricSet) -> Self {
        let write = |key: &str, value: Option<f64>| {
            value.and_then(|v| metric_number(v, metrics.integer_fields.contains(key)))
        };
        Self {
            mid_ms: write("mid_ms", metrics.mid_ms),
            avg_ms: write("avg_ms", metrics.avg_ms),
            min_ms: write("min_ms", metrics.min_ms),
            max_ms: write("max_ms", metrics.max_ms),
            std_dev: write("std_dev", metrics.std_dev),
            cv: write("cv", metrics.cv),
            iterations: metrics.iterations,
            total_time_ms: write("total_time_ms", metrics.total_time_ms),
            extra: metrics.extra.clone(),
        }
    }
}

/// JSON number for a metric; whole values flagged as integers stay integers.
#[allow(clippy::cast_possible_truncation)]
fn metric_number(value: f64, integer: bool) -> Option<Number> {
    if integer && value.fract() == 0.0 && value.abs() < 9.0e15 {
        Some(Number::from(value as i64))
    } else {
        Number::from_f64(value)
    }
}

impl Serialize for MetricSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MetricSetRepr::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MetricSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        MetricSetRepr::deserialize(deserializer).map(Self::from)
    }
}

impl MetricSet {
    /// Metric set with only a median.
    #[must_use]
    pub fn with_mid(mid_ms: f64) -> Self {
        Self {
            mid_ms: Some(mid_ms),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mid_ms.is_none()
            && self.avg_ms.is_none()
            && self.min_ms.is_none()
            && self.max_ms.is_none()
            && self.std_dev.is_none()
            && self.cv.is_none()
            && self.iterations.is_none()
            && self.total_time_ms.is_none()
            && self.extra.is_empty()
    }

    /// Named float metrics, in declaration order.
    #[must_use]
    pub fn float_fields(&self) -> [(&'static str, Option<f64>); 7] {
        [
            ("mid_ms", self.mid_ms),
            ("avg_ms", self.avg_ms),
            ("min_ms", self.min_ms),
            ("max_ms", self.max_ms),
            ("std_dev", self.std_dev),
            ("cv", self.cv),
            ("total_time_ms", self.total_time_ms),
        ]
    }

    /// Whether any extended field is set.
    #[must_use]
    pub fn has_extended_fields(&self) -> bool {
        self.std_dev.is_some()
            || self.cv.is_some()
            || self.iterations.is_some()
            || self.total_time_ms.is_some()
    }

    /// True when `new` has a strictly lower median than `self`.
    #[must_use]
    pub fn is_improved_by(&self, new: &Self) -> bool {
        matches!((self.mid_ms, new.mid_ms), (Some(base), Some(candidate)) if candidate < base)
    }

    /// Copy extended fields set in `other` but unset here.
    ///
    /// Returns the names of the fields that were copied.
    pub fn enrich_from(&mut self, other: &Self) -> Vec<&'static str> {
        let copied = self.copy_missing_extended(other);
        for field in &copied {
            if other.integer_fields.contains(field) {
                self.integer_fields.insert(*field);
            }
        }
        copied
    }

    fn copy_missing_extended(&mut self, other: &Self) -> Vec<&'static str> {
        let mut copied = Vec::new();
        if self.std_dev.is_none() && other.std_dev.is_some() {
            self.std_dev = other.std_dev;
            copied.push("std_dev");
        }
        if self.cv.is_none() && other.cv.is_some() {
            self.cv = other.cv;
            copied.push("cv");
        }
        if self.iterations.is_none() && other.iterations.is_some() {
            self.iterations = other.iterations;
            copied.push("iterations");
        }
        if self.total_time_ms.is_none() && other.total_time_ms.is_some() {
            self.total_time_ms = other.total_time_ms;
            copied.push("total_time_ms");
        }
        copied
    }

    /// Copy with every float truncated to `decimals` digits, including
    /// floats nested inside pass-through values.
    #[must_use]
    pub fn truncated(&self, decimals: u32) -> Self {
        let trunc = |v: Option<f64>| v.map(|x| truncate_f64(x, decimals));
        let mut extra = self.extra.clone();
        for value in extra.values_mut() {
            truncate_value(value, decimals);
        }
        Self {
            mid_ms: trunc(self.mid_ms),
            avg_ms: trunc(self.avg_ms),
            min_ms: trunc(self.min_ms),
            max_ms: trunc(self.max_ms),
            std_dev: trunc(self.std_dev),
            cv: trunc(self.cv),
            iterations: self.iterations,
            total_time_ms: trunc(self.total_time_ms),
            extra,
            integer_fields: self.integer_fields.clone(),
        }
    }
}

/// Test item name to metrics for one benchmark file.
pub type Dataset = BTreeMap<String, MetricSet>;

/// Truncate every metric of a dataset.
#[must_use]
pub fn truncate_dataset(dataset: &Dataset, decimals: u32) -> Dataset {
    dataset
        .iter()
        .map(|(name, metrics)| (name.clone(), metrics.truncated(decimals)))
        .collect()
}

/// Which side of a baseline/new pair a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Baseline,
    New,
}

impl Side {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::New => "new",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named group of test items with at most one baseline and one new dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkSet {
    pub name: String,
    pub baseline: Option<Dataset>,
    pub new: Option<Dataset>,
    pub baseline_path: Option<PathBuf>,
    pub new_path: Option<PathBuf>,
}

impl BenchmarkSet {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_baseline(mut self, dataset: Dataset) -> Self {
        self.baseline = Some(dataset);
        self
    }

    #[must_use]
    pub fn with_new(mut self, dataset: Dataset) -> Self {
        self.new = Some(dataset);
        self
    }

    /// Sets are only processed when they have a baseline.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.baseline.is_some()
    }

    /// A baseline with at least one item; only these count as compared sets.
    #[must_use]
    pub fn has_baseline_data(&self) -> bool {
        self.baseline.as_ref().is_some_and(|d| !d.is_empty())
    }

    /// Union of item names across both sides, sorted.
    #[must_use]
    pub fn item_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .baseline
            .iter()
            .chain(self.new.iter())
            .flat_map(|dataset| dataset.keys().map(String::as_str))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

/// Direction of a baseline vs new change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// New is faster.
    Improved,
    /// New is slower.
    Regressed,
    Unchanged,
}

impl ChangeType {
    /// Classify a percent change.
    ///
    /// `|pc| < threshold` is unchanged; a magnitude of exactly `threshold`
    /// counts as a change.
    #[must_use]
    pub fn classify(percent_change: f64, threshold: f64) -> Self {
        if percent_change.abs() < threshold {
            Self::Unchanged
        } else if percent_change < 0.0 {
            Self::Improved
        } else {
            Self::Regressed
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Improved => "improved",
            Self::Regressed => "regressed",
            Self::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = crate::error::PerfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "improved" => Ok(Self::Improved),
            "regressed" => Ok(Self::Regressed),
            "unchanged" => Ok(Self::Unchanged),
            other => Err(crate::error::PerfError::validation(
                "change_type",
                format!("unknown classification '{other}'"),
            )),
        }
    }
}

/// Percent change of the median; zero when the baseline is not positive.
#[must_use]
pub fn percent_change(baseline_mid: f64, new_mid: f64) -> f64 {
    if baseline_mid > 0.0 {
        (new_mid - baseline_mid) / baseline_mid * 100.0
    } else {
        0.0
    }
}

/// Result of comparing one test item across baseline and new data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComparisonRecord {
    pub benchmark_set: String,
    pub test_item: String,
    pub baseline_mid_ms: f64,
    pub new_mid_ms: f64,
    pub change_percent: f64,
    pub change_type: ChangeType,
    pub baseline_avg_ms: f64,
    pub new_avg_ms: f64,
    pub baseline_min_ms: f64,
    pub new_min_ms: f64,
    pub baseline_max_ms: f64,
    pub new_max_ms: f64,
}

impl ComparisonRecord {
    /// Label used in charts and tables: `"<set>: <item>"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}: {}", self.benchmark_set, self.test_item)
    }
}

/// Aggregate counters over all comparison records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SummaryStatistics {
    pub total_tests: usize,
    pub total_sets: usize,
    pub improved: usize,
    pub regressed: usize,
    pub unchanged: usize,
    /// Mean magnitude of improvements (zero without improvements).
    pub avg_improvement: f64,
    /// Mean magnitude of regressions (zero without regressions).
    pub avg_regression: f64,
    pub best_improvement: f64,
    pub worst_regression: f64,
    pub baseline_files: usize,
    pub new_files: usize,
}

impl SummaryStatistics {
    /// Counts in `[improved, regressed, unchanged]` order.
    #[must_use]
    pub const fn distribution(&self) -> [usize; 3] {
        [self.improved, self.regressed, self.unchanged]
    }
}
