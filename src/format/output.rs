//! Report row data contract.
//!
//! One `ReportRow` per comparison record, carrying every value the HTML
//! table, terminal table and CSV export need.

use crate::model::{ChangeType, ComparisonRecord, DEFAULT_UNCHANGED_THRESHOLD};
use schemars::JsonSchema;
use serde::Serialize;
use std::fmt;

/// Presentation class of a percent change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StyleClass {
    /// Faster than baseline.
    Positive,
    /// Slower than baseline.
    Negative,
    Zero,
}

impl StyleClass {
    /// `positive` below `-threshold`, `negative` above `threshold`.
    #[must_use]
    pub fn for_change(change_percent: f64, threshold: f64) -> Self {
        if change_percent < -threshold {
            Self::Positive
        } else if change_percent > threshold {
            Self::Negative
        } else {
            Self::Zero
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Zero => "zero",
        }
    }
}

impl fmt::Display for StyleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percent magnitude with two decimals; speedups carry a `+` prefix.
///
/// A 10% faster median renders as `+10.00%`, a 5% slower one as `5.00%`.
#[must_use]
pub fn format_change(change_percent: f64) -> String {
    let sign = if change_percent < 0.0 { "+" } else { "" };
    format!("{sign}{:.2}%", change_percent.abs())
}

/// One table row of the report.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ReportRow {
    pub benchmark_set: String,
    pub test_item: String,
    pub baseline_mid_ms: f64,
    pub new_mid_ms: f64,
    pub baseline_avg_ms: f64,
    pub new_avg_ms: f64,
    pub baseline_min_ms: f64,
    pub new_min_ms: f64,
    pub baseline_max_ms: f64,
    pub new_max_ms: f64,
    pub change_percent: f64,
    pub change_type: ChangeType,
    pub change_display: String,
    pub style_class: StyleClass,
}

impl ReportRow {
    /// Build a row, classifying its style with `threshold`.
    #[must_use]
    pub fn from_record(record: &ComparisonRecord, threshold: f64) -> Self {
        Self {
            benchmark_set: record.benchmark_set.clone(),
            test_item: record.test_item.clone(),
            baseline_mid_ms: record.baseline_mid_ms,
            new_mid_ms: record.new_mid_ms,
            baseline_avg_ms: record.baseline_avg_ms,
            new_avg_ms: record.new_avg_ms,
            baseline_min_ms: record.baseline_min_ms,
            new_min_ms: record.new_min_ms,
            baseline_max_ms: record.baseline_max_ms,
            new_max_ms: record.new_max_ms,
            change_percent: record.change_percent,
            change_type: record.change_type,
            change_display: format_change(record.change_percent),
            style_class: StyleClass::for_change(record.change_percent, threshold),
        }
    }

    /// `"<set>: <item>"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}: {}", self.benchmark_set, self.test_item)
    }
}

impl From<&ComparisonRecord> for ReportRow {
    fn from(record: &ComparisonRecord) -> Self {
        Self::from_record(record, DEFAULT_UNCHANGED_THRESHOLD)
    }
}

/// Rows for all records, in record order.
#[must_use]
pub fn build_rows(records: &[ComparisonRecord], threshold: f64) -> Vec<ReportRow> {
    records
        .iter()
        .map(|record| ReportRow::from_record(record, threshold))
        .collect()
}
