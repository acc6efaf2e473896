//! Baseline vs new comparison.
//!
//! Items are matched by name across the two datasets of a set. Only items
//! with a median on both sides produce a `ComparisonRecord`; the rest are
//! skipped silently. Counters are folded through an explicit
//! `SummaryAccumulator`.

use crate::model::{
    BenchmarkSet, ChangeType, ComparisonRecord, DEFAULT_UNCHANGED_THRESHOLD, MetricSet,
    SummaryStatistics, percent_change,
};
use crate::storage::LoadReport;
use tracing::{debug, trace};

/// Classification thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Percent-change magnitude below which a change is ignored.
    pub unchanged: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            unchanged: DEFAULT_UNCHANGED_THRESHOLD,
        }
    }
}

/// Running counters for summary statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryAccumulator {
    total: usize,
    improved: usize,
    regressed: usize,
    unchanged: usize,
    improvement_sum: f64,
    regression_sum: f64,
    best_improvement: f64,
    worst_regression: f64,
}

impl SummaryAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one classified percent change.
    ///
    /// The extremes follow the sign of the change alone, so moves inside
    /// the unchanged band still count toward best and worst.
    pub fn record(&mut self, change_percent: f64, change: ChangeType) {
        self.total += 1;
        let magnitude = change_percent.abs();
        if change_percent < 0.0 {
            self.best_improvement = self.best_improvement.max(magnitude);
        } else if change_percent > 0.0 {
            self.worst_regression = self.worst_regression.max(magnitude);
        }
        match change {
            ChangeType::Improved => {
                self.improved += 1;
                self.improvement_sum += magnitude;
            }
            ChangeType::Regressed => {
                self.regressed += 1;
                self.regression_sum += magnitude;
            }
            ChangeType::Unchanged => self.unchanged += 1,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Produce the final statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn finish(
        &self,
        total_sets: usize,
        baseline_files: usize,
        new_files: usize,
    ) -> SummaryStatistics {
        let mean = |sum: f64, count: usize| {
            if count == 0 { 0.0 } else { sum / count as f64 }
        };
        SummaryStatistics {
            total_tests: self.total,
            total_sets,
            improved: self.improved,
            regressed: self.regressed,
            unchanged: self.unchanged,
            avg_improvement: mean(self.improvement_sum, self.improved),
            avg_regression: mean(self.regression_sum, self.regressed),
            best_improvement: self.best_improvement,
            worst_regression: self.worst_regression,
            baseline_files,
            new_files,
        }
    }
}

/// Compare one item; `None` when either side lacks a median.
#[must_use]
pub fn compare_item(
    set_name: &str,
    item: &str,
    baseline: &MetricSet,
    new: &MetricSet,
    thresholds: Thresholds,
) -> Option<ComparisonRecord> {
    let (Some(base_mid), Some(new_mid)) = (baseline.mid_ms, new.mid_ms) else {
        trace!(set = set_name, item, "Skipping item without median on both sides");
        return None;
    };

    let change_percent = percent_change(base_mid, new_mid);
    Some(ComparisonRecord {
        benchmark_set: set_name.to_string(),
        test_item: item.to_string(),
        baseline_mid_ms: base_mid,
        new_mid_ms: new_mid,
        change_percent,
        change_type: ChangeType::classify(change_percent, thresholds.unchanged),
        baseline_avg_ms: baseline.avg_ms.unwrap_or(0.0),
        new_avg_ms: new.avg_ms.unwrap_or(0.0),
        baseline_min_ms: baseline.min_ms.unwrap_or(0.0),
        new_min_ms: new.min_ms.unwrap_or(0.0),
        baseline_max_ms: baseline.max_ms.unwrap_or(0.0),
        new_max_ms: new.max_ms.unwrap_or(0.0),
    })
}

/// Compare every item of a set, folding into `acc`.
pub fn compare_set(
    set: &BenchmarkSet,
    thresholds: Thresholds,
    acc: &mut SummaryAccumulator,
) -> Vec<ComparisonRecord> {
    let empty = MetricSet::default();
    let mut records = Vec::new();

    for item in set.item_names() {
        let baseline = set
            .baseline
            .as_ref()
            .and_then(|d| d.get(item))
            .unwrap_or(&empty);
        let new = set.new.as_ref().and_then(|d| d.get(item)).unwrap_or(&empty);

        if let Some(record) = compare_item(&set.name, item, baseline, new, thresholds) {
            acc.record(record.change_percent, record.change_type);
            records.push(record);
        }
    }

    debug!(set = %set.name, compared = records.len(), "Compared benchmark set");
    records
}

/// All comparison records plus their summary.
#[derive(Debug, Clone, Default)]
pub struct ComparisonResult {
    pub records: Vec<ComparisonRecord>,
    pub summary: SummaryStatistics,
}

/// Compare every valid set of a load report.
#[must_use]
pub fn compare_all(report: &LoadReport, thresholds: Thresholds) -> ComparisonResult {
    let mut acc = SummaryAccumulator::new();
    let mut records = Vec::new();

    let mut total_sets = 0;
    for set in report.sets.values().filter(|s| s.has_baseline_data()) {
        total_sets += 1;
        records.extend(compare_set(set, thresholds, &mut acc));
    }

    let summary = acc.finish(
        total_sets,
        report.baseline_files.len(),
        report.new_files.len(),
    );
    ComparisonResult { records, summary }
}
