//! Chart payload embedded in the HTML report.
//!
//! Field names are camelCase because the payload is consumed by the
//! report's JavaScript as-is.

use crate::format::output::ReportRow;
use crate::model::SummaryStatistics;
use serde::Serialize;
use std::cmp::Ordering;

/// Bar colors by change magnitude.
pub mod colors {
    pub const STRONG_IMPROVEMENT: &str = "rgba(72, 187, 120, 0.8)";
    pub const IMPROVEMENT: &str = "rgba(134, 239, 172, 0.8)";
    pub const STRONG_REGRESSION: &str = "rgba(239, 68, 68, 0.8)";
    pub const REGRESSION: &str = "rgba(252, 165, 165, 0.8)";
    pub const NEUTRAL: &str = "rgba(148, 163, 184, 0.8)";

    pub const BASELINE_LINE: &str = "rgba(76, 201, 240, 1)";
    pub const BASELINE_FILL: &str = "rgba(76, 201, 240, 0.2)";
    pub const NEW_LINE: &str = "rgba(245, 158, 11, 1)";
    pub const NEW_FILL: &str = "rgba(245, 158, 11, 0.2)";
}

/// Percent change beyond which a bar is drawn in the strong color.
const STRONG_CHANGE: f64 = 5.0;
/// Percent change beyond which a bar is colored at all.
const VISIBLE_CHANGE: f64 = 0.1;
const LINE_TENSION: f64 = 0.3;

/// How many rows feed each chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLimits {
    pub bars: usize,
    pub lines: usize,
    pub radar: usize,
}

impl Default for ChartLimits {
    fn default() -> Self {
        Self {
            bars: 15,
            lines: 10,
            radar: 8,
        }
    }
}

impl ChartLimits {
    /// Limits with `bars` top items; line and radar charts never show more.
    #[must_use]
    pub fn with_top(bars: usize) -> Self {
        let defaults = Self::default();
        Self {
            bars,
            lines: defaults.lines.min(bars),
            radar: defaults.radar.min(bars),
        }
    }
}

/// Bar color for a percent change.
#[must_use]
pub fn bar_color(change_percent: f64) -> &'static str {
    if change_percent < -STRONG_CHANGE {
        colors::STRONG_IMPROVEMENT
    } else if change_percent < -VISIBLE_CHANGE {
        colors::IMPROVEMENT
    } else if change_percent > STRONG_CHANGE {
        colors::STRONG_REGRESSION
    } else if change_percent > VISIBLE_CHANGE {
        colors::REGRESSION
    } else {
        colors::NEUTRAL
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PayloadSummary {
    /// `[improved, regressed, unchanged]`.
    pub distribution: [usize; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_background_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub test_names: Vec<String>,
    pub improvements: Vec<f64>,
    pub colors: Vec<String>,
    pub comparison_chart_data: ChartSeries,
    pub radar_chart_data: ChartSeries,
}

/// JSON payload handed to the report's charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub summary: PayloadSummary,
    pub chart_data: ChartData,
}

impl ReportPayload {
    /// Placeholder with zeroed distribution and empty series.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the payload from report rows.
    #[must_use]
    pub fn build(rows: &[ReportRow], summary: &SummaryStatistics, limits: ChartLimits) -> Self {
        if rows.is_empty() {
            return Self::empty();
        }

        let ranked = rank_by_magnitude(rows);

        let bars = &ranked[..limits.bars.min(ranked.len())];
        let test_names = bars.iter().map(|row| row.label()).collect();
        let improvements: Vec<f64> = bars.iter().map(|row| row.change_percent).collect();
        let colors = improvements
            .iter()
            .map(|&pc| bar_color(pc).to_string())
            .collect();

        let lines = &ranked[..limits.lines.min(ranked.len())];
        let comparison_chart_data = ChartSeries {
            labels: lines.iter().map(|row| row.label()).collect(),
            datasets: vec![
                ChartDataset {
                    label: "Baseline Data (mid_ms)".to_string(),
                    data: lines.iter().map(|row| row.baseline_mid_ms).collect(),
                    border_color: colors::BASELINE_LINE.to_string(),
                    background_color: colors::BASELINE_FILL.to_string(),
                    tension: Some(LINE_TENSION),
                    point_background_color: None,
                },
                ChartDataset {
                    label: "New Test Data (mid_ms)".to_string(),
                    data: lines.iter().map(|row| row.new_mid_ms).collect(),
                    border_color: colors::NEW_LINE.to_string(),
                    background_color: colors::NEW_FILL.to_string(),
                    tension: Some(LINE_TENSION),
                    point_background_color: None,
                },
            ],
        };

        let radar = &ranked[..limits.radar.min(ranked.len())];
        let radar_chart_data = ChartSeries {
            labels: radar.iter().map(|row| row.label()).collect(),
            datasets: vec![
                ChartDataset {
                    label: "Baseline Data (avg_ms)".to_string(),
                    data: radar.iter().map(|row| row.baseline_avg_ms).collect(),
                    border_color: colors::BASELINE_LINE.to_string(),
                    background_color: colors::BASELINE_FILL.to_string(),
                    tension: None,
                    point_background_color: Some(colors::BASELINE_LINE.to_string()),
                },
                ChartDataset {
                    label: "New Test Data (avg_ms)".to_string(),
                    data: radar.iter().map(|row| row.new_avg_ms).collect(),
                    border_color: colors::NEW_LINE.to_string(),
                    background_color: colors::NEW_FILL.to_string(),
                    tension: None,
                    point_background_color: Some(colors::NEW_LINE.to_string()),
                },
            ],
        };

        Self {
            summary: PayloadSummary {
                distribution: summary.distribution(),
            },
            chart_data: ChartData {
                test_names,
                improvements,
                colors,
                comparison_chart_data,
                radar_chart_data,
            },
        }
    }
}

/// Rows sorted by descending |change|; ties keep their input order.
#[must_use]
pub fn rank_by_magnitude(rows: &[ReportRow]) -> Vec<&ReportRow> {
    let mut ranked: Vec<&ReportRow> = rows.iter().collect();
    ranked.sort_by(|a, b| {
        b.change_percent
            .abs()
            .partial_cmp(&a.change_percent.abs())
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChangeType, ComparisonRecord};

    fn row(item: &str, pc: f64) -> ReportRow {
        let record = ComparisonRecord {
            benchmark_set: "s".to_string(),
            test_item: item.to_string(),
            baseline_mid_ms: 10.0,
            new_mid_ms: 10.0 + pc / 10.0,
            change_percent: pc,
            change_type: ChangeType::classify(pc, 0.1),
            baseline_avg_ms: 1.0,
            new_avg_ms: 2.0,
            baseline_min_ms: 0.0,
            new_min_ms: 0.0,
            baseline_max_ms: 0.0,
            new_max_ms: 0.0,
        };
        ReportRow::from(&record)
    }

    #[test]
    fn colors_follow_magnitude_bands() {
        assert_eq!(bar_color(-6.0), colors::STRONG_IMPROVEMENT);
        assert_eq!(bar_color(-1.0), colors::IMPROVEMENT);
        assert_eq!(bar_color(-0.1), colors::NEUTRAL);
        assert_eq!(bar_color(0.05), colors::NEUTRAL);
        assert_eq!(bar_color(2.0), colors::REGRESSION);
        assert_eq!(bar_color(5.5), colors::STRONG_REGRESSION);
    }

    #[test]
    fn empty_rows_give_placeholder() {
        let payload = ReportPayload::build(&[], &SummaryStatistics::default(), ChartLimits::default());
        let json = serde_json::to_value(&payload).unwrap();
        insta::assert_json_snapshot!(json, @r#"
        {
          "chartData": {
            "colors": [],
            "comparisonChartData": {
              "datasets": [],
              "labels": []
            },
            "improvements": [],
            "radarChartData": {
              "datasets": [],
              "labels": []
            },
            "testNames": []
          },
          "summary": {
            "distribution": [
              0,
              0,
              0
            ]
          }
        }
        "#);
    }

    #[test]
    fn ranks_by_magnitude_and_limits_series() {
        let rows: Vec<ReportRow> = (0..20)
            .map(|i| row(&format!("t{i:02}"), f64::from(i) - 10.0))
            .collect();
        let summary = SummaryStatistics {
            improved: 9,
            regressed: 9,
            unchanged: 2,
            ..SummaryStatistics::default()
        };
        let payload = ReportPayload::build(&rows, &summary, ChartLimits::default());
        let data = &payload.chart_data;

        assert_eq!(payload.summary.distribution, [9, 9, 2]);
        assert_eq!(data.test_names.len(), 15);
        assert_eq!(data.test_names[0], "s: t00");
        assert!((data.improvements[0] - -10.0).abs() < f64::EPSILON);
        assert_eq!(data.colors[0], colors::STRONG_IMPROVEMENT);
        assert_eq!(data.comparison_chart_data.labels.len(), 10);
        assert_eq!(data.comparison_chart_data.datasets.len(), 2);
        assert_eq!(data.radar_chart_data.labels.len(), 8);
        assert_eq!(data.radar_chart_data.datasets[1].data, vec![2.0; 8]);
    }

    #[test]
    fn ties_keep_input_order() {
        let rows = vec![row("a", 3.0), row("b", -3.0), row("c", 1.0)];
        let ranked: Vec<&str> = rank_by_magnitude(&rows)
            .iter()
            .map(|r| r.test_item.as_str())
            .collect();
        assert_eq!(ranked, vec!["a", "b", "c"]);
    }

    #[test]
    fn with_top_caps_secondary_charts() {
        assert_eq!(
            ChartLimits::with_top(5),
            ChartLimits {
                bars: 5,
                lines: 5,
                radar: 5
            }
        );
        assert_eq!(ChartLimits::with_top(30).lines, 10);
    }
}
