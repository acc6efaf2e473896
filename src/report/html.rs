//! HTML rendering of the comparison report.
//!
//! The page is a fixed template compiled into the binary with four
//! placeholders: `{{timestamp}}`, `{{summary_section}}`,
//! `{{comparison_table}}` and `{{performance_data}}`.

use crate::error::Result;
use crate::format::{ReportPayload, ReportRow, format_ms};
use crate::model::SummaryStatistics;
use std::fmt::Write as _;

/// Report page template.
pub const TEMPLATE: &str = include_str!("template.html");

const NO_DATA: &str = r#"<div class="no-data">No data available for comparison</div>"#;

/// Escape text for HTML element content and attribute values.
#[must_use]
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Substitute `{{name}}` placeholders in a single pass.
///
/// Substituted values are never rescanned; unknown placeholders are kept.
#[must_use]
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

/// Summary cards: overview, improvements, regressions, data statistics.
#[must_use]
pub fn summary_section(summary: &SummaryStatistics) -> String {
    let improvement_icon = if summary.improved > 0 { "&#9660;" } else { "&#8211;" };
    let regression_icon = if summary.regressed > 0 { "&#9650;" } else { "&#8211;" };

    format!(
        r#"<div class="summary-cards">
            <div class="card">
                <h3>Test Overview</h3>
                <p>Total Benchmark Sets: <strong>{total_sets}</strong></p>
                <p>Total Test Items: <strong>{total_tests}</strong></p>
                <div class="counts">
                    <div><div class="count-value improvement">{improved}</div><div class="count-label">Improved</div></div>
                    <div><div class="count-value regression">{regressed}</div><div class="count-label">Regressed</div></div>
                    <div><div class="count-value neutral">{unchanged}</div><div class="count-label">Unchanged</div></div>
                </div>
            </div>
            <div class="card">
                <h3>{improvement_icon} Performance Improvements</h3>
                <p>Average Improvement: <strong class="improvement">{avg_improvement:.2}%</strong></p>
                <p>Best Improvement: <strong class="improvement">{best_improvement:.2}%</strong></p>
                <p>Improved Items: <strong>{improved}</strong></p>
            </div>
            <div class="card">
                <h3>{regression_icon} Performance Regressions</h3>
                <p>Average Regression: <strong class="regression">{avg_regression:.2}%</strong></p>
                <p>Worst Regression: <strong class="regression">{worst_regression:.2}%</strong></p>
                <p>Regressed Items: <strong>{regressed}</strong></p>
            </div>
            <div class="card">
                <h3>Data Statistics</h3>
                <p>Baseline Files: <strong>{baseline_files}</strong></p>
                <p>New Test Files: <strong>{new_files}</strong></p>
                <p>Valid Comparisons: <strong>{total_tests}</strong></p>
                <p>Benchmark Sets: <strong>{total_sets}</strong></p>
            </div>
        </div>"#,
        total_sets = summary.total_sets,
        total_tests = summary.total_tests,
        improved = summary.improved,
        regressed = summary.regressed,
        unchanged = summary.unchanged,
        avg_improvement = summary.avg_improvement,
        best_improvement = summary.best_improvement,
        avg_regression = summary.avg_regression,
        worst_regression = summary.worst_regression,
        baseline_files = summary.baseline_files,
        new_files = summary.new_files,
    )
}

/// Comparison table, or the "no data" placeholder when there are no rows.
#[must_use]
pub fn comparison_table(rows: &[ReportRow]) -> String {
    if rows.is_empty() {
        return NO_DATA.to_string();
    }

    let mut body = String::new();
    for row in rows {
        let _ = write!(
            body,
            r#"
                    <tr>
                        <td class="benchmark-set">{set}</td>
                        <td class="test-name">{item}</td>
                        <td class="metric-value">{base_mid}</td>
                        <td class="metric-value">{new_mid}</td>
                        <td data-sort="{pc}"><span class="percentage-change {class}">{display}</span></td>
                        <td class="metric-value">{base_avg}</td>
                        <td class="metric-value">{new_avg}</td>
                        <td class="metric-value">{new_max}</td>
                        <td class="metric-value">{new_min}</td>
                    </tr>"#,
            set = html_escape(&row.benchmark_set),
            item = html_escape(&row.test_item),
            base_mid = format_ms(row.baseline_mid_ms),
            new_mid = format_ms(row.new_mid_ms),
            pc = row.change_percent,
            class = row.style_class,
            display = html_escape(&row.change_display),
            base_avg = format_ms(row.baseline_avg_ms),
            new_avg = format_ms(row.new_avg_ms),
            new_max = format_ms(row.new_max_ms),
            new_min = format_ms(row.new_min_ms),
        );
    }

    format!(
        r#"<div class="table-container">
                <table id="comparisonTable">
                    <thead>
                        <tr>
                            <th>Benchmark Set</th>
                            <th>Test Item</th>
                            <th>Baseline Median (ms)</th>
                            <th>New Median (ms)</th>
                            <th>Change %</th>
                            <th>Baseline Avg (ms)</th>
                            <th>New Avg (ms)</th>
                            <th>New Max (ms)</th>
                            <th>New Min (ms)</th>
                        </tr>
                    </thead>
                    <tbody>{body}
                    </tbody>
                </table>
            </div>"#
    )
}

/// JSON payload safe for embedding inside a `<script>` element.
///
/// # Errors
///
/// Returns a JSON error if serialization fails.
pub fn script_payload(payload: &ReportPayload) -> Result<String> {
    let json = serde_json::to_string(payload)?;
    Ok(json.replace("</", "<\\/"))
}

/// Render the full report page.
///
/// # Errors
///
/// Returns a JSON error if the payload cannot be serialized.
pub fn render_html(
    rows: &[ReportRow],
    summary: &SummaryStatistics,
    payload: &ReportPayload,
    timestamp: &str,
) -> Result<String> {
    let timestamp = html_escape(timestamp);
    let summary_html = summary_section(summary);
    let table_html = comparison_table(rows);
    let payload_json = script_payload(payload)?;

    Ok(fill_template(
        TEMPLATE,
        &[
            ("timestamp", &timestamp),
            ("summary_section", &summary_html),
            ("comparison_table", &table_html),
            ("performance_data", &payload_json),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ChartLimits;
    use crate::model::{ChangeType, ComparisonRecord};

    fn row(set: &str, item: &str, pc: f64) -> ReportRow {
        ReportRow::from(&ComparisonRecord {
            benchmark_set: set.to_string(),
            test_item: item.to_string(),
            baseline_mid_ms: 10.0,
            new_mid_ms: 9.0,
            change_percent: pc,
            change_type: ChangeType::classify(pc, 0.1),
            baseline_avg_ms: 0.0,
            new_avg_ms: 0.0,
            baseline_min_ms: 0.0,
            new_min_ms: 0.0,
            baseline_max_ms: 0.0,
            new_max_ms: 0.0,
        })
    }

    #[test]
    fn template_has_every_placeholder() {
        for key in [
            "{{timestamp}}",
            "{{summary_section}}",
            "{{comparison_table}}",
            "{{performance_data}}",
        ] {
            assert!(TEMPLATE.contains(key), "missing {key}");
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            html_escape(r#"<b>"x" & 'y'</b>"#),
            "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn fill_template_is_single_pass() {
        let out = fill_template("a {{x}} b {{y}} {{z}}", &[("x", "{{y}}"), ("y", "Y")]);
        assert_eq!(out, "a {{y}} b Y {{z}}");
        assert_eq!(fill_template("open {{ only", &[]), "open {{ only");
    }

    #[test]
    fn empty_rows_render_placeholder() {
        let html = render_html(
            &[],
            &SummaryStatistics::default(),
            &ReportPayload::empty(),
            "2024-01-01 00:00:00",
        )
        .unwrap();
        assert!(html.contains("No data available for comparison"));
        assert!(html.contains(r#""distribution":[0,0,0]"#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn user_strings_are_escaped() {
        let rows = vec![row("<set>", "</script><script>alert(1)", -10.0)];
        let summary = SummaryStatistics {
            total_tests: 1,
            total_sets: 1,
            improved: 1,
            ..SummaryStatistics::default()
        };
        let payload = ReportPayload::build(&rows, &summary, ChartLimits::default());
        let html = render_html(&rows, &summary, &payload, "now").unwrap();

        assert!(html.contains("&lt;set&gt;"));
        assert!(!html.contains("</script><script>alert(1)"));
        assert!(html.contains("+10.00%"));
        assert!(html.contains(r#"class="percentage-change positive""#));
    }
}
