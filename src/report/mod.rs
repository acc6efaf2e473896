//! Comparison report assembly.
//!
//! A `ReportDocument` bundles the table rows, summary and chart payload
//! derived from one comparison run; `html` renders it into the page.

pub mod html;

pub use html::{html_escape, render_html};

use crate::compare::{ComparisonResult, Thresholds};
use crate::error::Result;
use crate::format::{ChartLimits, ReportPayload, ReportRow, build_rows};
use crate::model::SummaryStatistics;
use crate::storage::write_atomic;
use chrono::Local;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Default report file name.
pub const DEFAULT_REPORT_FILE: &str = "performance_report.html";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Options for report assembly.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub thresholds: Thresholds,
    pub limits: ChartLimits,
}

/// Everything presented by a report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportDocument {
    pub summary: SummaryStatistics,
    pub rows: Vec<ReportRow>,
    #[serde(skip)]
    pub payload: ReportPayload,
}

impl ReportDocument {
    /// Build rows and chart payload from a comparison run.
    #[must_use]
    pub fn from_comparison(result: &ComparisonResult, options: &ReportOptions) -> Self {
        let rows = build_rows(&result.records, options.thresholds.unchanged);
        let payload = ReportPayload::build(&rows, &result.summary, options.limits);
        Self {
            summary: result.summary.clone(),
            rows,
            payload,
        }
    }

    /// Render the HTML page with the given timestamp text.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if the payload cannot be serialized.
    pub fn render(&self, timestamp: &str) -> Result<String> {
        render_html(&self.rows, &self.summary, &self.payload, timestamp)
    }

    /// Render with the current local time and write to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or the write fails.
    pub fn write_html(&self, path: &Path) -> Result<()> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let page = self.render(&timestamp)?;
        write_atomic(path, page.as_bytes())?;
        info!(path = %path.display(), rows = self.rows.len(), "Wrote HTML report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare_all;
    use crate::storage::{LoadOptions, discover};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn writes_report_for_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("benchmark");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("a.json"), r#"{"t": {"mid_ms": 10.0, "avg_ms": 11.0}}"#).unwrap();
        fs::write(dir.join("a_new.json"), r#"{"t": {"mid_ms": 9.0, "avg_ms": 9.5}}"#).unwrap();

        let loaded = discover(&dir, &LoadOptions::default()).unwrap();
        let result = compare_all(&loaded, Thresholds::default());
        let doc = ReportDocument::from_comparison(&result, &ReportOptions::default());
        assert_eq!(doc.rows.len(), 1);
        assert_eq!(doc.payload.summary.distribution, [1, 0, 0]);

        let out = temp.path().join("report.html");
        doc.write_html(&out).unwrap();
        let html = fs::read_to_string(out).unwrap();
        assert!(html.contains("a: t"));
        assert!(html.contains("+10.00%"));
        assert!(html.contains("Baseline Files: <strong>1</strong>"));
    }
}
