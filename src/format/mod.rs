//! Output formatting for `perfbase`.
//!
//! Turns comparison records into presentation data: table rows, the chart
//! payload embedded in the HTML report, plain text lines and CSV.
//!
//! # Output Types
//!
//! - [`ReportRow`] - One comparison record with display string and style class
//! - [`ReportPayload`] - Distribution and chart series for the HTML report
//!
//! # CSV Output
//!
//! The [`csv`] module provides CSV formatting with:
//! - Configurable field selection via `--fields`
//! - Proper escaping of commas, quotes, and newlines

pub mod chart;
pub mod csv;
mod output;
mod text;

pub use chart::{ChartLimits, ReportPayload, bar_color, rank_by_magnitude};
pub use output::{ReportRow, StyleClass, build_rows, format_change};
pub use text::{
    format_change_icon, format_ms, format_row_line, icons, terminal_width, truncate_name,
};
