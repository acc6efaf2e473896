//! CSV formatting for comparison rows.
//!
//! Handles proper escaping of fields containing commas, quotes, or newlines.

use crate::format::output::ReportRow;
use std::io::{self, Write};

/// Default fields for CSV export.
pub const DEFAULT_FIELDS: &[&str] = &[
    "benchmark_set",
    "test_item",
    "baseline_mid_ms",
    "new_mid_ms",
    "change_percent",
    "change_type",
];

/// All available fields for CSV export.
pub const ALL_FIELDS: &[&str] = &[
    "benchmark_set",
    "test_item",
    "baseline_mid_ms",
    "new_mid_ms",
    "baseline_avg_ms",
    "new_avg_ms",
    "baseline_min_ms",
    "new_min_ms",
    "baseline_max_ms",
    "new_max_ms",
    "change_percent",
    "change_type",
    "change_display",
    "style_class",
];

/// Escape a CSV field value.
///
/// Wraps in double quotes if the value contains commas, quotes, or newlines.
/// Doubles any existing quotes within the value.
#[must_use]
pub fn escape_field(value: &str) -> String {
    let needs_quoting = value.contains(',')
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r');

    if needs_quoting {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

/// Get a field value from a row by field name.
#[must_use]
pub fn get_field_value(row: &ReportRow, field: &str) -> String {
    match field {
        "benchmark_set" => row.benchmark_set.clone(),
        "test_item" => row.test_item.clone(),
        "baseline_mid_ms" => row.baseline_mid_ms.to_string(),
        "new_mid_ms" => row.new_mid_ms.to_string(),
        "baseline_avg_ms" => row.baseline_avg_ms.to_string(),
        "new_avg_ms" => row.new_avg_ms.to_string(),
        "baseline_min_ms" => row.baseline_min_ms.to_string(),
        "new_min_ms" => row.new_min_ms.to_string(),
        "baseline_max_ms" => row.baseline_max_ms.to_string(),
        "new_max_ms" => row.new_max_ms.to_string(),
        "change_percent" => format!("{:.4}", row.change_percent),
        "change_type" => row.change_type.as_str().to_string(),
        "change_display" => row.change_display.clone(),
        "style_class" => row.style_class.as_str().to_string(),
        _ => String::new(),
    }
}

/// Parse a comma-separated list of field names.
///
/// Unknown names are dropped. Returns the default fields if the input is
/// empty.
#[must_use]
pub fn parse_fields(fields_arg: Option<&str>) -> Vec<&'static str> {
    match fields_arg {
        Some("all") => ALL_FIELDS.to_vec(),
        Some(arg) if !arg.is_empty() => arg
            .split(',')
            .map(str::trim)
            .filter_map(|f| ALL_FIELDS.iter().find(|&&af| af == f).copied())
            .collect(),
        _ => DEFAULT_FIELDS.to_vec(),
    }
}

/// Write CSV header row to the given writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_header<W: Write>(writer: &mut W, fields: &[&str]) -> io::Result<()> {
    let header = fields.join(",");
    writeln!(writer, "{header}")
}

/// Format a single row as a CSV line.
#[must_use]
pub fn format_row(row: &ReportRow, fields: &[&str]) -> String {
    fields
        .iter()
        .map(|&field| escape_field(&get_field_value(row, field)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Write rows as CSV to the given writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv<W: Write>(writer: &mut W, rows: &[ReportRow], fields: &[&str]) -> io::Result<()> {
    write_header(writer, fields)?;
    for row in rows {
        writeln!(writer, "{}", format_row(row, fields))?;
    }
    Ok(())
}

/// Format rows as a complete CSV string.
#[must_use]
pub fn to_csv_string(rows: &[ReportRow], fields: &[&str]) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec cannot fail.
    let _ = write_csv(&mut buf, rows, fields);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChangeType, ComparisonRecord};

    fn sample_row(item: &str) -> ReportRow {
        ReportRow::from(&ComparisonRecord {
            benchmark_set: "core".to_string(),
            test_item: item.to_string(),
            baseline_mid_ms: 10.0,
            new_mid_ms: 9.0,
            change_percent: -10.0,
            change_type: ChangeType::Improved,
            baseline_avg_ms: 10.5,
            new_avg_ms: 9.5,
            baseline_min_ms: 9.0,
            new_min_ms: 8.0,
            baseline_max_ms: 12.0,
            new_max_ms: 11.0,
        })
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("simple"), "simple");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_parse_fields() {
        assert_eq!(parse_fields(None), DEFAULT_FIELDS.to_vec());
        assert_eq!(parse_fields(Some("")), DEFAULT_FIELDS.to_vec());
        assert_eq!(parse_fields(Some("all")), ALL_FIELDS.to_vec());
        assert_eq!(
            parse_fields(Some("test_item, bogus ,change_display")),
            vec!["test_item", "change_display"]
        );
    }

    #[test]
    fn test_csv_output() {
        let rows = vec![sample_row("parse"), sample_row("lex, fast")];
        let csv = to_csv_string(&rows, DEFAULT_FIELDS);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "benchmark_set,test_item,baseline_mid_ms,new_mid_ms,change_percent,change_type"
        );
        assert_eq!(lines[1], "core,parse,10,9,-10.0000,improved");
        assert_eq!(lines[2], "core,\"lex, fast\",10,9,-10.0000,improved");
    }
}
