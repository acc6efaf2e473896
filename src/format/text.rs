//! Plain text (non-ANSI) formatting for terminal output:
//! - Change icons (▼ ▲ ·)
//! - Millisecond values
//! - Name truncation for narrow terminals
//! - One-line row summaries

use crate::format::output::ReportRow;
use crate::model::ChangeType;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Change icon characters.
pub mod icons {
    /// Faster than baseline.
    pub const IMPROVED: &str = "▼";
    /// Slower than baseline.
    pub const REGRESSED: &str = "▲";
    pub const UNCHANGED: &str = "·";
}

/// Return the icon character for a classification.
#[must_use]
pub const fn format_change_icon(change: ChangeType) -> &'static str {
    match change {
        ChangeType::Improved => icons::IMPROVED,
        ChangeType::Regressed => icons::REGRESSED,
        ChangeType::Unchanged => icons::UNCHANGED,
    }
}

/// Milliseconds with six decimals.
#[must_use]
pub fn format_ms(value: f64) -> String {
    format!("{value:.6}")
}

/// Determine terminal width from environment (falls back to 80).
#[must_use]
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|columns| columns.trim().parse::<usize>().ok())
        .filter(|&value| value > 0)
        .unwrap_or(80)
}

/// Truncate a name to fit within `max_len` visible columns.
///
/// Handles wide characters (emojis, CJK) using `unicode-width`.
#[must_use]
pub fn truncate_name(name: &str, max_len: usize) -> String {
    if UnicodeWidthStr::width(name) <= max_len {
        return name.to_string();
    }

    let (target, suffix) = if max_len > 3 {
        (max_len - 3, "...")
    } else {
        (max_len, "")
    };

    let mut width = 0;
    let mut out = String::new();
    for c in name.chars() {
        let cw = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + cw > target {
            break;
        }
        width += cw;
        out.push(c);
    }
    out.push_str(suffix);
    out
}

/// Format a single-line row summary.
///
/// Format: `{icon} {set}: {item}  {baseline} -> {new} ms  {change}`
#[must_use]
pub fn format_row_line(row: &ReportRow, max_width: Option<usize>) -> String {
    let values = format!(
        "{} -> {} ms  {}",
        format_ms(row.baseline_mid_ms),
        format_ms(row.new_mid_ms),
        row.change_display
    );
    let label = row.label();
    let label = max_width.map_or_else(
        || label.clone(),
        |width| truncate_name(&label, width.saturating_sub(UnicodeWidthStr::width(values.as_str()) + 4)),
    );
    format!("{} {label}  {values}", format_change_icon(row.change_type))
}
