use crate::model::SummaryStatistics;
use crate::output::Theme;
use rich_rust::prelude::*;

/// Renders summary statistics as a two-column table.
pub struct SummaryPanel<'a> {
    title: String,
    summary: &'a SummaryStatistics,
    theme: &'a Theme,
}

impl<'a> SummaryPanel<'a> {
    pub fn new(title: impl Into<String>, summary: &'a SummaryStatistics, theme: &'a Theme) -> Self {
        Self {
            title: title.into(),
            summary,
            theme,
        }
    }

    /// Label/value pairs in display order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, String, Style)> {
        let s = self.summary;
        vec![
            ("Benchmark sets", s.total_sets.to_string(), self.theme.emphasis.clone()),
            ("Test items", s.total_tests.to_string(), self.theme.emphasis.clone()),
            ("Improved", s.improved.to_string(), self.theme.improved.clone()),
            ("Regressed", s.regressed.to_string(), self.theme.regressed.clone()),
            ("Unchanged", s.unchanged.to_string(), self.theme.unchanged.clone()),
            (
                "Avg improvement",
                format!("{:.2}%", s.avg_improvement),
                self.theme.improved.clone(),
            ),
            (
                "Best improvement",
                format!("{:.2}%", s.best_improvement),
                self.theme.improved.clone(),
            ),
            (
                "Avg regression",
                format!("{:.2}%", s.avg_regression),
                self.theme.regressed.clone(),
            ),
            (
                "Worst regression",
                format!("{:.2}%", s.worst_regression),
                self.theme.regressed.clone(),
            ),
            ("Baseline files", s.baseline_files.to_string(), self.theme.muted.clone()),
            ("New files", s.new_files.to_string(), self.theme.muted.clone()),
        ]
    }

    #[must_use]
    pub fn build(&self) -> Table {
        let mut table = Table::new()
            .box_style(self.theme.box_style)
            .border_style(self.theme.panel_border.clone())
            .title(Text::styled(&self.title, self.theme.panel_title.clone()));

        table = table
            .with_column(Column::new("Metric").min_width(18))
            .with_column(
                Column::new("Value")
                    .justify(JustifyMethod::Right)
                    .min_width(8),
            );

        for (label, value, style) in self.entries() {
            table.add_row(Row::new(vec![
                Cell::new(Text::new(label)),
                Cell::new(Text::styled(&value, style)),
            ]));
        }

        table
    }
}
