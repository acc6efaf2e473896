use crate::format::{ReportRow, format_ms, truncate_name};
use crate::output::Theme;
use rich_rust::prelude::*;
use rich_rust::renderables::Cell;

const MAX_NAME_WIDTH: usize = 48;

/// Renders comparison rows as a table.
pub struct ComparisonTable<'a> {
    rows: &'a [ReportRow],
    theme: &'a Theme,
    detailed: bool,
    title: Option<String>,
}

impl<'a> ComparisonTable<'a> {
    #[must_use]
    pub fn new(rows: &'a [ReportRow], theme: &'a Theme) -> Self {
        Self {
            rows,
            theme,
            detailed: false,
            title: None,
        }
    }

    /// Include average/min/max columns.
    #[must_use]
    pub fn detailed(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn build(&self) -> Table {
        let mut table = Table::new()
            .box_style(self.theme.box_style)
            .border_style(self.theme.table_border.clone())
            .header_style(self.theme.table_header.clone());

        if let Some(ref title) = self.title {
            table = table.title(Text::new(title));
        }

        table = table
            .with_column(Column::new("Set").min_width(8))
            .with_column(Column::new("Test Item").min_width(12))
            .with_column(Column::new("Base mid (ms)").justify(JustifyMethod::Right))
            .with_column(Column::new("New mid (ms)").justify(JustifyMethod::Right))
            .with_column(
                Column::new("Change")
                    .justify(JustifyMethod::Right)
                    .min_width(9),
            );
        if self.detailed {
            table = table
                .with_column(Column::new("Base avg").justify(JustifyMethod::Right))
                .with_column(Column::new("New avg").justify(JustifyMethod::Right))
                .with_column(Column::new("New min").justify(JustifyMethod::Right))
                .with_column(Column::new("New max").justify(JustifyMethod::Right));
        }

        for row in self.rows {
            let mut cells: Vec<Cell> = vec![
                Cell::new(Text::new(truncate_name(&row.benchmark_set, MAX_NAME_WIDTH)))
                    .style(self.theme.set_name.clone()),
                Cell::new(Text::new(truncate_name(&row.test_item, MAX_NAME_WIDTH)))
                    .style(self.theme.item_name.clone()),
                Cell::new(Text::new(format_ms(row.baseline_mid_ms)))
                    .style(self.theme.metric.clone()),
                Cell::new(Text::new(format_ms(row.new_mid_ms))),
                Cell::new(Text::new(row.change_display.clone()))
                    .style(self.theme.percent_style(row.style_class, row.change_percent)),
            ];
            if self.detailed {
                for value in [
                    row.baseline_avg_ms,
                    row.new_avg_ms,
                    row.new_min_ms,
                    row.new_max_ms,
                ] {
                    cells.push(Cell::new(Text::new(format_ms(value))).style(self.theme.metric.clone()));
                }
            }
            table.add_row(Row::new(cells));
        }

        table
    }
}
