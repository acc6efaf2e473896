use crate::merge::{MergeAction, MergeSummary};
use crate::output::Theme;
use rich_rust::prelude::*;
use rich_rust::renderables::Cell;

/// Short human description of a merge action.
#[must_use]
pub fn describe_action(action: &MergeAction) -> String {
    match action {
        MergeAction::Merged { replaced: 0, enriched: 0 } => "no improvements".to_string(),
        MergeAction::Merged { replaced, enriched } => {
            format!("{replaced} replaced, {enriched} enriched")
        }
        MergeAction::Copied => "no new data".to_string(),
        MergeAction::Created => "new baseline".to_string(),
        MergeAction::Fallback { reason } => format!("copied as-is: {reason}"),
    }
}

/// Renders per-set merge results.
pub struct MergeTable<'a> {
    summary: &'a MergeSummary,
    theme: &'a Theme,
}

impl<'a> MergeTable<'a> {
    #[must_use]
    pub fn new(summary: &'a MergeSummary, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }

    #[must_use]
    pub fn build(&self) -> Table {
        let mut table = Table::new()
            .box_style(self.theme.box_style)
            .border_style(self.theme.table_border.clone())
            .header_style(self.theme.table_header.clone())
            .title(Text::styled("Merge results", self.theme.panel_title.clone()))
            .with_column(Column::new("Set").min_width(10))
            .with_column(Column::new("Action").min_width(8))
            .with_column(Column::new("Details").max_width(60))
            .with_column(Column::new("Output"));

        for set in &self.summary.sets {
            let style = self.theme.merge_action_style(&set.action);
            table.add_row(Row::new(vec![
                Cell::new(Text::new(&set.set_name)).style(self.theme.set_name.clone()),
                Cell::new(Text::new(set.action.as_str())).style(style),
                Cell::new(Text::new(describe_action(&set.action))),
                Cell::new(Text::new(set.output.display().to_string()))
                    .style(self.theme.path.clone()),
            ]));
        }

        table
    }
}
