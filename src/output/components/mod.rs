//! Rich renderables for comparison and merge results.

mod comparison_table;
mod merge_table;
mod summary_panel;

pub use comparison_table::ComparisonTable;
pub use merge_table::{MergeTable, describe_action};
pub use summary_panel::SummaryPanel;
