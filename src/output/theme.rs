//! Theme and color definitions for rich output.

use crate::format::StyleClass;
use crate::merge::MergeAction;
use crate::model::ChangeType;
use rich_rust::r#box::ROUNDED;
use rich_rust::prelude::*;

fn color(name: &str) -> Color {
    Color::parse(name).unwrap_or_else(|_| panic!("Invalid color name: {name}"))
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub success: Style,
    pub error: Style,
    pub warning: Style,
    pub info: Style,
    pub dimmed: Style,
    pub accent: Style,
    pub muted: Style,
    pub emphasis: Style,

    pub set_name: Style,
    pub item_name: Style,
    pub metric: Style,

    pub improved: Style,
    pub improved_strong: Style,
    pub regressed: Style,
    pub regressed_strong: Style,
    pub unchanged: Style,

    pub table_header: Style,
    pub table_border: Style,
    pub panel_title: Style,
    pub panel_border: Style,
    pub section: Style,
    pub path: Style,

    pub box_style: &'static BoxChars,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            success: Style::new().color(color("green")).bold(),
            error: Style::new().color(color("red")).bold(),
            warning: Style::new().color(color("yellow")).bold(),
            info: Style::new().color(color("blue")),
            dimmed: Style::new().dim(),
            accent: Style::new().color(color("cyan")),
            muted: Style::new().color(color("bright_black")),
            emphasis: Style::new().bold(),

            set_name: Style::new().color(color("cyan")).bold(),
            item_name: Style::new(),
            metric: Style::new().color(color("bright_black")),

            improved: Style::new().color(color("green")),
            improved_strong: Style::new().color(color("green")).bold(),
            regressed: Style::new().color(color("red")),
            regressed_strong: Style::new().color(color("red")).bold(),
            unchanged: Style::new().color(color("bright_black")),

            table_header: Style::new().bold(),
            table_border: Style::new().color(color("bright_black")),
            panel_title: Style::new().bold(),
            panel_border: Style::new().color(color("bright_black")),
            section: Style::new().color(color("cyan")).bold(),
            path: Style::new().color(color("blue")),

            box_style: &ROUNDED,
        }
    }
}

/// Percent change beyond which a change is highlighted in bold.
const STRONG_CHANGE: f64 = 5.0;

impl Theme {
    #[must_use]
    pub fn change_style(&self, change: ChangeType) -> Style {
        match change {
            ChangeType::Improved => self.improved.clone(),
            ChangeType::Regressed => self.regressed.clone(),
            ChangeType::Unchanged => self.unchanged.clone(),
        }
    }

    /// Style for a percent-change cell, bold beyond the strong threshold.
    #[must_use]
    pub fn percent_style(&self, style_class: StyleClass, change_percent: f64) -> Style {
        let strong = change_percent.abs() > STRONG_CHANGE;
        match (style_class, strong) {
            (StyleClass::Positive, true) => self.improved_strong.clone(),
            (StyleClass::Positive, false) => self.improved.clone(),
            (StyleClass::Negative, true) => self.regressed_strong.clone(),
            (StyleClass::Negative, false) => self.regressed.clone(),
            (StyleClass::Zero, _) => self.unchanged.clone(),
        }
    }

    #[must_use]
    pub fn merge_action_style(&self, action: &MergeAction) -> Style {
        match action {
            MergeAction::Merged { replaced, .. } if *replaced > 0 => self.improved.clone(),
            MergeAction::Merged { .. } | MergeAction::Copied => self.muted.clone(),
            MergeAction::Created => self.accent.clone(),
            MergeAction::Fallback { .. } => self.warning.clone(),
        }
    }
}
