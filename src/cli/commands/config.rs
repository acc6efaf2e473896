//! Configuration display command.
//!
//! Shows every known key with its resolved value and the layer it came
//! from, plus the config file locations.

use crate::config::{
    CliOverrides, ConfigLayer, ConfigSource, KNOWN_KEYS, PROJECT_CONFIG_FILE, Settings,
    SourcedLayer, load_layers, user_config_path,
};
use crate::error::Result;
use crate::output::OutputContext;
use rich_rust::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: ConfigSource,
}

#[derive(Serialize)]
struct ConfigOutput<'a> {
    settings: &'a Settings,
    entries: &'a [ConfigEntry],
    user_config: Option<PathBuf>,
    project_config: PathBuf,
}

fn resolve_source(key: &str, layers: &[SourcedLayer]) -> ConfigSource {
    layers
        .iter()
        .rev()
        .find(|sourced| sourced.layer.get(key).is_some())
        .map_or(ConfigSource::Default, |sourced| sourced.source)
}

fn collect_entries(layers: &[SourcedLayer]) -> Vec<ConfigEntry> {
    let merged =
        ConfigLayer::merge_layers(&layers.iter().map(|s| s.layer.clone()).collect::<Vec<_>>());
    KNOWN_KEYS
        .iter()
        .map(|key| ConfigEntry {
            key,
            value: merged.get(key).unwrap_or_default().to_string(),
            source: resolve_source(key, layers),
        })
        .collect()
}

/// Execute the config command.
///
/// # Errors
///
/// Returns an error if a config file cannot be parsed or holds an invalid
/// value.
pub fn execute(project_dir: &Path, overrides: &CliOverrides, ctx: &OutputContext) -> Result<()> {
    let layers = load_layers(project_dir, overrides)?;
    let entries = collect_entries(&layers);
    let merged =
        ConfigLayer::merge_layers(&layers.iter().map(|s| s.layer.clone()).collect::<Vec<_>>());
    let settings = Settings::from_layer(&merged)?;
    debug!(?settings, "Resolved configuration");

    let project_config = project_dir.join(PROJECT_CONFIG_FILE);
    let user_config = user_config_path();

    if ctx.is_json() {
        return ctx.json(&ConfigOutput {
            settings: &settings,
            entries: &entries,
            user_config,
            project_config,
        });
    }

    if ctx.is_rich() {
        render_config_table(&entries, ctx);
    } else {
        for entry in &entries {
            ctx.print(&format!(
                "{} = {} ({})",
                entry.key,
                entry.value,
                entry.source.label()
            ));
        }
    }

    ctx.section("Config files");
    match user_config {
        Some(path) => ctx.print(&format!(
            "User config: {} ({})",
            path.display(),
            existence(&path)
        )),
        None => ctx.print("User config: (none)"),
    }
    ctx.print(&format!(
        "Project config: {} ({})",
        project_config.display(),
        existence(&project_config)
    ));
    Ok(())
}

fn existence(path: &Path) -> &'static str {
    if path.exists() { "exists" } else { "not found" }
}

fn render_config_table(entries: &[ConfigEntry], ctx: &OutputContext) {
    let theme = ctx.theme();
    let mut table = Table::new()
        .box_style(theme.box_style)
        .border_style(theme.panel_border.clone())
        .title(Text::styled("Configuration", theme.panel_title.clone()))
        .with_column(Column::new("Key").min_width(16).max_width(30))
        .with_column(Column::new("Value").min_width(12).max_width(50))
        .with_column(Column::new("Source").min_width(12).max_width(20));

    for entry in entries {
        table.add_row(Row::new(vec![
            Cell::new(Text::styled(entry.key, theme.emphasis.clone())),
            Cell::new(Text::new(entry.value.clone())),
            Cell::new(Text::styled(entry.source.label(), theme.dimmed.clone())),
        ]));
    }

    ctx.render(&table);
}
