//! Configuration management for `perfbase`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI overrides
//! 2. Environment variables (`PERFBASE_*`)
//! 3. Project config (`./.perfbase.yaml`)
//! 4. User config (`~/.config/perfbase/config.yaml`)
//! 5. Defaults

use crate::compare::Thresholds;
use crate::error::{PerfError, Result};
use crate::format::ChartLimits;
use crate::model::DEFAULT_UNCHANGED_THRESHOLD;
use crate::report::DEFAULT_REPORT_FILE;
use crate::storage::DEFAULT_NEW_SUFFIX;
use crate::util::DEFAULT_DECIMALS;
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Project config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".perfbase.yaml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "PERFBASE_";

pub const DEFAULT_BENCHMARK_DIR: &str = "benchmark";
pub const DEFAULT_OUTPUT_DIR: &str = "benchmark_update";

/// Every recognized configuration key.
pub const KNOWN_KEYS: &[&str] = &[
    "benchmark-dir",
    "output-dir",
    "report-file",
    "new-suffix",
    "unchanged-threshold",
    "decimals",
    "top-n",
];

/// One source of configuration values keyed by normalized name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub values: HashMap<String, String>,
}

impl ConfigLayer {
    /// Merge another layer on top of this one (higher precedence wins).
    pub fn merge_from(&mut self, other: &Self) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Merge multiple layers in precedence order (lowest to highest).
    #[must_use]
    pub fn merge_layers(layers: &[Self]) -> Self {
        let mut merged = Self::default();
        for layer in layers {
            merged.merge_from(layer);
        }
        merged
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&normalize_key(key)).map(String::as_str)
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(normalize_key(key), value.into());
    }

    /// Build a layer from a YAML file path. Missing files return empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&contents)?;
        Ok(layer_from_yaml_value(&value))
    }

    /// Build a layer from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_vars(env::vars())
    }

    /// Build a layer from `PERFBASE_*` pairs; other names are ignored.
    #[must_use]
    pub fn from_env_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut layer = Self::default();
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                layer.insert(stripped, value);
            }
        }
        layer
    }
}

/// CLI overrides for config loading (optional).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub benchmark_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub report_file: Option<PathBuf>,
    pub unchanged_threshold: Option<f64>,
    pub decimals: Option<u32>,
    pub top_n: Option<usize>,
}

impl CliOverrides {
    #[must_use]
    pub fn as_layer(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::default();

        if let Some(path) = &self.benchmark_dir {
            layer.insert("benchmark-dir", path.to_string_lossy());
        }
        if let Some(path) = &self.output_dir {
            layer.insert("output-dir", path.to_string_lossy());
        }
        if let Some(path) = &self.report_file {
            layer.insert("report-file", path.to_string_lossy());
        }
        if let Some(threshold) = self.unchanged_threshold {
            layer.insert("unchanged-threshold", threshold.to_string());
        }
        if let Some(decimals) = self.decimals {
            layer.insert("decimals", decimals.to_string());
        }
        if let Some(top_n) = self.top_n {
            layer.insert("top-n", top_n.to_string());
        }

        layer
    }
}

/// Built-in defaults as a layer.
#[must_use]
pub fn default_config_layer() -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    layer.insert("benchmark-dir", DEFAULT_BENCHMARK_DIR);
    layer.insert("output-dir", DEFAULT_OUTPUT_DIR);
    layer.insert("report-file", DEFAULT_REPORT_FILE);
    layer.insert("new-suffix", DEFAULT_NEW_SUFFIX);
    layer.insert("unchanged-threshold", DEFAULT_UNCHANGED_THRESHOLD.to_string());
    layer.insert("decimals", DEFAULT_DECIMALS.to_string());
    layer.insert("top-n", ChartLimits::default().bars.to_string());
    layer
}

/// Load project config (`.perfbase.yaml` in `dir`).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(dir: &Path) -> Result<ConfigLayer> {
    ConfigLayer::from_yaml(&dir.join(PROJECT_CONFIG_FILE))
}

/// Path of the user config file, if `HOME` is set.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    let home = env::var_os("HOME")?;
    Some(
        Path::new(&home)
            .join(".config")
            .join("perfbase")
            .join("config.yaml"),
    )
}

/// Load user config (`~/.config/perfbase/config.yaml`).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<ConfigLayer> {
    match user_config_path() {
        Some(path) => ConfigLayer::from_yaml(&path),
        None => Ok(ConfigLayer::default()),
    }
}

/// A named layer, lowest precedence first, as used by `perfbase config`.
#[derive(Debug, Clone)]
pub struct SourcedLayer {
    pub source: ConfigSource,
    pub layer: ConfigLayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    Default,
    User,
    Project,
    Environment,
    Cli,
}

impl ConfigSource {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::User => "user config",
            Self::Project => PROJECT_CONFIG_FILE,
            Self::Environment => "environment",
            Self::Cli => "cli",
        }
    }
}

/// Load all layers in precedence order (lowest first).
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be parsed.
pub fn load_layers(project_dir: &Path, overrides: &CliOverrides) -> Result<Vec<SourcedLayer>> {
    Ok(vec![
        SourcedLayer {
            source: ConfigSource::Default,
            layer: default_config_layer(),
        },
        SourcedLayer {
            source: ConfigSource::User,
            layer: load_user_config()?,
        },
        SourcedLayer {
            source: ConfigSource::Project,
            layer: load_project_config(project_dir)?,
        },
        SourcedLayer {
            source: ConfigSource::Environment,
            layer: ConfigLayer::from_env(),
        },
        SourcedLayer {
            source: ConfigSource::Cli,
            layer: overrides.as_layer(),
        },
    ])
}

/// Load and merge every layer.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be parsed.
pub fn load_config(project_dir: &Path, overrides: &CliOverrides) -> Result<ConfigLayer> {
    let layers: Vec<ConfigLayer> = load_layers(project_dir, overrides)?
        .into_iter()
        .map(|sourced| sourced.layer)
        .collect();
    Ok(ConfigLayer::merge_layers(&layers))
}

/// Typed, validated settings resolved from a merged layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub benchmark_dir: PathBuf,
    pub output_dir: PathBuf,
    pub report_file: PathBuf,
    pub new_suffix: String,
    pub unchanged_threshold: f64,
    pub decimals: u32,
    pub top_n: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            benchmark_dir: PathBuf::from(DEFAULT_BENCHMARK_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            report_file: PathBuf::from(DEFAULT_REPORT_FILE),
            new_suffix: DEFAULT_NEW_SUFFIX.to_string(),
            unchanged_threshold: DEFAULT_UNCHANGED_THRESHOLD,
            decimals: DEFAULT_DECIMALS,
            top_n: ChartLimits::default().bars,
        }
    }
}

impl Settings {
    /// Resolve settings; keys absent from `layer` keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfigValue` for unparsable or out-of-range values.
    pub fn from_layer(layer: &ConfigLayer) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(value) = non_empty(layer, "benchmark-dir") {
            settings.benchmark_dir = PathBuf::from(value);
        }
        if let Some(value) = non_empty(layer, "output-dir") {
            settings.output_dir = PathBuf::from(value);
        }
        if let Some(value) = non_empty(layer, "report-file") {
            settings.report_file = PathBuf::from(value);
        }
        if let Some(value) = non_empty(layer, "new-suffix") {
            settings.new_suffix = value.to_string();
        }
        if let Some(value) = layer.get("unchanged-threshold") {
            settings.unchanged_threshold = parse_threshold(value)?;
        }
        if let Some(value) = layer.get("decimals") {
            settings.decimals = parse_number(
                "decimals",
                value,
                "an integer between 0 and 17",
                |d: &u32| *d <= 17,
            )?;
        }
        if let Some(value) = layer.get("top-n") {
            settings.top_n = parse_number("top-n", value, "a positive integer", |n: &usize| {
                *n > 0
            })?;
        }

        Ok(settings)
    }

    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            unchanged: self.unchanged_threshold,
        }
    }

    #[must_use]
    pub fn chart_limits(&self) -> ChartLimits {
        ChartLimits::with_top(self.top_n)
    }
}

fn non_empty<'a>(layer: &'a ConfigLayer, key: &str) -> Option<&'a str> {
    layer
        .get(key)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_threshold(value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed >= 0.0 => Ok(parsed),
        _ => Err(PerfError::InvalidConfigValue {
            key: "unchanged-threshold".to_string(),
            value: value.to_string(),
            expected: "a non-negative number",
        }),
    }
}

fn parse_number<T, F>(key: &str, value: &str, expected: &'static str, valid: F) -> Result<T>
where
    T: std::str::FromStr,
    F: Fn(&T) -> bool,
{
    value
        .trim()
        .parse::<T>()
        .ok()
        .filter(|parsed| valid(parsed))
        .ok_or_else(|| PerfError::InvalidConfigValue {
            key: key.to_string(),
            value: value.to_string(),
            expected,
        })
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace(['_', '.'], "-")
}

fn layer_from_yaml_value(value: &serde_yaml::Value) -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    let mut flat = HashMap::new();
    flatten_yaml(value, "", &mut flat);

    for (key, value) in flat {
        layer.insert(&key, value);
    }

    layer
}

fn flatten_yaml(value: &serde_yaml::Value, prefix: &str, out: &mut HashMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (key, value) in map {
                let Some(key_str) = key.as_str() else {
                    continue;
                };
                let next_prefix = if prefix.is_empty() {
                    key_str.to_string()
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(value, &next_prefix, out);
            }
        }
        _ => {
            if let Some(value) = yaml_scalar_to_string(value) {
                out.insert(prefix.to_string(), value);
            }
        }
    }
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Bool(v) => Some(v.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Null
        | serde_yaml::Value::Sequence(_)
        | serde_yaml::Value::Mapping(_) => None,
        serde_yaml::Value::Tagged(tagged) => yaml_scalar_to_string(&tagged.value),
    }
}
