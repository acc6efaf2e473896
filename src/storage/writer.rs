//! Writing datasets and other JSON documents to disk.
//!
//! Output is pretty-printed with 4-space indentation and written through a
//! temporary file in the same directory, then renamed into place.

use crate::error::{PerfError, Result, ResultExt};
use crate::model::{Dataset, truncate_dataset};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::Path;
use tracing::debug;

const INDENT: &[u8] = b"    ";

/// Serialize `value` as 4-space indented JSON.
///
/// # Errors
///
/// Returns a JSON error if serialization fails.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| PerfError::Other(e.into()))
}

/// Write `contents` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an I/O error if the directory, temp file or rename fails.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, contents)
        .with_context(|| format!("writing {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("renaming {} to {}", temp_path.display(), path.display()))?;
    Ok(())
}

/// Write a dataset with every float truncated to `decimals` digits.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_dataset(path: &Path, dataset: &Dataset, decimals: u32) -> Result<()> {
    let truncated = truncate_dataset(dataset, decimals);
    let mut json = to_pretty_json(&truncated)?;
    json.push('\n');
    write_atomic(path, json.as_bytes())?;
    debug!(path = %path.display(), items = truncated.len(), "Wrote dataset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MetricSet;
    use tempfile::TempDir;

    #[test]
    fn pretty_json_uses_four_spaces() {
        let mut dataset = Dataset::new();
        dataset.insert("t".to_string(), MetricSet::with_mid(1.5));
        let json = to_pretty_json(&dataset).unwrap();
        assert_eq!(json, "{\n    \"t\": {\n        \"mid_ms\": 1.5\n    }\n}");
    }

    #[test]
    fn write_dataset_truncates_and_creates_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out/deep/set.json");
        let mut dataset = Dataset::new();
        dataset.insert(
            "t".to_string(),
            MetricSet {
                mid_ms: Some(1.123_456_789_9),
                iterations: Some(7),
                ..MetricSet::default()
            },
        );

        write_dataset(&path, &dataset, 8).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"mid_ms\": 1.12345678"));
        assert!(text.contains("\"iterations\": 7"));
        assert!(!path.with_extension("tmp").exists());
    }
}
