//! License header rewriting for C, C++ and Objective-C sources.
//!
//! Everything before the first `#ifndef` / `#include` line is replaced with
//! the rendered license template. A UTF-8 BOM is kept in place.

use crate::error::{PerfError, Result, ResultExt};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const YEAR_PLACEHOLDER: &str = "%year%";
const IGNORED_FILE: &str = "resource.h";

/// Extensions (lowercase, without dot) eligible when walking a directory.
pub const SOURCE_EXTENSIONS: &[&str] = &["h", "c", "cpp", "hpp", "cc", "cxx", "hh", "m", "mm"];

static FIRST_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*(#ifndef|#include)").expect("valid directive regex"));

/// Substitute the year placeholder in a license template.
#[must_use]
pub fn render_license(template: &str, year: i32) -> String {
    template.replace(YEAR_PLACEHOLDER, &year.to_string())
}

/// Per-file result of a license rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseAction {
    Updated,
    /// No `#ifndef` / `#include` line; file untouched.
    Unchanged,
    /// `resource.h`, never rewritten.
    Ignored,
    /// Read, decode or write failed; the file was skipped.
    Failed(String),
}

impl LicenseAction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
            Self::Ignored => "ignored",
            Self::Failed(_) => "failed",
        }
    }
}

/// Outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseOutcome {
    pub path: PathBuf,
    pub action: LicenseAction,
}

/// Replace the header of `content`, or `None` when no directive line exists.
#[must_use]
pub fn replace_header(content: &str, license: &str) -> Option<String> {
    let found = FIRST_DIRECTIVE.find(content)?;
    let directive = found.as_str().trim_start();
    let rest = &content[found.end()..];
    Some(format!("{license}\n{directive}{rest}"))
}

/// Rewrite the header of a single file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not UTF-8, or cannot be
/// written back.
pub fn update_file(path: &Path, license: &str) -> Result<bool> {
    let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let (bom, body) = match raw.strip_prefix(UTF8_BOM) {
        Some(body) => (true, body),
        None => (false, raw.as_slice()),
    };
    let content = std::str::from_utf8(body)
        .map_err(|e| PerfError::Other(anyhow::anyhow!("{}: {e}", path.display())))?;

    let Some(updated) = replace_header(content, license) else {
        return Ok(false);
    };

    let mut bytes = Vec::with_capacity(updated.len() + UTF8_BOM.len());
    if bom {
        bytes.extend_from_slice(UTF8_BOM);
    }
    bytes.extend_from_slice(updated.as_bytes());
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(true)
}

fn is_ignored(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.eq_ignore_ascii_case(IGNORED_FILE))
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SOURCE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn process_one(path: &Path, license: &str) -> LicenseOutcome {
    let action = if is_ignored(path) {
        info!(path = %path.display(), "Ignoring file");
        LicenseAction::Ignored
    } else {
        match update_file(path, license) {
            Ok(true) => {
                info!(path = %path.display(), "License updated");
                LicenseAction::Updated
            }
            Ok(false) => {
                debug!(path = %path.display(), "No directive line; leaving file unchanged");
                LicenseAction::Unchanged
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "License update failed");
                LicenseAction::Failed(err.to_string())
            }
        }
    };
    LicenseOutcome {
        path: path.to_path_buf(),
        action,
    }
}

/// Apply `license` to `target`, a single file or a directory walked
/// recursively for source files.
///
/// Per-file failures are recorded in the outcomes, not returned.
///
/// # Errors
///
/// Returns `PathNotFound` when `target` does not exist, or a walk error.
pub fn apply_license(target: &Path, license: &str) -> Result<Vec<LicenseOutcome>> {
    if target.is_file() {
        return Ok(vec![process_one(target, license)]);
    }
    if !target.is_dir() {
        return Err(PerfError::PathNotFound {
            path: target.to_path_buf(),
        });
    }

    let mut outcomes = Vec::new();
    for entry in WalkDir::new(target).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && has_source_extension(entry.path()) {
            outcomes.push(process_one(entry.path(), license));
        }
    }
    Ok(outcomes)
}
