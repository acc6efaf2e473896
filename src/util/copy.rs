//! Artifact copying: a single file or a whole directory tree.

use crate::error::{OptionExt, PerfError, Result, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// What a copy operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// A single file was written to `dest`.
    File { dest: PathBuf },
    /// A directory tree was written, replacing any previous `dest`.
    Directory { dest: PathBuf, files: usize },
}

/// Copy `src` to `dst`, creating the destination's parent directory.
///
/// A directory source replaces an existing destination entirely. A file
/// copied onto an existing directory lands inside it under its own name.
///
/// # Errors
///
/// Returns `PathNotFound` when `src` does not exist, or an I/O error.
pub fn copy_path(src: &Path, dst: &Path) -> Result<CopyOutcome> {
    if !src.exists() {
        return Err(PerfError::PathNotFound {
            path: src.to_path_buf(),
        });
    }

    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    if src.is_dir() {
        if dst.is_dir() {
            debug!(path = %dst.display(), "Removing existing destination directory");
            fs::remove_dir_all(dst).with_context(|| format!("removing {}", dst.display()))?;
        } else if dst.exists() {
            fs::remove_file(dst).with_context(|| format!("removing {}", dst.display()))?;
        }
        let files = copy_tree(src, dst)?;
        return Ok(CopyOutcome::Directory {
            dest: dst.to_path_buf(),
            files,
        });
    }

    let dest = if dst.is_dir() {
        dst.join(src.file_name().ok_or_path_not_found(src)?)
    } else {
        dst.to_path_buf()
    };
    fs::copy(src, &dest).with_context(|| {
        format!("copying {} to {}", src.display(), dest.display())
    })?;
    Ok(CopyOutcome::File { dest })
}

fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    fs::create_dir_all(dst).with_context(|| format!("creating {}", dst.display()))?;

    let mut files = 0;
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let path = entry.path();
        let rel = path.strip_prefix(src).unwrap_or(path);
        if rel.as_os_str().is_empty() {
            continue;
        }
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("creating {}", target.display()))?;
        } else {
            fs::copy(path, &target).with_context(|| {
                format!("copying {} to {}", path.display(), target.display())
            })?;
            files += 1;
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copies_file_and_creates_parent() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("lib.so");
        fs::write(&src, b"binary").unwrap();
        let dst = temp.path().join("out/nested/lib.so");

        let outcome = copy_path(&src, &dst).unwrap();
        assert_eq!(outcome, CopyOutcome::File { dest: dst.clone() });
        assert_eq!(fs::read(&dst).unwrap(), b"binary");
    }

    #[test]
    fn file_into_existing_directory_keeps_name() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("a.txt");
        fs::write(&src, "a").unwrap();
        let dir = temp.path().join("dest");
        fs::create_dir(&dir).unwrap();

        copy_path(&src, &dir).unwrap();
        assert_eq!(fs::read_to_string(dir.join("a.txt")).unwrap(), "a");
    }

    #[test]
    fn directory_copy_replaces_destination() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("assets");
        fs::create_dir_all(src.join("img")).unwrap();
        fs::write(src.join("img/logo.png"), "png").unwrap();
        fs::write(src.join("readme.txt"), "hi").unwrap();

        let dst = temp.path().join("build/assets");
        fs::create_dir_all(&dst).unwrap();
        fs::write(dst.join("stale.txt"), "old").unwrap();

        let outcome = copy_path(&src, &dst).unwrap();
        assert_eq!(
            outcome,
            CopyOutcome::Directory {
                dest: dst.clone(),
                files: 2
            }
        );
        assert!(!dst.join("stale.txt").exists());
        assert_eq!(fs::read_to_string(dst.join("img/logo.png")).unwrap(), "png");
    }

    #[test]
    fn missing_source_is_path_not_found() {
        let temp = TempDir::new().unwrap();
        let err = copy_path(&temp.path().join("nope"), &temp.path().join("x")).unwrap_err();
        assert!(matches!(err, PerfError::PathNotFound { .. }));
    }
}
