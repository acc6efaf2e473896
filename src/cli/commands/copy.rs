//! Copy command implementation.

use crate::cli::CopyArgs;
use crate::error::Result;
use crate::output::OutputContext;
use crate::util::{CopyOutcome, copy_path};
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct CopyOutput<'a> {
    source: &'a Path,
    destination: &'a Path,
    kind: &'static str,
    files: usize,
}

/// Execute the copy command.
///
/// # Errors
///
/// Returns `PathNotFound` if the source is missing, or an I/O error.
pub fn execute(args: &CopyArgs, ctx: &OutputContext) -> Result<()> {
    let outcome = copy_path(&args.src, &args.dst)?;
    let (kind, dest, files) = match &outcome {
        CopyOutcome::File { dest } => ("file", dest.as_path(), 1),
        CopyOutcome::Directory { dest, files } => ("directory", dest.as_path(), *files),
    };
    info!(src = %args.src.display(), dest = %dest.display(), files, "Copied");

    if ctx.is_json() {
        return ctx.json(&CopyOutput {
            source: &args.src,
            destination: dest,
            kind,
            files,
        });
    }

    ctx.success(&format!(
        "Copied {kind} {} -> {} ({files} file{})",
        args.src.display(),
        dest.display(),
        if files == 1 { "" } else { "s" }
    ));
    Ok(())
}
