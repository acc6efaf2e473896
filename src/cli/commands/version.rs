//! Version command implementation.

use crate::error::Result;
use crate::output::OutputContext;
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Serialize)]
struct VersionOutput<'a> {
    version: &'a str,
    build: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    commit: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<&'a str>,
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &OutputContext) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    let commit = option_env!("VERGEN_GIT_SHA").filter(|s| !s.trim().is_empty());
    let branch = option_env!("VERGEN_GIT_BRANCH").filter(|s| !s.trim().is_empty());

    if ctx.is_json() {
        return ctx.json(&VersionOutput {
            version,
            build,
            commit,
            branch,
        });
    }

    if !ctx.is_quiet() {
        println!("{}", version_line(version, build, branch, commit));
    }
    Ok(())
}

/// Human-readable version line, e.g. `perfbase 0.1.0 (release) (main@abc1234)`.
#[must_use]
pub fn version_line(
    version: &str,
    build: &str,
    branch: Option<&str>,
    commit: Option<&str>,
) -> String {
    let mut line = format!("perfbase {version} ({build})");
    let short = commit.map(|c| &c[..c.len().min(7)]);
    match (branch, short) {
        (Some(branch), Some(short)) => {
            let _ = write!(line, " ({branch}@{short})");
        }
        (Some(label), None) | (None, Some(label)) => {
            let _ = write!(line, " ({label})");
        }
        (None, None) => {}
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_line_variants() {
        assert_eq!(version_line("1.0.0", "dev", None, None), "perfbase 1.0.0 (dev)");
        assert_eq!(
            version_line("1.0.0", "release", Some("main"), Some("abcdef123456")),
            "perfbase 1.0.0 (release) (main@abcdef1)"
        );
        assert_eq!(
            version_line("1.0.0", "dev", None, Some("abc")),
            "perfbase 1.0.0 (dev) (abc)"
        );
    }
}
