//! Shell completions generation command.
//!
//! ```bash
//! perfbase completions bash > ~/.local/share/bash-completion/completions/perfbase
//! perfbase completions zsh -o ~/.zsh/completions/_perfbase
//! ```

use crate::cli::{Cli, CompletionsArgs, ShellType};
use crate::error::{Result, ResultExt};
use crate::storage::write_atomic;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::{self, Write};
use tracing::info;

const BIN_NAME: &str = "perfbase";

/// Render the completion script for `shell`.
#[must_use]
pub fn render(shell: ShellType) -> Vec<u8> {
    let mut cmd = Cli::command();
    let mut script = Vec::new();
    generate(to_clap_shell(shell), &mut cmd, BIN_NAME, &mut script);
    script
}

/// Execute the completions command.
///
/// # Errors
///
/// Returns an error if the script cannot be written.
pub fn execute(args: &CompletionsArgs) -> Result<()> {
    let script = render(args.shell);

    match &args.output {
        Some(path) => {
            write_atomic(path, &script)?;
            info!(shell = %to_clap_shell(args.shell), path = %path.display(), "Wrote completion script");
            eprintln!(
                "Generated {} completions to {}",
                to_clap_shell(args.shell),
                path.display()
            );
        }
        None => {
            io::stdout()
                .write_all(&script)
                .context("writing completions to stdout")?;
        }
    }

    Ok(())
}

const fn to_clap_shell(shell: ShellType) -> Shell {
    match shell {
        ShellType::Bash => Shell::Bash,
        ShellType::Zsh => Shell::Zsh,
        ShellType::Fish => Shell::Fish,
        ShellType::PowerShell => Shell::PowerShell,
        ShellType::Elvish => Shell::Elvish,
    }
}
