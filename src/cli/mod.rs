//! CLI definitions and entry point.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Compare, merge and report benchmark baselines
#[derive(Parser, Debug)]
#[command(name = "perfbase", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Benchmark directory holding <set>.json and <set>_new.json files
    #[arg(long, global = true, env = "PERFBASE_DIR")]
    pub dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare baseline and new results per test item
    Compare(CompareArgs),

    /// Generate the HTML performance report
    Report(ReportArgs),

    /// Fold improved results into an updated baseline directory
    Merge(MergeArgs),

    /// Copy a file or directory, replacing an existing destination directory
    #[command(alias = "cp")]
    Copy(CopyArgs),

    /// Rewrite license headers of C/C++/Objective-C sources
    License(LicenseArgs),

    /// Print the JSON Schema of a benchmark file
    Schema,

    /// Show the resolved configuration and where each value came from
    Config,

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct CompareArgs {
    /// Output CSV instead of a table
    #[arg(long)]
    pub csv: bool,

    /// CSV fields (comma-separated, or "all")
    #[arg(long, requires = "csv")]
    pub fields: Option<String>,

    /// Percent change below which a result counts as unchanged
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Include average/min/max columns
    #[arg(long)]
    pub detailed: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Report file to write
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Number of items in the largest-change bar chart
    #[arg(long)]
    pub top: Option<usize>,

    /// Percent change below which a result counts as unchanged
    #[arg(long)]
    pub threshold: Option<f64>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct MergeArgs {
    /// Directory receiving the merged baselines
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Decimal places kept when writing floats
    #[arg(long)]
    pub decimals: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct CopyArgs {
    /// Source file or directory
    pub src: PathBuf,

    /// Destination path
    pub dst: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct LicenseArgs {
    /// License template file; `%year%` is replaced with the year
    pub template: PathBuf,

    /// Source file or directory to update
    pub target: PathBuf,

    /// Year substituted into the template (default: current year)
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: ShellType,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Supported shells for completion generation.
#[derive(ValueEnum, Debug, Clone, Copy, Eq, PartialEq)]
pub enum ShellType {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    #[value(name = "powershell")]
    #[value(alias = "pwsh")]
    /// `PowerShell`
    PowerShell,
    /// Elvish
    Elvish,
}
