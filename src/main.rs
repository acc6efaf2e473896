use clap::Parser;
use perfbase::cli::commands;
use perfbase::cli::{Cli, Commands};
use perfbase::config::{self, CliOverrides, Settings};
use perfbase::logging::init_logging;
use perfbase::output::OutputContext;
use perfbase::{PerfError, StructuredError};
use std::io::{self, IsTerminal};
use std::path::Path;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let ctx = OutputContext::from_args(&cli);
    let overrides = build_cli_overrides(&cli);

    if let Err(e) = run(&cli, &overrides, &ctx) {
        handle_error(&e, cli.json);
    }
}

fn run(cli: &Cli, overrides: &CliOverrides, ctx: &OutputContext) -> perfbase::Result<()> {
    let project_dir = Path::new(".");
    match &cli.command {
        Commands::Compare(args) => commands::compare::execute(args, &settings(project_dir, overrides)?, ctx),
        Commands::Report(args) => commands::report::execute(args, &settings(project_dir, overrides)?, ctx),
        Commands::Merge(args) => commands::merge::execute(args, &settings(project_dir, overrides)?, ctx),
        Commands::Copy(args) => commands::copy::execute(args, ctx),
        Commands::License(args) => commands::license::execute(args, ctx),
        Commands::Schema => commands::schema::execute(),
        Commands::Config => commands::config::execute(project_dir, overrides, ctx),
        Commands::Version => commands::version::execute(ctx),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

fn settings(project_dir: &Path, overrides: &CliOverrides) -> perfbase::Result<Settings> {
    let layer = config::load_config(project_dir, overrides)?;
    Settings::from_layer(&layer)
}

/// Handle errors with structured output support.
///
/// When --json is set or stdout is not a TTY, outputs structured JSON to stderr.
/// Otherwise, outputs human-readable error with optional color.
fn handle_error(err: &PerfError, json_mode: bool) -> ! {
    let structured = StructuredError::from_error(err);
    let exit_code = structured.code.exit_code();

    let use_json = json_mode || !io::stdout().is_terminal();

    if use_json {
        let json = structured.to_json();
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
        );
    } else {
        let use_color = io::stderr().is_terminal();
        eprintln!("{}", structured.to_human(use_color));
    }

    std::process::exit(exit_code);
}

fn build_cli_overrides(cli: &Cli) -> CliOverrides {
    CliOverrides {
        benchmark_dir: cli.dir.clone(),
        ..CliOverrides::default()
    }
}
