use super::Theme;
use crate::cli::Cli;
use crate::error::Result;
use rich_rust::prelude::*;
use rich_rust::renderables::Renderable;
use std::io::IsTerminal;

/// Central output coordinator that respects json/quiet/plain modes.
pub struct OutputContext {
    /// Rich console for human-readable output
    console: Console,
    theme: Theme,
    mode: OutputMode,
    /// Terminal width (cached)
    width: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Full rich formatting (tables, colors, panels)
    Rich,
    /// Plain text, no ANSI codes (for piping)
    Plain,
    /// JSON output only
    Json,
    /// Minimal output (quiet mode)
    Quiet,
}

impl OutputMode {
    /// Resolve the mode from flags and the environment.
    #[must_use]
    pub fn detect(json: bool, quiet: bool, no_color: bool) -> Self {
        if json {
            return Self::Json;
        }
        if quiet {
            return Self::Quiet;
        }
        if no_color || std::env::var_os("NO_COLOR").is_some() {
            return Self::Plain;
        }
        if !std::io::stdout().is_terminal() {
            return Self::Plain;
        }
        Self::Rich
    }
}

impl OutputContext {
    /// Create from CLI global args
    #[must_use]
    pub fn from_args(args: &Cli) -> Self {
        Self::from_flags(args.json, args.quiet, args.no_color)
    }

    #[must_use]
    pub fn from_flags(json: bool, quiet: bool, no_color: bool) -> Self {
        Self::with_mode(OutputMode::detect(json, quiet, no_color))
    }

    #[must_use]
    pub fn with_mode(mode: OutputMode) -> Self {
        let console = Self::create_console(mode);
        let width = console.width();
        Self {
            console,
            theme: Theme::default(),
            mode,
            width,
        }
    }

    fn create_console(mode: OutputMode) -> Console {
        match mode {
            OutputMode::Rich => Console::new(),
            OutputMode::Plain | OutputMode::Quiet | OutputMode::Json => {
                Console::builder().no_color().force_terminal(false).build()
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Mode Checks
    // ─────────────────────────────────────────────────────────────

    pub fn mode(&self) -> OutputMode {
        self.mode
    }
    pub fn is_rich(&self) -> bool {
        self.mode == OutputMode::Rich
    }
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }
    pub fn is_quiet(&self) -> bool {
        self.mode == OutputMode::Quiet
    }
    pub fn is_plain(&self) -> bool {
        self.mode == OutputMode::Plain
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    // ─────────────────────────────────────────────────────────────
    // Output Methods
    // ─────────────────────────────────────────────────────────────

    /// Print console markup; plain mode strips the styling.
    pub fn print(&self, content: &str) {
        match self.mode {
            OutputMode::Rich | OutputMode::Plain => self.console.print(content),
            OutputMode::Quiet | OutputMode::Json => {}
        }
    }

    pub fn render<R: Renderable>(&self, renderable: &R) {
        if self.is_rich() {
            self.console.print_renderable(renderable);
        }
    }

    /// Emit compact JSON (json mode only).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(&self, value: &T) -> Result<()> {
        if self.is_json() {
            println!("{}", serde_json::to_string(value)?);
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    // Semantic Output Methods
    // ─────────────────────────────────────────────────────────────

    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Rich => {
                self.console.print(&format!("[bold green]✓[/] {message}"));
            }
            OutputMode::Plain => println!("✓ {message}"),
            OutputMode::Quiet | OutputMode::Json => {}
        }
    }

    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Rich => {
                self.console
                    .print(&format!("[bold yellow]⚠[/] [yellow]{message}[/]"));
            }
            OutputMode::Plain => eprintln!("Warning: {message}"),
            OutputMode::Quiet | OutputMode::Json => {}
        }
    }

    pub fn info(&self, message: &str) {
        match self.mode {
            OutputMode::Rich => {
                self.console.print(&format!("[blue]ℹ[/] {message}"));
            }
            OutputMode::Plain => println!("{message}"),
            OutputMode::Quiet | OutputMode::Json => {}
        }
    }

    pub fn section(&self, title: &str) {
        if self.is_rich() {
            let rule = Rule::with_title(Text::new(title));
            self.console.print_renderable(&rule);
        } else if self.is_plain() {
            println!("\n─── {title} ───\n");
        }
    }

    pub fn error_panel(&self, title: &str, description: &str, suggestions: &[&str]) {
        match self.mode {
            OutputMode::Rich => {
                let mut text = Text::from(description);
                if !suggestions.is_empty() {
                    text.append("\n\nSuggestions:\n");
                    for suggestion in suggestions {
                        text.append(&format!("• {suggestion}\n"));
                    }
                }
                let panel = Panel::from_rich_text(&text, self.width).title(Text::new(title));
                self.console.print_renderable(&panel);
            }
            OutputMode::Plain => {
                eprintln!("Error: {title} - {description}");
                for suggestion in suggestions {
                    eprintln!("  Suggestion: {suggestion}");
                }
            }
            OutputMode::Quiet => eprintln!("Error: {description}"),
            OutputMode::Json => {}
        }
    }
}
