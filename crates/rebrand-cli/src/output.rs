//! Output management and formatting.

use std::io::{self, IsTerminal};
use std::path::Path;

use clap::ValueEnum;
use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::debug;

use rebrand_core::prelude::{Outcome, Phase, ProgressReporter, RenameRecord, RunReport};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    ///
    /// An explicit `--output-format` wins over `output.format` from config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = if args.output_format == OutputFormat::Auto {
            OutputFormat::from_str(&config.output.format, true).unwrap_or(OutputFormat::Auto)
        } else {
            args.output_format
        };

        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`.  Not suppressed in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}") // ✗
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Pretty-printed JSON document on stdout. Printed even in quiet mode.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

// ── Progress reporting ────────────────────────────────────────────────────────

/// Streams engine progress through an [`OutputManager`].
///
/// Paths are shown relative to the run root.
pub struct ConsoleReporter<'a> {
    output: &'a OutputManager,
    root: &'a Path,
}

impl<'a> ConsoleReporter<'a> {
    pub fn new(output: &'a OutputManager, root: &'a Path) -> Self {
        Self { output, root }
    }

    fn emit(&self, written: io::Result<()>) {
        if let Err(e) = written {
            debug!(error = %e, "Failed to write progress line");
        }
    }
}

impl ProgressReporter for ConsoleReporter<'_> {
    fn phase_started(&self, phase: Phase) {
        self.emit(self.output.header(&format!("\n{}", phase.title())));
    }

    fn record(&self, record: &RenameRecord) {
        let line = record_line(record, self.root);
        let written = match &record.outcome {
            Outcome::Succeeded | Outcome::Planned => self.output.success(&line),
            Outcome::Skipped(_) => self.output.warning(&line),
            Outcome::Failed(_) => self.output.error(&line),
        };
        self.emit(written);
    }

    fn finished(&self, report: &RunReport) {
        self.emit(self.output.header("\nSummary"));
        self.emit(self.output.print(&summary_line(report)));
        if report.dry_run {
            self.emit(self.output.info("Dry run: nothing was changed"));
        }
    }
}

/// One progress line for a record, without the glyph.
pub(crate) fn record_line(record: &RenameRecord, root: &Path) -> String {
    let original = relative(&record.original, root);
    let renamed = relative(&record.renamed, root);
    let is_rewrite = record.phase == Phase::ContentRewriting;

    match &record.outcome {
        Outcome::Succeeded if is_rewrite => format!("updated {original}"),
        Outcome::Succeeded => format!("{original} -> {renamed}"),
        Outcome::Planned if is_rewrite => format!("would update {original}"),
        Outcome::Planned => format!("would rename {original} -> {renamed}"),
        Outcome::Skipped(reason) => format!("skipped {original}: {reason}"),
        Outcome::Failed(cause) => format!("{original}: {cause}"),
    }
}

pub(crate) fn summary_line(report: &RunReport) -> String {
    format!(
        "{} file(s) rewritten, {} file(s) renamed, {} director(ies) renamed, {} failure(s)",
        report.rewritten(),
        report.files_renamed(),
        report.directories_renamed(),
        report.failures()
    )
}

fn relative(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".into(),
        Ok(rel) => rel.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use rebrand_core::prelude::SkipReason;

    use super::*;
    use crate::config::AppConfig;

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: OutputFormat::Human,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true);
        assert!(out.print("hello").is_ok());
        assert!(out.is_quiet());
    }

    #[test]
    fn error_not_suppressed_in_quiet_mode() {
        let out = make_manager(true, true);
        assert!(out.error("something went wrong").is_ok());
    }

    #[test]
    fn no_color_flag_reported() {
        assert!(!make_manager(false, false).no_color);
        assert!(make_manager(false, true).no_color);
    }

    #[test]
    fn plain_format_disables_color() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Plain,
        };
        let out = OutputManager::new(&args, &AppConfig::default());
        assert_eq!(out.format(), OutputFormat::Plain);
        assert!(out.no_color);
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Auto,
        };
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        assert_eq!(OutputManager::new(&args, &config).format(), OutputFormat::Json);
    }

    #[test]
    fn record_lines_are_root_relative() {
        let root = PathBuf::from("/repo");
        let rename = RenameRecord::new(
            Phase::DirectoryRenaming,
            "/repo/src/term",
            "/repo/src/beta",
            Outcome::Succeeded,
        );
        assert_eq!(record_line(&rename, &root), "src/term -> src/beta");

        let planned = RenameRecord::in_place(
            Phase::ContentRewriting,
            Path::new("/repo/a.txt"),
            Outcome::Planned,
        );
        assert_eq!(record_line(&planned, &root), "would update a.txt");

        let skipped = RenameRecord::in_place(
            Phase::ContentRewriting,
            Path::new("/repo/b.bin.txt"),
            Outcome::Skipped(SkipReason::Undecodable),
        );
        assert_eq!(record_line(&skipped, &root), "skipped b.bin.txt: not valid UTF-8");

        let failed = RenameRecord::in_place(
            Phase::Scanning,
            Path::new("/repo"),
            Outcome::Failed("permission denied".into()),
        );
        assert_eq!(record_line(&failed, &root), ".: permission denied");
    }

    #[test]
    fn summary_counts_each_stage() {
        let mut report = RunReport::new("/repo", false);
        report.push(RenameRecord::in_place(
            Phase::ContentRewriting,
            Path::new("/repo/a.txt"),
            Outcome::Succeeded,
        ));
        report.push(RenameRecord::new(
            Phase::FileRenaming,
            "/repo/term.txt",
            "/repo/beta.txt",
            Outcome::Failed("destination already exists".into()),
        ));
        assert_eq!(
            summary_line(&report),
            "1 file(s) rewritten, 0 file(s) renamed, 0 director(ies) renamed, 1 failure(s)"
        );
    }
}
