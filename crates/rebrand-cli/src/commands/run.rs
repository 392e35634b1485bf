//! Implementation of the `rebrand run` command.
//!
//! Responsibility: merge flags and configuration into an `EngineConfig`,
//! confirm with the user, call the core rename service, and display results.
//! No rename logic lives here.

use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use rebrand_adapters::LocalFilesystem;
use rebrand_core::{
    domain::DomainError,
    prelude::{
        EligibleExtensionSet, EngineConfig, ExclusionSet, RenameService, RenameSpec, RunMode,
        RunReport, SilentReporter,
    },
};

use crate::{
    cli::{OutputFormat, RunArgs},
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult},
    output::{ConsoleReporter, OutputManager},
};

/// Execute the `rebrand run` command.
///
/// 1. Resolve terms, exclusions and policies from flags over config
/// 2. Confirm with the user unless `--yes`, `--dry-run` or `--quiet`
/// 3. Run the four engine phases over the tree
/// 4. Print the summary (or the JSON report) and next steps
#[instrument(skip_all, fields(root = %args.root.display()))]
pub fn execute(
    args: RunArgs,
    config_file: Option<&PathBuf>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let engine_config = build_engine_config(&args, &config, config_file.map(PathBuf::as_path))?;
    let root = resolve_root(&args.root);
    if root.exists() && !root.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("'{}' is not a directory", root.display()),
            source: None,
        });
    }

    debug!(
        from = engine_config.spec.from_term(),
        to = engine_config.spec.to_term(),
        dry_run = args.dry_run,
        decode = %engine_config.on_decode_error,
        "Run configuration resolved"
    );

    let json = output.format() == OutputFormat::Json;
    if !json {
        show_plan(&root, &engine_config, &output)?;
    }

    if !args.yes && !args.dry_run && !output.is_quiet() && !confirm(&root)? {
        return Err(CliError::Cancelled);
    }

    let service = RenameService::new(Box::new(LocalFilesystem::new()));
    info!(root = %root.display(), "Rename started");

    let report = if json {
        let report = service.run(&root, &engine_config, &SilentReporter)?;
        output.json(&JsonOutput::new(&report))?;
        report
    } else {
        let reporter = ConsoleReporter::new(&output, &root);
        service.run(&root, &engine_config, &reporter)?
    };

    info!(
        changes = report.changes(),
        failures = report.failures(),
        "Rename finished"
    );

    if json {
        return Ok(());
    }

    if report.failures() > 0 {
        output.warning(&format!(
            "{} item(s) failed; fix the cause and run again to finish",
            report.failures()
        ))?;
    }

    if !args.dry_run && !config.follow_up.steps.is_empty() {
        output.print("")?;
        output.print("Next steps:")?;
        for step in &config.follow_up.steps {
            output.print(&format!("  {:<8} {}", step.name, step.command))?;
        }
    }

    Ok(())
}

// ── Configuration merge ───────────────────────────────────────────────────────

/// Flags win over configuration; repeated set flags extend the configured sets.
///
/// The local config file name, and the name of an explicit `--config` file,
/// are always excluded so a run never rewrites its own settings.
pub(crate) fn build_engine_config(
    args: &RunArgs,
    config: &AppConfig,
    config_file: Option<&Path>,
) -> CliResult<EngineConfig> {
    let from = args
        .from
        .clone()
        .or_else(|| config.rename.from.clone())
        .ok_or(CliError::MissingTerm { side: "from" })?;
    let to = args
        .to
        .clone()
        .or_else(|| config.rename.to.clone())
        .ok_or(CliError::MissingTerm { side: "to" })?;

    let spec = RenameSpec::builder(&from, &to)
        .pairs(
            config
                .rename
                .extra_pairs
                .iter()
                .map(|p| (p.from.clone(), p.to.clone())),
        )
        .build()
        .map_err(core_error)?;

    let own_files = std::iter::once(LOCAL_CONFIG_FILE.to_string()).chain(
        config_file
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
            .map(String::from),
    );
    let exclusions = ExclusionSet::new(
        config.scan.exclude_dirs.iter().chain(&args.exclude_dirs).cloned(),
        config
            .scan
            .exclude_files
            .iter()
            .chain(&args.exclude_files)
            .cloned()
            .chain(own_files),
    )
    .map_err(core_error)?;

    let extensions = EligibleExtensionSet::new(
        config.scan.extensions.iter().chain(&args.extensions).cloned(),
    )
    .map_err(core_error)?;

    let policy = args
        .on_decode_error
        .map(Into::into)
        .unwrap_or(config.content.on_decode_error);

    let mode = if args.dry_run {
        RunMode::DryRun
    } else {
        RunMode::Apply
    };

    Ok(EngineConfig::new(spec)
        .with_exclusions(exclusions)
        .with_extensions(extensions)
        .with_decode_policy(policy)
        .with_mode(mode))
}

fn core_error(e: DomainError) -> CliError {
    CliError::Core(e.into())
}

/// Absolute root for display and record paths; a missing root is left as-is
/// so the engine reports it.
fn resolve_root(root: &Path) -> PathBuf {
    std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf())
}

// ── Display ───────────────────────────────────────────────────────────────────

fn show_plan(root: &Path, config: &EngineConfig, out: &OutputManager) -> CliResult<()> {
    out.header("Rebrand")?;
    out.print(&format!("  Root:    {}", root.display()))?;
    out.print(&format!(
        "  Rename:  {} -> {}",
        config.spec.from_term(),
        config.spec.to_term()
    ))?;
    out.print(&format!("  Decode:  {}", config.on_decode_error))?;
    if config.mode.is_dry_run() {
        out.info("Dry run: the tree will not be modified")?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: JsonSummary,
    report: &'a RunReport,
}

#[derive(Serialize)]
struct JsonSummary {
    rewritten: usize,
    files_renamed: usize,
    directories_renamed: usize,
    failures: usize,
}

impl<'a> JsonOutput<'a> {
    fn new(report: &'a RunReport) -> Self {
        Self {
            summary: JsonSummary {
                rewritten: report.rewritten(),
                files_renamed: report.files_renamed(),
                directories_renamed: report.directories_renamed(),
                failures: report.failures(),
            },
            report,
        }
    }
}

// ── Confirmation ──────────────────────────────────────────────────────────────

fn confirm(root: &Path) -> CliResult<bool> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::ConfirmationRequired);
    }
    prompt(&format!("Rewrite {} in place?", root.display()))
}

#[cfg(feature = "interactive")]
fn prompt(question: &str) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(question)
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn prompt(question: &str) -> CliResult<bool> {
    use std::io::{self, Write};

    eprint!("{question} [y/N] ");
    io::stderr().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stderr".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    Ok(is_affirmative(&input))
}

#[cfg(any(test, not(feature = "interactive")))]
fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
