//! Rename Service - main application orchestrator.
//!
//! This service drives one run through the phase state machine:
//! 1. Scan the tree (file snapshot)
//! 2. Rewrite eligible file contents
//! 3. Rename files (fresh snapshot)
//! 4. Rename directories deepest-first (fresh snapshot)
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::Path;
use tracing::{info, instrument};

use crate::{
    application::{
        ports::{Filesystem, ProgressReporter},
        services::{
            ContentRewriter, DirectoryRenamer, FileRenamer, TreeScanner, recorder::Recorder,
        },
    },
    domain::{DomainValidator as validator, EngineConfig, EntryKind, PathSnapshot, Phase, RunReport},
    error::RebrandResult,
};

/// Main rename service.
///
/// Holds the filesystem adapter; everything else about a run comes in
/// through [`EngineConfig`].
pub struct RenameService {
    filesystem: Box<dyn Filesystem>,
}

impl RenameService {
    /// Create a new rename service with the given adapter.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use rebrand_core::application::{RenameService, SilentReporter};
    /// use rebrand_core::domain::EngineConfig;
    ///
    /// let service = RenameService::new(Box::new(filesystem));
    /// let config = EngineConfig::for_terms("maestro", "artifex")?;
    /// let report = service.run("./repo".as_ref(), &config, &SilentReporter)?;
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Run every phase over `root`.
    ///
    /// Per-item failures end up in the report. The only errors returned are
    /// an invalid configuration and a root that cannot be enumerated.
    #[instrument(
        skip_all,
        fields(
            root = %root.display(),
            from = %config.spec.from_term(),
            to = %config.spec.to_term(),
            dry_run = config.mode.is_dry_run()
        )
    )]
    pub fn run(
        &self,
        root: &Path,
        config: &EngineConfig,
        reporter: &dyn ProgressReporter,
    ) -> RebrandResult<RunReport> {
        info!("Starting rename run");

        // 1. Validate configuration
        validator::validate_config(config)?;

        let fs = self.filesystem.as_ref();
        let scanner = TreeScanner::new(fs, &config.exclusions);
        let mut report = RunReport::new(root, config.mode.is_dry_run());

        {
            let mut recorder = Recorder::new(&mut report, reporter);
            let mut files = PathSnapshot::default();
            let mut phase = Phase::Scanning;

            // 2. Advance through the phases; no phase is ever revisited
            while phase != Phase::Done {
                reporter.phase_started(phase);
                match phase {
                    Phase::Scanning => {
                        // Symlinks stay out: rewriting one would write through to its target.
                        files = scanner.snapshot(root, &[EntryKind::File], phase, &mut recorder)?;
                        info!(files = files.len(), "Tree scanned");
                    }
                    Phase::ContentRewriting => {
                        ContentRewriter::new(
                            fs,
                            &config.spec,
                            &config.extensions,
                            config.on_decode_error,
                            config.mode,
                        )
                        .run(&files, &mut recorder);
                    }
                    Phase::FileRenaming => {
                        let snapshot = scanner.snapshot(
                            root,
                            &[EntryKind::File, EntryKind::Symlink],
                            phase,
                            &mut recorder,
                        )?;
                        FileRenamer::new(fs, &config.spec, config.mode)
                            .run(&snapshot, &mut recorder);
                    }
                    Phase::DirectoryRenaming => {
                        let snapshot =
                            scanner.snapshot(root, &[EntryKind::Directory], phase, &mut recorder)?;
                        DirectoryRenamer::new(fs, &config.spec, config.mode)
                            .run(snapshot, &mut recorder);
                    }
                    Phase::Done => {}
                }
                phase = phase.next();
            }
        }

        // 3. Done
        reporter.finished(&report);
        info!(
            rewritten = report.rewritten(),
            files_renamed = report.files_renamed(),
            directories_renamed = report.directories_renamed(),
            failures = report.failures(),
            "Rename run completed"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use mockall::{Sequence, predicate::eq};

    use super::*;
    use crate::application::{
        ApplicationError,
        ports::{MockProgressReporter, SilentReporter},
        testing::MemoryFilesystem,
    };
    use crate::domain::{DomainError, Outcome, RunMode};
    use crate::error::RebrandError;

    fn service(fs: &MemoryFilesystem) -> RenameService {
        RenameService::new(Box::new(fs.clone()))
    }

    fn config() -> EngineConfig {
        EngineConfig::for_terms("term", "beta").unwrap()
    }

    fn run(fs: &MemoryFilesystem, config: &EngineConfig) -> RunReport {
        service(fs)
            .run(Path::new("/r"), config, &SilentReporter)
            .unwrap()
    }

    #[test]
    fn converts_directory_name_and_content_together() {
        let fs = MemoryFilesystem::new("/r");
        fs.add_file("/r/alpha-term/notes.txt", "Term value: alphaTERM");

        let report = run(&fs, &config());

        assert_eq!(
            fs.read_string("/r/alpha-beta/notes.txt").as_deref(),
            Some("Beta value: alphaBETA")
        );
        assert!(!fs.exists(Path::new("/r/alpha-term")));
        assert_eq!(report.rewritten(), 1);
        assert_eq!(report.directories_renamed(), 1);
        assert_eq!(report.failures(), 0);
    }

    #[test]
    fn second_run_changes_nothing() {
        let fs = MemoryFilesystem::new("/r");
        fs.add_file("/r/src/TermService.cs", "class TermService { TERM_ID }");
        fs.add_file("/r/term/term/readme.md", "see term");
        let config = config();

        let first = run(&fs, &config);
        let after_first = fs.paths();
        let second = run(&fs, &config);

        assert!(first.changes() > 0);
        assert!(second.is_noop());
        assert_eq!(fs.paths(), after_first);
    }

    #[test]
    fn phases_are_reported_in_order() {
        let fs = MemoryFilesystem::new("/r");
        fs.add_file("/r/term.md", "term");

        let mut reporter = MockProgressReporter::new();
        let mut seq = Sequence::new();
        for phase in [
            Phase::Scanning,
            Phase::ContentRewriting,
            Phase::FileRenaming,
            Phase::DirectoryRenaming,
        ] {
            reporter
                .expect_phase_started()
                .with(eq(phase))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());
        }
        reporter.expect_record().times(2).return_const(());
        reporter
            .expect_finished()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        service(&fs)
            .run(Path::new("/r"), &config(), &reporter)
            .unwrap();
    }

    #[test]
    fn one_failure_does_not_stop_the_run() {
        let fs = MemoryFilesystem::new("/r");
        fs.add_file("/r/a/term.txt", "term");
        fs.add_file("/r/b/term.txt", "term");
        fs.deny_rename("/r/a/term.txt");

        let report = run(&fs, &config());

        assert_eq!(report.failures(), 1);
        assert!(fs.exists(Path::new("/r/a/term.txt")));
        assert!(fs.exists(Path::new("/r/b/beta.txt")));
        assert_eq!(fs.read_string("/r/a/term.txt").as_deref(), Some("beta"));
    }

    #[test]
    fn unlistable_directory_is_reported_once() {
        let fs = MemoryFilesystem::new("/r");
        fs.add_file("/r/locked/term.txt", "term");
        fs.add_file("/r/open/term.txt", "term");
        fs.deny_listing("/r/locked");

        let report = run(&fs, &config());

        assert_eq!(report.failures(), 1);
        let failed: Vec<_> = report.failed_records().collect();
        assert_eq!(failed[0].phase, Phase::Scanning);
        assert_eq!(failed[0].original, PathBuf::from("/r/locked"));
        assert!(fs.exists(Path::new("/r/open/beta.txt")));
    }

    #[test]
    fn dry_run_leaves_tree_untouched() {
        let fs = MemoryFilesystem::new("/r");
        fs.add_file("/r/term/term.md", "term");
        let before = fs.paths();
        let config = config().with_mode(RunMode::DryRun);

        let report = run(&fs, &config);

        assert!(report.dry_run);
        assert_eq!(fs.paths(), before);
        assert_eq!(fs.read_string("/r/term/term.md").as_deref(), Some("term"));
        assert_eq!(fs.write_count(), 0);
        assert!(
            report
                .records
                .iter()
                .filter(|r| r.outcome.is_change())
                .all(|r| r.outcome == Outcome::Planned)
        );
        assert_eq!(report.changes(), 3);
    }

    #[test]
    fn symlinked_files_are_renamed_but_never_written_through() {
        let fs = MemoryFilesystem::new("/r");
        fs.add_file("/r/node_modules/pkg/README.md", "term excluded");
        fs.add_file("/outside/secret.md", "term outside");
        fs.add_symlink("/r/docs.md", "/r/node_modules/pkg/README.md");
        fs.add_symlink("/r/term-link.md", "/outside/secret.md");

        let report = run(&fs, &config());

        assert_eq!(report.rewritten(), 0);
        assert_eq!(report.failures(), 0);
        assert_eq!(
            fs.read_string("/r/node_modules/pkg/README.md").as_deref(),
            Some("term excluded")
        );
        assert_eq!(
            fs.read_string("/outside/secret.md").as_deref(),
            Some("term outside")
        );
        assert!(fs.is_symlink("/r/beta-link.md"));
        assert!(!fs.exists(Path::new("/r/term-link.md")));
    }

    #[test]
    fn missing_root_is_fatal() {
        let fs = MemoryFilesystem::new("/r");
        let err = service(&fs)
            .run(Path::new("/elsewhere"), &config(), &SilentReporter)
            .unwrap_err();
        assert!(matches!(
            err,
            RebrandError::Application(ApplicationError::RootUnreadable { .. })
        ));
    }

    #[test]
    fn invalid_config_is_rejected_before_touching_the_tree() {
        let fs = MemoryFilesystem::new("/r");
        fs.add_file("/r/api.txt", "api");
        let config = EngineConfig::for_terms("api", "web/rpc").unwrap();

        let err = service(&fs)
            .run(Path::new("/r"), &config, &SilentReporter)
            .unwrap_err();

        assert!(matches!(
            err,
            RebrandError::Domain(DomainError::InvalidNameTarget { .. })
        ));
        assert!(fs.visited().is_empty());
        assert_eq!(fs.read_string("/r/api.txt").as_deref(), Some("api"));
    }
}
