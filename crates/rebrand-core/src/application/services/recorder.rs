//! Collects records into the run report and streams the notable ones.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::application::ports::ProgressReporter;
use crate::domain::{Outcome, RenameRecord, RunReport};

/// Sink shared by all stages of one run.
pub struct Recorder<'r> {
    report: &'r mut RunReport,
    reporter: &'r dyn ProgressReporter,
    unlistable: BTreeSet<PathBuf>,
}

impl<'r> Recorder<'r> {
    pub fn new(report: &'r mut RunReport, reporter: &'r dyn ProgressReporter) -> Self {
        Self {
            report,
            reporter,
            unlistable: BTreeSet::new(),
        }
    }

    pub fn push(&mut self, record: RenameRecord) {
        match &record.outcome {
            Outcome::Failed(cause) => warn!(
                phase = ?record.phase,
                path = %record.original.display(),
                %cause,
                "Item failed"
            ),
            outcome => debug!(
                phase = ?record.phase,
                path = %record.original.display(),
                ?outcome,
                "Item processed"
            ),
        }
        if record.is_reportable() {
            self.reporter.record(&record);
        }
        self.report.push(record);
    }

    /// Record a directory that could not be listed.
    ///
    /// Every phase takes its own snapshot, so the same directory fails once
    /// per phase; only the first failure is kept.
    pub fn push_traversal_failure(&mut self, record: RenameRecord) {
        if self.unlistable.insert(record.original.clone()) {
            self.push(record);
        } else {
            debug!(path = %record.original.display(), "Traversal failure already recorded");
        }
    }

    pub fn reporter(&self) -> &dyn ProgressReporter {
        self.reporter
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::application::ports::MockProgressReporter;
    use crate::domain::{Phase, SkipReason};

    #[test]
    fn only_notable_records_reach_the_reporter() {
        let mut reporter = MockProgressReporter::new();
        reporter.expect_record().times(1).return_const(());
        let mut report = RunReport::new("/r", false);
        let mut recorder = Recorder::new(&mut report, &reporter);

        recorder.push(RenameRecord::in_place(
            Phase::ContentRewriting,
            Path::new("/r/a.md"),
            Outcome::Skipped(SkipReason::NoMatch),
        ));
        recorder.push(RenameRecord::in_place(
            Phase::ContentRewriting,
            Path::new("/r/b.md"),
            Outcome::Succeeded,
        ));

        assert_eq!(report.records.len(), 2);
    }

    #[test]
    fn repeated_traversal_failures_are_recorded_once() {
        let mut report = RunReport::new("/r", false);
        let mut recorder = Recorder::new(&mut report, &crate::application::SilentReporter);
        for phase in [Phase::Scanning, Phase::FileRenaming, Phase::DirectoryRenaming] {
            recorder.push_traversal_failure(RenameRecord::in_place(
                phase,
                Path::new("/r/locked"),
                Outcome::Failed("permission denied".into()),
            ));
        }
        assert_eq!(report.failures(), 1);
        assert_eq!(report.records[0].phase, Phase::Scanning);
    }
}
