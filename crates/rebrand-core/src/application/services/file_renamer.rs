//! File Renamer - stage 3.
//!
//! Each file is renamed within its own parent, so processing order does not
//! matter here.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::{
    application::{ports::Filesystem, services::recorder::Recorder},
    domain::{Outcome, PathSnapshot, Phase, RenameRecord, RenameSpec, RunMode, SkipReason},
};

pub(crate) const DESTINATION_EXISTS: &str = "destination already exists";

/// Renames files whose base name contains a name-scoped variant.
pub struct FileRenamer<'a> {
    fs: &'a dyn Filesystem,
    spec: &'a RenameSpec,
    mode: RunMode,
}

impl<'a> FileRenamer<'a> {
    pub fn new(fs: &'a dyn Filesystem, spec: &'a RenameSpec, mode: RunMode) -> Self {
        Self { fs, spec, mode }
    }

    #[instrument(skip_all, fields(files = snapshot.len()))]
    pub fn run(&self, snapshot: &PathSnapshot, recorder: &mut Recorder<'_>) {
        let mut renamed = 0usize;
        for path in snapshot.iter() {
            if let Some(record) = rename_entry(self.fs, self.spec, self.mode, Phase::FileRenaming, path)
            {
                renamed += usize::from(record.outcome.is_change());
                recorder.push(record);
            }
        }
        info!(renamed, "File renaming finished");
    }

    /// Rename one file. `None` when its name does not match.
    pub fn rename_file(&self, path: &Path) -> Option<RenameRecord> {
        rename_entry(self.fs, self.spec, self.mode, Phase::FileRenaming, path)
    }
}

/// Shared by the file and directory renamers.
///
/// Order of checks: name match, source still present, destination free.
/// The existence checks run immediately before the move to keep the window
/// since the snapshot as small as possible.
pub(crate) fn rename_entry(
    fs: &dyn Filesystem,
    spec: &RenameSpec,
    mode: RunMode,
    phase: Phase,
    path: &Path,
) -> Option<RenameRecord> {
    let name = path.file_name()?.to_str()?;
    let new_name = spec.rename_name(name)?;
    let destination: PathBuf = path.with_file_name(&new_name);

    let outcome = if !fs.exists(path) {
        Outcome::Skipped(SkipReason::Vanished)
    } else if fs.exists(&destination) {
        Outcome::Failed(DESTINATION_EXISTS.into())
    } else if mode.is_dry_run() {
        Outcome::Planned
    } else {
        match fs.rename(path, &destination) {
            Ok(()) => Outcome::Succeeded,
            Err(e) => Outcome::Failed(e.cause()),
        }
    };

    Some(RenameRecord::new(phase, path, destination, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ports::SilentReporter, testing::MemoryFilesystem};
    use crate::domain::RunReport;

    fn spec() -> RenameSpec {
        RenameSpec::from_terms("term", "beta").unwrap()
    }

    #[test]
    fn renames_matching_file_in_place() {
        let fs = MemoryFilesystem::new("/r");
        fs.add_file("/r/src/TermService.cs", "x");
        let spec = spec();
        let renamer = FileRenamer::new(&fs, &spec, RunMode::Apply);

        let record = renamer
            .rename_file(Path::new("/r/src/TermService.cs"))
            .unwrap();

        assert_eq!(record.outcome, Outcome::Succeeded);
        assert_eq!(record.renamed, PathBuf::from("/r/src/BetaService.cs"));
        assert!(fs.exists(Path::new("/r/src/BetaService.cs")));
        assert!(!fs.exists(Path::new("/r/src/TermService.cs")));
    }

    #[test]
    fn non_matching_names_produce_no_record() {
        let fs = MemoryFilesystem::new("/r");
        fs.add_file("/r/notes.txt", "term");
        let spec = spec();
        let renamer = FileRenamer::new(&fs, &spec, RunMode::Apply);
        assert!(renamer.rename_file(Path::new("/r/notes.txt")).is_none());
    }

    #[test]
    fn existing_destination_is_never_overwritten() {
        let fs = MemoryFilesystem::new("/r");
        fs.add_file("/r/term.md", "old");
        fs.add_file("/r/beta.md", "keep me");
        let spec = spec();
        let renamer = FileRenamer::new(&fs, &spec, RunMode::Apply);

        let record = renamer.rename_file(Path::new("/r/term.md")).unwrap();

        assert_eq!(record.outcome, Outcome::Failed(DESTINATION_EXISTS.into()));
        assert_eq!(fs.read_string("/r/beta.md").unwrap(), "keep me");
        assert_eq!(fs.read_string("/r/term.md").unwrap(), "old");
    }

    #[test]
    fn vanished_source_is_skipped() {
        let fs = MemoryFilesystem::new("/r");
        let spec = spec();
        let renamer = FileRenamer::new(&fs, &spec, RunMode::Apply);
        let record = renamer.rename_file(Path::new("/r/term.md")).unwrap();
        assert_eq!(record.outcome, Outcome::Skipped(SkipReason::Vanished));
    }

    #[test]
    fn denied_rename_does_not_stop_the_batch() {
        let fs = MemoryFilesystem::new("/r");
        fs.add_file("/r/a-term.txt", "x");
        fs.add_file("/r/b-term.txt", "x");
        fs.deny_rename("/r/a-term.txt");
        let spec = spec();
        let renamer = FileRenamer::new(&fs, &spec, RunMode::Apply);
        let snapshot = PathSnapshot::new(vec![
            PathBuf::from("/r/a-term.txt"),
            PathBuf::from("/r/b-term.txt"),
        ]);
        let mut report = RunReport::new("/r", false);
        let mut recorder = Recorder::new(&mut report, &SilentReporter);

        renamer.run(&snapshot, &mut recorder);

        assert_eq!(report.failures(), 1);
        assert_eq!(report.files_renamed(), 1);
        assert!(fs.exists(Path::new("/r/a-term.txt")));
        assert!(fs.exists(Path::new("/r/b-beta.txt")));
    }

    #[test]
    fn dry_run_leaves_file_in_place() {
        let fs = MemoryFilesystem::new("/r");
        fs.add_file("/r/term.md", "x");
        let spec = spec();
        let renamer = FileRenamer::new(&fs, &spec, RunMode::DryRun);
        let record = renamer.rename_file(Path::new("/r/term.md")).unwrap();
        assert_eq!(record.outcome, Outcome::Planned);
        assert!(fs.exists(Path::new("/r/term.md")));
    }
}
