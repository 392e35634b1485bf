//! Directory Renamer - stage 4.
//!
//! Directories are renamed deepest-first. Renaming an ancestor first would
//! move every descendant and invalidate the rest of the snapshot.

use std::path::Path;

use tracing::{info, instrument};

use crate::{
    application::{
        ports::Filesystem,
        services::{file_renamer::rename_entry, recorder::Recorder},
    },
    domain::{PathSnapshot, Phase, RenameRecord, RenameSpec, RunMode},
};

/// Renames directories whose name contains a name-scoped variant.
pub struct DirectoryRenamer<'a> {
    fs: &'a dyn Filesystem,
    spec: &'a RenameSpec,
    mode: RunMode,
}

impl<'a> DirectoryRenamer<'a> {
    pub fn new(fs: &'a dyn Filesystem, spec: &'a RenameSpec, mode: RunMode) -> Self {
        Self { fs, spec, mode }
    }

    /// Reorder the snapshot deepest-first, then rename.
    #[instrument(skip_all, fields(directories = snapshot.len()))]
    pub fn run(&self, snapshot: PathSnapshot, recorder: &mut Recorder<'_>) {
        let ordered = snapshot.deepest_first();
        let mut renamed = 0usize;
        for path in ordered.iter() {
            if let Some(record) = self.rename_directory(path) {
                renamed += usize::from(record.outcome.is_change());
                recorder.push(record);
            }
        }
        info!(renamed, "Directory renaming finished");
    }

    /// Rename one directory. `None` when its name does not match.
    ///
    /// Existence is re-checked at the snapshotted path first; a directory
    /// that is gone is recorded as vanished rather than failed.
    pub fn rename_directory(&self, path: &Path) -> Option<RenameRecord> {
        rename_entry(self.fs, self.spec, self.mode, Phase::DirectoryRenaming, path)
    }
}
