//! Tree Scanner - stage 1.
//!
//! Produces filtered walks and per-phase snapshots. Pruning of excluded
//! directories happens in the filesystem adapter; the scanner re-checks every
//! component of each relative path so an adapter that descends too far can
//! never leak an excluded path into a snapshot.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem, services::recorder::Recorder},
    domain::{EntryKind, ExclusionSet, Outcome, PathSnapshot, Phase, RenameRecord, TreeEntry},
    error::{RebrandError, RebrandResult},
};

/// Walks a root directory under an [`ExclusionSet`].
pub struct TreeScanner<'a> {
    fs: &'a dyn Filesystem,
    exclusions: &'a ExclusionSet,
}

impl<'a> TreeScanner<'a> {
    pub fn new(fs: &'a dyn Filesystem, exclusions: &'a ExclusionSet) -> Self {
        Self { fs, exclusions }
    }

    /// Start a fresh, lazy traversal of `root`.
    ///
    /// Fails only if `root` cannot be enumerated. Traversal failures below the
    /// root are yielded as `Err` items and the walk continues.
    pub fn walk(
        &self,
        root: &Path,
    ) -> RebrandResult<impl Iterator<Item = RebrandResult<TreeEntry>> + 'a> {
        if !self.fs.is_dir(root) {
            return Err(ApplicationError::RootUnreadable {
                path: root.to_path_buf(),
                reason: "not a directory".into(),
            }
            .into());
        }

        let exclusions = self.exclusions;
        let root_buf = root.to_path_buf();
        let walk = self.fs.walk(root, exclusions)?;

        Ok(walk.filter(move |item| match item {
            Ok(entry) => {
                let relative = entry.path.strip_prefix(&root_buf).unwrap_or(&entry.path);
                !exclusions.excludes(relative, entry.is_dir())
            }
            Err(_) => true,
        }))
    }

    /// Capture every entry whose kind is in `kinds` as an immutable snapshot.
    ///
    /// Traversal failures are recorded against `phase` (once per directory
    /// per run) and skipped.
    #[instrument(skip_all, fields(root = %root.display(), ?kinds, ?phase))]
    pub fn snapshot(
        &self,
        root: &Path,
        kinds: &[EntryKind],
        phase: Phase,
        recorder: &mut Recorder<'_>,
    ) -> RebrandResult<PathSnapshot> {
        let mut paths: Vec<PathBuf> = Vec::new();
        for item in self.walk(root)? {
            match item {
                Ok(entry) if kinds.contains(&entry.kind) => paths.push(entry.path),
                Ok(_) => {}
                Err(err) => recorder.push_traversal_failure(traversal_record(phase, root, err)),
            }
        }
        debug!(count = paths.len(), "Snapshot captured");
        Ok(PathSnapshot::new(paths))
    }
}

fn traversal_record(phase: Phase, root: &Path, err: RebrandError) -> RenameRecord {
    let path = match &err {
        RebrandError::Application(ApplicationError::TraversalFailed { path, .. })
        | RebrandError::Application(ApplicationError::FilesystemError { path, .. }) => path.clone(),
        _ => root.to_path_buf(),
    };
    RenameRecord::in_place(phase, &path, Outcome::Failed(err.cause()))
}
