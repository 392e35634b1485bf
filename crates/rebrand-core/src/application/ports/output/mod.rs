//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the engine needs from the outside world.
//! The `rebrand-adapters` crate provides the filesystem implementations; the
//! CLI provides the progress reporter.

use std::path::Path;

use crate::domain::{ExclusionSet, Phase, RenameRecord, RunReport, TreeEntry};
use crate::error::RebrandResult;

/// Lazy tree walk. Each item is an entry or a traversal failure for one path.
pub type TreeWalk<'a> = Box<dyn Iterator<Item = RebrandResult<TreeEntry>> + 'a>;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `rebrand_adapters::filesystem::LocalFilesystem` (production)
/// - `rebrand_core::application::testing::MemoryFilesystem` (tests, `testing` feature)
///
/// ## Design Notes
///
/// - Paths passed in are absolute or root-joined; the port never resolves
///   relative paths against a working directory of its own
/// - `walk` is restartable: every call starts a fresh traversal
/// - `rename` must not be relied on to refuse an existing destination; the
///   engine checks `exists` first
pub trait Filesystem: Send + Sync {
    /// Walk everything under `root` (excluding `root` itself).
    ///
    /// Directories whose name is an excluded directory token are not yielded
    /// and not descended into. Symlinks are not followed. Entries come in a
    /// deterministic order (sorted by name within each directory).
    ///
    /// Fails only if `root` itself cannot be enumerated.
    fn walk<'a>(&'a self, root: &Path, exclusions: &'a ExclusionSet) -> RebrandResult<TreeWalk<'a>>;

    /// Read a whole file.
    fn read(&self, path: &Path) -> RebrandResult<Vec<u8>>;

    /// Replace a file's content.
    fn write(&self, path: &Path, content: &[u8]) -> RebrandResult<()>;

    /// Move `from` to `to`. Both are in the same parent directory.
    fn rename(&self, from: &Path, to: &Path) -> RebrandResult<()>;

    /// Check if anything (file, directory, or dangling link) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Check if `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// Port for streaming progress out of a run.
///
/// Implemented by the CLI's output layer. Called synchronously, in order.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressReporter {
    /// A phase is about to process its snapshot.
    fn phase_started(&self, phase: Phase);

    /// One item worth showing (changed, planned, failed, or notably skipped).
    fn record(&self, record: &RenameRecord);

    /// The run reached `Done`.
    fn finished(&self, report: &RunReport);
}

/// Reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn phase_started(&self, _phase: Phase) {}

    fn record(&self, _record: &RenameRecord) {}

    fn finished(&self, _report: &RunReport) {}
}
