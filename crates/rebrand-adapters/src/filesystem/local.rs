//! Local filesystem adapter using `std::fs` and `walkdir`.

use std::io;
use std::path::Path;

use tracing::trace;
use walkdir::WalkDir;

use rebrand_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, TreeWalk},
    },
    domain::{ExclusionSet, TreeEntry},
    error::{RebrandError, RebrandResult},
};

/// Production filesystem implementation using `std::fs`.
///
/// Symlinks are reported as [`TreeEntry::symlink`] leaves and never
/// descended into.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn walk<'a>(&'a self, root: &Path, exclusions: &'a ExclusionSet) -> RebrandResult<TreeWalk<'a>> {
        // Probe the root up front: failing here is fatal, failing below is not.
        std::fs::read_dir(root).map_err(|e| ApplicationError::RootUnreadable {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })?;

        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                let pruned = entry.depth() > 0
                    && entry.file_type().is_dir()
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| exclusions.is_excluded_dir_name(name));
                if pruned {
                    trace!(path = %entry.path().display(), "Pruned excluded directory");
                }
                !pruned
            });

        let root = root.to_path_buf();
        Ok(Box::new(walker.map(move |item| match item {
            Ok(entry) if entry.path_is_symlink() => Ok(TreeEntry::symlink(entry.into_path())),
            Ok(entry) if entry.file_type().is_dir() => Ok(TreeEntry::directory(entry.into_path())),
            Ok(entry) => Ok(TreeEntry::file(entry.into_path())),
            Err(e) => Err(map_walk_error(&root, e)),
        })))
    }

    fn read(&self, path: &Path) -> RebrandResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write(&self, path: &Path, content: &[u8]) -> RebrandResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn rename(&self, from: &Path, to: &Path) -> RebrandResult<()> {
        std::fs::rename(from, to).map_err(|e| map_io_error(from, e, "rename"))
    }

    fn exists(&self, path: &Path) -> bool {
        // A dangling symlink still occupies its name.
        std::fs::symlink_metadata(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> RebrandError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

fn map_walk_error(root: &Path, e: walkdir::Error) -> RebrandError {
    let path = e.path().unwrap_or(root).to_path_buf();
    let reason = match e.io_error() {
        Some(io) => io.to_string(),
        None => e.to_string(),
    };
    ApplicationError::TraversalFailed { path, reason }.into()
}
