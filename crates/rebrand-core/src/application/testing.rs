//! In-memory filesystem with failure injection.
//!
//! Used by the unit tests in this crate and, through the `testing` feature,
//! by the engine tests in `rebrand-adapters`. It lives here because the
//! adapters crate depends on this one.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::application::{
    ApplicationError,
    ports::{Filesystem, TreeWalk},
};
use crate::domain::{ExclusionSet, TreeEntry};
use crate::error::{RebrandError, RebrandResult};

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir,
    /// Link to another path; reads and writes go to the target.
    Symlink(PathBuf),
}

#[derive(Debug, Default)]
struct State {
    nodes: BTreeMap<PathBuf, Node>,
    deny_listing: HashSet<PathBuf>,
    deny_read: HashSet<PathBuf>,
    deny_rename: HashSet<PathBuf>,
    deny_write: HashSet<PathBuf>,
    visited: Vec<PathBuf>,
    writes: usize,
    no_pruning: bool,
}

impl State {
    fn add_dir(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.nodes.entry(current.clone()).or_insert(Node::Dir);
        }
    }

    fn add_node(&mut self, path: &Path, node: Node) {
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.nodes.insert(path.to_path_buf(), node);
    }

    /// Follow one level of symlink, the way `std::fs::read` would.
    fn resolve(&self, path: &Path) -> PathBuf {
        match self.nodes.get(path) {
            Some(Node::Symlink(target)) => target.clone(),
            _ => path.to_path_buf(),
        }
    }
}

/// Clones share state, so a test can hand one to `RenameService` and keep
/// another for assertions.
#[derive(Debug, Default, Clone)]
pub struct MemoryFilesystem {
    state: Arc<Mutex<State>>,
}

impl MemoryFilesystem {
    /// A filesystem holding only the directory `root` and its ancestors.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let fs = Self::default();
        fs.add_dir(root);
        fs
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a directory and all of its parents.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.state().add_dir(path.as_ref());
    }

    /// Create a file, creating parent directories as needed.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) {
        self.state()
            .add_node(path.as_ref(), Node::File(content.as_ref().to_vec()));
    }

    /// Create a symlink at `path` pointing to `target`.
    pub fn add_symlink(&self, path: impl AsRef<Path>, target: impl AsRef<Path>) {
        self.state()
            .add_node(path.as_ref(), Node::Symlink(target.as_ref().to_path_buf()));
    }

    /// File content as UTF-8 (lossy), or `None` for anything but a file.
    pub fn read_string(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.state().nodes.get(path.as_ref()) {
            Some(Node::File(bytes)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    /// Every path in the tree, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.state().nodes.keys().cloned().collect()
    }

    pub fn is_symlink(&self, path: impl AsRef<Path>) -> bool {
        matches!(self.state().nodes.get(path.as_ref()), Some(Node::Symlink(_)))
    }

    /// Make listing the directory at `path` fail.
    pub fn deny_listing(&self, path: impl AsRef<Path>) {
        self.state().deny_listing.insert(path.as_ref().to_path_buf());
    }

    /// Make reads of `path` fail.
    pub fn deny_read(&self, path: impl AsRef<Path>) {
        self.state().deny_read.insert(path.as_ref().to_path_buf());
    }

    /// Make renames of `path` fail.
    pub fn deny_rename(&self, path: impl AsRef<Path>) {
        self.state().deny_rename.insert(path.as_ref().to_path_buf());
    }

    /// Make writes to `path` fail.
    pub fn deny_write(&self, path: impl AsRef<Path>) {
        self.state().deny_write.insert(path.as_ref().to_path_buf());
    }

    /// Make `walk` descend into excluded directories.
    pub fn disable_pruning(&self) {
        self.state().no_pruning = true;
    }

    /// Directories whose children were listed, in order.
    pub fn visited(&self) -> Vec<PathBuf> {
        self.state().visited.clone()
    }

    /// Successful writes so far.
    pub fn write_count(&self) -> usize {
        self.state().writes
    }
}

fn fs_error(path: &Path, reason: &str) -> RebrandError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn walk<'a>(&'a self, root: &Path, exclusions: &'a ExclusionSet) -> RebrandResult<TreeWalk<'a>> {
        let mut state = self.state();
        if !matches!(state.nodes.get(root), Some(Node::Dir)) {
            return Err(ApplicationError::RootUnreadable {
                path: root.to_path_buf(),
                reason: "not a directory".into(),
            }
            .into());
        }
        if state.deny_listing.contains(root) {
            return Err(ApplicationError::RootUnreadable {
                path: root.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into());
        }

        let mut out: Vec<RebrandResult<TreeEntry>> = Vec::new();
        let mut stack = vec![root.to_path_buf()];

        while let Some(dir) = stack.pop() {
            if state.deny_listing.contains(&dir) {
                out.push(Err(ApplicationError::TraversalFailed {
                    path: dir.clone(),
                    reason: "permission denied".into(),
                }
                .into()));
                continue;
            }
            state.visited.push(dir.clone());
            let children: Vec<(PathBuf, TreeEntry)> = state
                .nodes
                .iter()
                .filter(|(p, _)| p.parent() == Some(dir.as_path()))
                .map(|(p, n)| {
                    let entry = match n {
                        Node::File(_) => TreeEntry::file(p.clone()),
                        Node::Dir => TreeEntry::directory(p.clone()),
                        Node::Symlink(_) => TreeEntry::symlink(p.clone()),
                    };
                    (p.clone(), entry)
                })
                .collect();
            let mut subdirs = Vec::new();
            for (path, entry) in children {
                if entry.is_dir() {
                    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                    if !state.no_pruning && exclusions.is_excluded_dir_name(name) {
                        continue;
                    }
                    subdirs.push(path);
                }
                out.push(Ok(entry));
            }
            stack.extend(subdirs.into_iter().rev());
        }
        Ok(Box::new(out.into_iter()))
    }

    fn read(&self, path: &Path) -> RebrandResult<Vec<u8>> {
        let state = self.state();
        if state.deny_read.contains(path) {
            return Err(fs_error(path, "Failed to read file: permission denied"));
        }
        match state.nodes.get(&state.resolve(path)) {
            Some(Node::File(bytes)) => Ok(bytes.clone()),
            _ => Err(fs_error(path, "Failed to read file: not found")),
        }
    }

    fn write(&self, path: &Path, content: &[u8]) -> RebrandResult<()> {
        let mut state = self.state();
        if state.deny_write.contains(path) {
            return Err(fs_error(path, "Failed to write file: permission denied"));
        }
        let target = state.resolve(path);
        let parent_missing = target
            .parent()
            .is_some_and(|p| !matches!(state.nodes.get(p), Some(Node::Dir)));
        if parent_missing {
            return Err(fs_error(path, "Failed to write file: not found"));
        }
        state.writes += 1;
        state.nodes.insert(target, Node::File(content.to_vec()));
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> RebrandResult<()> {
        let mut state = self.state();
        if state.deny_rename.contains(from) {
            return Err(fs_error(from, "Failed to rename: permission denied"));
        }
        if !state.nodes.contains_key(from) {
            return Err(fs_error(from, "Failed to rename: not found"));
        }
        let moved: Vec<PathBuf> = state
            .nodes
            .keys()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for old in moved {
            let (Some(node), Ok(suffix)) = (state.nodes.remove(&old), old.strip_prefix(from))
            else {
                continue;
            };
            let new = if suffix.as_os_str().is_empty() {
                to.to_path_buf()
            } else {
                to.join(suffix)
            };
            state.nodes.insert(new, node);
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.state().nodes.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.state().nodes.get(path), Some(Node::Dir))
    }
}
