//! Tree entries and per-phase path snapshots.

use std::path::{Path, PathBuf};

/// Kind of a scanned entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
    /// The link itself, whatever it points to. Never followed: its name can
    /// be renamed but its target is never read or written.
    Symlink,
}

/// One entry produced by a tree walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl TreeEntry {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Directory,
        }
    }

    pub fn symlink(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Symlink,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Immutable, ordered list of paths captured at the start of a phase.
///
/// Stale as soon as the phase moves anything; never shared across phases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSnapshot {
    paths: Vec<PathBuf>,
}

impl PathSnapshot {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Reorder deepest-first: descending component count, ties by path.
    pub fn deepest_first(mut self) -> Self {
        self.paths.sort_by(|a, b| {
            depth(b)
                .cmp(&depth(a))
                .then_with(|| a.as_os_str().cmp(b.as_os_str()))
        });
        self
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}

impl<'a> IntoIterator for &'a PathSnapshot {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Number of components in a path.
pub fn depth(path: &Path) -> usize {
    path.components().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deepest_first_orders_descendants_before_ancestors() {
        let snapshot = PathSnapshot::new(vec![
            PathBuf::from("/r/outer-term"),
            PathBuf::from("/r/outer-term/inner-term/leaf"),
            PathBuf::from("/r/b"),
            PathBuf::from("/r/outer-term/inner-term"),
            PathBuf::from("/r/a"),
        ])
        .deepest_first();

        let ordered: Vec<_> = snapshot.iter().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(
            ordered,
            [
                "/r/outer-term/inner-term/leaf",
                "/r/outer-term/inner-term",
                "/r/a",
                "/r/b",
                "/r/outer-term",
            ]
        );
    }

    #[test]
    fn depth_counts_components() {
        assert_eq!(depth(Path::new("a/b/c")), 3);
        assert_eq!(depth(Path::new("/a")), 2);
    }
}
