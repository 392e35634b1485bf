//! Per-item results and the aggregated run report.
//!
//! Nothing here is persisted; records exist so the caller can print progress
//! and a summary, or serialize the whole report as JSON.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Engine phases, in the only order they may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Scanning,
    ContentRewriting,
    FileRenaming,
    DirectoryRenaming,
    Done,
}

impl Phase {
    /// The phase that follows this one. `Done` is terminal.
    pub const fn next(self) -> Self {
        match self {
            Self::Scanning => Self::ContentRewriting,
            Self::ContentRewriting => Self::FileRenaming,
            Self::FileRenaming => Self::DirectoryRenaming,
            Self::DirectoryRenaming | Self::Done => Self::Done,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Scanning => "Scanning tree",
            Self::ContentRewriting => "Updating file contents",
            Self::FileRenaming => "Renaming files",
            Self::DirectoryRenaming => "Renaming directories",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Why an item was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// Nothing to replace.
    NoMatch,
    /// The path disappeared between snapshot and action.
    Vanished,
    /// Content is not valid UTF-8 and the decode policy is `skip`.
    Undecodable,
}

impl SkipReason {
    /// Whether the skip is worth showing to the user.
    pub const fn is_notable(self) -> bool {
        !matches!(self, Self::NoMatch)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoMatch => "no match",
            Self::Vanished => "path no longer exists",
            Self::Undecodable => "not valid UTF-8",
        })
    }
}

/// Outcome of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "kebab-case")]
pub enum Outcome {
    Succeeded,
    /// Dry run: the change would have been made.
    Planned,
    Skipped(SkipReason),
    Failed(String),
}

impl Outcome {
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Planned)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// One rename / rewrite attempt.
///
/// For content rewrites `renamed == original`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameRecord {
    pub phase: Phase,
    pub original: PathBuf,
    pub renamed: PathBuf,
    pub outcome: Outcome,
}

impl RenameRecord {
    pub fn new(
        phase: Phase,
        original: impl Into<PathBuf>,
        renamed: impl Into<PathBuf>,
        outcome: Outcome,
    ) -> Self {
        Self {
            phase,
            original: original.into(),
            renamed: renamed.into(),
            outcome,
        }
    }

    /// A record about a single path (content rewrite, traversal failure).
    pub fn in_place(phase: Phase, path: &Path, outcome: Outcome) -> Self {
        Self::new(phase, path, path, outcome)
    }

    /// Whether a reporter should print this record.
    pub fn is_reportable(&self) -> bool {
        match &self.outcome {
            Outcome::Skipped(reason) => reason.is_notable(),
            _ => true,
        }
    }
}

/// Aggregated result of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub root: PathBuf,
    pub dry_run: bool,
    pub records: Vec<RenameRecord>,
}

impl RunReport {
    pub fn new(root: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            root: root.into(),
            dry_run,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: RenameRecord) {
        self.records.push(record);
    }

    fn count(&self, phase: Phase, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.records
            .iter()
            .filter(|r| r.phase == phase && pred(&r.outcome))
            .count()
    }

    /// Files whose content changed (or would change).
    pub fn rewritten(&self) -> usize {
        self.count(Phase::ContentRewriting, Outcome::is_change)
    }

    pub fn files_renamed(&self) -> usize {
        self.count(Phase::FileRenaming, Outcome::is_change)
    }

    pub fn directories_renamed(&self) -> usize {
        self.count(Phase::DirectoryRenaming, Outcome::is_change)
    }

    pub fn failures(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_failure()).count()
    }

    pub fn changes(&self) -> usize {
        self.rewritten() + self.files_renamed() + self.directories_renamed()
    }

    /// `true` when the run neither changed nor failed anything.
    pub fn is_noop(&self) -> bool {
        self.changes() == 0 && self.failures() == 0
    }

    pub fn failed_records(&self) -> impl Iterator<Item = &RenameRecord> {
        self.records.iter().filter(|r| r.outcome.is_failure())
    }
}
