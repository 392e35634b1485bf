//! Content Rewriter - stage 2.
//!
//! Rewrites eligible files in place. The new content is computed fully in
//! memory and written only when it differs, so a failed write never leaves a
//! half-written file and untouched files keep their timestamps.
//!
//! The snapshot handed in holds regular files only; symlinks are left out by
//! the scanner so a write can never land on a link's target.

use std::borrow::Cow;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::{ports::Filesystem, services::recorder::Recorder},
    domain::{
        DecodePolicy, Decoded, EligibleExtensionSet, Outcome, PathSnapshot, Phase, RenameRecord,
        RenameSpec, RunMode, SkipReason,
    },
};

/// Applies a [`RenameSpec`] to file contents.
pub struct ContentRewriter<'a> {
    fs: &'a dyn Filesystem,
    spec: &'a RenameSpec,
    extensions: &'a EligibleExtensionSet,
    policy: DecodePolicy,
    mode: RunMode,
}

impl<'a> ContentRewriter<'a> {
    pub fn new(
        fs: &'a dyn Filesystem,
        spec: &'a RenameSpec,
        extensions: &'a EligibleExtensionSet,
        policy: DecodePolicy,
        mode: RunMode,
    ) -> Self {
        Self {
            fs,
            spec,
            extensions,
            policy,
            mode,
        }
    }

    /// Rewrite every eligible file in the snapshot.
    ///
    /// Ineligible files produce no record at all.
    #[instrument(skip_all, fields(files = snapshot.len()))]
    pub fn run(&self, snapshot: &PathSnapshot, recorder: &mut Recorder<'_>) {
        let mut eligible = 0usize;
        for path in snapshot.iter().filter(|p| self.extensions.is_eligible(p)) {
            eligible += 1;
            let outcome = self.rewrite_file(path);
            recorder.push(RenameRecord::in_place(Phase::ContentRewriting, path, outcome));
        }
        info!(eligible, "Content rewrite finished");
    }

    /// Rewrite one file, never propagating per-file failures.
    pub fn rewrite_file(&self, path: &Path) -> Outcome {
        let bytes = match self.fs.read(path) {
            Ok(bytes) => bytes,
            Err(e) => return Outcome::Failed(e.cause()),
        };

        let text = match self.policy.decode(bytes) {
            Decoded::Text(text) => text,
            Decoded::Skipped => return Outcome::Skipped(SkipReason::Undecodable),
            Decoded::Rejected(reason) => {
                return Outcome::Failed(format!("Failed to decode as UTF-8: {reason}"));
            }
        };

        let rewritten = match self.spec.apply(&text) {
            Cow::Borrowed(_) => return Outcome::Skipped(SkipReason::NoMatch),
            Cow::Owned(new) if new == text => return Outcome::Skipped(SkipReason::NoMatch),
            Cow::Owned(new) => new,
        };

        if self.mode.is_dry_run() {
            return Outcome::Planned;
        }

        match self.fs.write(path, rewritten.as_bytes()) {
            Ok(()) => {
                debug!(path = %path.display(), "Content updated");
                Outcome::Succeeded
            }
            Err(e) => Outcome::Failed(e.cause()),
        }
    }
}
