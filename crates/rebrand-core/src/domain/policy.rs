//! Run-wide policies: how to treat undecodable content, and whether to write.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// What the content rewriter does with a file that is not valid UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Leave the file untouched and record it as skipped.
    #[default]
    Skip,
    /// Drop undecodable byte sequences and rewrite the rest.
    Lossy,
    /// Record the file as failed; the run continues.
    Fail,
}

impl DecodePolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Lossy => "lossy",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for DecodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecodePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "lossy" | "best-effort" | "ignore" => Ok(Self::Lossy),
            "fail" | "strict" => Ok(Self::Fail),
            other => Err(DomainError::UnknownDecodePolicy(other.to_string())),
        }
    }
}

/// Result of decoding a byte buffer under a [`DecodePolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Valid UTF-8 (or lossy-decoded text).
    Text(String),
    /// Invalid UTF-8 under [`DecodePolicy::Skip`].
    Skipped,
    /// Invalid UTF-8 under [`DecodePolicy::Fail`]; carries the decoder message.
    Rejected(String),
}

impl DecodePolicy {
    pub fn decode(self, bytes: Vec<u8>) -> Decoded {
        match String::from_utf8(bytes) {
            Ok(text) => Decoded::Text(text),
            Err(err) => match self {
                Self::Skip => Decoded::Skipped,
                Self::Fail => Decoded::Rejected(err.utf8_error().to_string()),
                Self::Lossy => Decoded::Text(drop_invalid(err.as_bytes())),
            },
        }
    }
}

/// Keep every valid UTF-8 run, discard the invalid bytes between them.
fn drop_invalid(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Whether a run writes to disk or only reports what it would do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    #[default]
    Apply,
    DryRun,
}

impl RunMode {
    pub const fn is_dry_run(self) -> bool {
        matches!(self, Self::DryRun)
    }
}
