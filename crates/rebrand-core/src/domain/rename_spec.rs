//! The rename specification: which literal strings become which.
//!
//! A [`RenameSpec`] is built once per run and never mutated. Construction
//! orders the variants and rejects specs that would not converge, so every
//! consumer can apply it blindly.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Where a variant is allowed to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariantScope {
    /// File content, file names and directory names.
    ContentAndNames,
    /// File content only.
    ContentOnly,
}

impl VariantScope {
    pub const fn applies_to_names(self) -> bool {
        matches!(self, Self::ContentAndNames)
    }
}

/// One literal `source → target` substitution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    pub source: String,
    pub target: String,
    pub scope: VariantScope,
}

impl Variant {
    pub fn new(source: impl Into<String>, target: impl Into<String>, scope: VariantScope) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            scope,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// Ordered, validated list of variants.
///
/// Invariants:
/// - sources are non-empty and unique
/// - variants are sorted by source length, longest first (stable)
/// - no target contains any source as a substring
/// - no target can form a source together with neighbouring text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameSpec {
    from: String,
    to: String,
    variants: Vec<Variant>,
}

impl RenameSpec {
    /// Build the standard exact / Capitalized / UPPERCASE spec for a term pair.
    pub fn from_terms(from: &str, to: &str) -> Result<Self, DomainError> {
        Self::builder(from, to).build()
    }

    pub fn builder(from: &str, to: &str) -> RenameSpecBuilder {
        RenameSpecBuilder {
            from: from.to_string(),
            to: to.to_string(),
            extra: Vec::new(),
        }
    }

    pub fn from_term(&self) -> &str {
        &self.from
    }

    pub fn to_term(&self) -> &str {
        &self.to
    }

    /// All variants in application order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Apply every variant to `text`, all occurrences, in priority order.
    ///
    /// Borrows when nothing matched.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        Self::apply_iter(self.variants.iter(), text)
    }

    /// Compute the new name for a file or directory base name.
    ///
    /// Returns `None` when no name-scoped variant occurs in `name`.
    pub fn rename_name(&self, name: &str) -> Option<String> {
        let renamed = Self::apply_iter(
            self.variants.iter().filter(|v| v.scope.applies_to_names()),
            name,
        );
        match renamed {
            Cow::Owned(new_name) if new_name != name => Some(new_name),
            _ => None,
        }
    }

    /// `true` if `name` contains any name-scoped source variant.
    pub fn matches_name(&self, name: &str) -> bool {
        self.variants
            .iter()
            .filter(|v| v.scope.applies_to_names())
            .any(|v| name.contains(v.source.as_str()))
    }

    fn apply_iter<'a, 'v>(
        variants: impl Iterator<Item = &'v Variant>,
        text: &'a str,
    ) -> Cow<'a, str> {
        let mut out = Cow::Borrowed(text);
        for variant in variants {
            if out.contains(variant.source.as_str()) {
                out = Cow::Owned(out.replace(variant.source.as_str(), &variant.target));
            }
        }
        out
    }

    fn validate(&self) -> Result<(), DomainError> {
        for variant in &self.variants {
            if variant.source.is_empty() {
                return Err(DomainError::EmptyVariantSource);
            }
        }
        for variant in &self.variants {
            if let Some(shadow) = self
                .variants
                .iter()
                .find(|s| variant.target.contains(s.source.as_str()))
            {
                return Err(DomainError::SelfReferentialVariant {
                    target: variant.target.clone(),
                    source_variant: shadow.source.clone(),
                });
            }
            if let Some(shadow) = self
                .variants
                .iter()
                .find(|s| can_form_across_boundary(&variant.target, &s.source))
            {
                return Err(DomainError::OverlappingVariant {
                    target: variant.target.clone(),
                    source_variant: shadow.source.clone(),
                });
            }
        }
        Ok(())
    }
}

/// `true` if writing `target` into some text can create a new `source`
/// occurrence together with the characters around it.
///
/// That happens when `target` ends with a prefix of `source`, starts with a
/// suffix of `source`, or sits inside `source`.
fn can_form_across_boundary(target: &str, source: &str) -> bool {
    if source.contains(target) {
        return true;
    }
    target
        .char_indices()
        .skip(1)
        .map(|(i, _)| i)
        .any(|i| source.starts_with(&target[i..]) || source.ends_with(&target[..i]))
}

impl fmt::Display for RenameSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Builder for [`RenameSpec`] with optional extra literal pairs.
#[derive(Debug, Clone)]
pub struct RenameSpecBuilder {
    from: String,
    to: String,
    extra: Vec<(String, String)>,
}

impl RenameSpecBuilder {
    /// Add a content-only literal pair, e.g. `.presentation -> .ui`.
    pub fn pair(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.extra.push((source.into(), target.into()));
        self
    }

    pub fn pairs<I, S, T>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        self.extra
            .extend(pairs.into_iter().map(|(s, t)| (s.into(), t.into())));
        self
    }

    pub fn build(self) -> Result<RenameSpec, DomainError> {
        if self.from.is_empty() {
            return Err(DomainError::EmptyTerm { side: "from" });
        }
        if self.to.is_empty() {
            return Err(DomainError::EmptyTerm { side: "to" });
        }
        if self.from == self.to {
            return Err(DomainError::IdenticalTerms { term: self.from });
        }

        let candidates = [
            Variant::new(&self.from, &self.to, VariantScope::ContentAndNames),
            Variant::new(
                capitalize(&self.from),
                capitalize(&self.to),
                VariantScope::ContentAndNames,
            ),
            Variant::new(
                self.from.to_uppercase(),
                self.to.to_uppercase(),
                VariantScope::ContentOnly,
            ),
        ]
        .into_iter()
        .chain(
            self.extra
                .into_iter()
                .map(|(s, t)| Variant::new(s, t, VariantScope::ContentOnly)),
        );

        let mut variants: Vec<Variant> = Vec::new();
        for candidate in candidates {
            if !variants.iter().any(|v| v.source == candidate.source) {
                variants.push(candidate);
            }
        }
        // Stable: equal-length variants keep insertion order.
        variants.sort_by(|a, b| b.source.len().cmp(&a.source.len()));

        let spec = RenameSpec {
            from: self.from,
            to: self.to,
            variants,
        };
        spec.validate()?;
        Ok(spec)
    }
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
