use camino::Utf8Path;
use globset::{GlobSet, GlobSetBuilder};
use std::borrow::Cow;
use thiserror::Error;

use crate::pattern::{PatternError, compile_glob};
use crate::set::PatternSet;

/// A pattern that failed to compile, with its position in the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("pattern {index} ('{pattern}'): {source}")]
pub struct CompileError {
    pub index: usize,
    pub pattern: String,
    #[source]
    pub source: PatternError,
}

/// Compiled form of a [`PatternSet`].
///
/// Paths are matched as `/`-separated strings relative to the project root;
/// see [`normalize_path`].
#[derive(Debug, Clone)]
pub struct PathMatcher {
    patterns: Vec<String>,
    globs: GlobSet,
}

impl PathMatcher {
    /// Compile every pattern in `set`.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that fails to compile.
    pub fn new(set: &PatternSet) -> Result<Self, CompileError> {
        Self::from_patterns(set.iter())
    }

    /// Compile patterns from any string iterator, in order.
    pub fn from_patterns<'a, I>(patterns: I) -> Result<Self, CompileError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::new();
        for (index, pattern) in patterns.into_iter().enumerate() {
            let glob = compile_glob(pattern).map_err(|source| CompileError {
                index,
                pattern: pattern.to_string(),
                source,
            })?;
            builder.add(glob);
            kept.push(pattern.to_string());
        }
        // Every glob compiled individually, so a set-level failure has no
        // single culprit; attribute it to the last pattern.
        let globs = builder.build().map_err(|e| CompileError {
            index: kept.len().saturating_sub(1),
            pattern: kept.last().cloned().unwrap_or_default(),
            source: PatternError::Syntax(e.kind().to_string()),
        })?;

        tracing::trace!(count = kept.len(), "compiled path matcher");

        Ok(Self {
            patterns: kept,
            globs,
        })
    }

    /// True when any pattern matches `path`. An empty matcher matches nothing.
    #[must_use]
    pub fn is_match(&self, path: &Utf8Path) -> bool {
        self.globs.is_match(normalize_path(path).as_ref())
    }

    /// Patterns matching `path`, in the order they were declared.
    #[must_use]
    pub fn matching_patterns(&self, path: &Utf8Path) -> Vec<&str> {
        let mut indices = self.globs.matches(normalize_path(path).as_ref());
        indices.sort_unstable();
        indices
            .into_iter()
            .map(|i| self.patterns[i].as_str())
            .collect()
    }

    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Normalize a path for matching: backslashes become `/` and leading `./`
/// segments are dropped.
#[must_use]
pub fn normalize_path(path: &Utf8Path) -> Cow<'_, str> {
    let raw = path.as_str();
    let mut normalized: Cow<'_, str> = if raw.contains('\\') {
        Cow::Owned(raw.replace('\\', "/"))
    } else {
        Cow::Borrowed(raw)
    };

    while normalized.starts_with("./") {
        normalized = match normalized {
            Cow::Borrowed(s) => Cow::Borrowed(&s[2..]),
            Cow::Owned(s) => Cow::Owned(s[2..].to_string()),
        };
    }

    normalized
}
