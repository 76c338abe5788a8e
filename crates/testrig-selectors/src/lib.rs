//! Path-glob exclusion patterns for testrig.
//!
//! - [`validate_pattern`] checks a single pattern's syntax
//! - [`PatternSet`] holds an ordered, deduplicated list of patterns
//! - [`PathMatcher`] compiles a set into a `globset::GlobSet` for matching

mod matcher;
mod pattern;
mod set;

pub use matcher::{CompileError, PathMatcher, normalize_path};
pub use pattern::{PatternError, compile_glob, glob_source, validate_pattern};
pub use set::PatternSet;

/// Built-in denylist applied to both test discovery and coverage
/// instrumentation when the configuration does not supply its own list.
///
/// - `**/node_modules/**` - installed dependency trees
/// - `**/lib/**` - compiled build output
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["**/node_modules/**", "**/lib/**"];

/// Conventional test file naming: anything under a `__tests__` directory, or
/// files named `*.spec.*` / `*.test.*` with a script extension.
pub const DEFAULT_TEST_MATCH_PATTERNS: &[&str] = &[
    "**/__tests__/**/*.{js,jsx,ts,tsx,mjs,cjs,mts,cts}",
    "**/*.{spec,test}.{js,jsx,ts,tsx,mjs,cjs,mts,cts}",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_are_valid_globs() {
        for pattern in DEFAULT_EXCLUDE_PATTERNS
            .iter()
            .chain(DEFAULT_TEST_MATCH_PATTERNS)
        {
            assert!(validate_pattern(pattern).is_ok(), "{pattern}");
        }
    }
}
