use serde::{Deserialize, Serialize};
use std::fmt;

use testrig_selectors::{DEFAULT_EXCLUDE_PATTERNS, PathMatcher, PatternSet};
use testrig_utils::error::ConfigError;

use super::{Environment, Field, RawConfig};

/// Name of a source-transformation preset, e.g. `ts-jest`.
///
/// Only the shape is checked here. Whether a preset with this name exists is
/// decided by the transformation pipeline's registry on first use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PresetId(String);

impl PresetId {
    /// Check that `name` is a usable identifier: non-empty, no surrounding
    /// whitespace, no control characters.
    pub fn parse(name: &str) -> Result<Self, String> {
        if name.is_empty() {
            return Err("preset name must not be empty".to_string());
        }
        if name.trim() != name {
            return Err(format!("preset name '{name}' has surrounding whitespace"));
        }
        if name.chars().any(char::is_control) {
            return Err("preset name contains control characters".to_string());
        }
        Ok(Self(name.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PresetId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PresetId> for String {
    fn from(id: PresetId) -> Self {
        id.0
    }
}

impl AsRef<str> for PresetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Harness-defined constants the resolver falls back on.
///
/// Passed to [`ConfigResolver::with_tables`](super::ConfigResolver::with_tables)
/// explicitly; [`DefaultTables::BUILTIN`] is what the CLI uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultTables {
    /// Environments the harness accepts.
    pub environments: &'static [Environment],
    /// Environment used when the record does not name one.
    pub environment: Environment,
    /// Test-discovery denylist used when `testExclusions` is absent.
    pub test_exclusions: &'static [&'static str],
    /// Coverage denylist used when `coverageExclusions` is absent.
    pub coverage_exclusions: &'static [&'static str],
}

impl DefaultTables {
    pub const BUILTIN: DefaultTables = DefaultTables {
        environments: &[
            Environment::Node,
            Environment::Jsdom,
            Environment::HappyDom,
            Environment::Bun,
        ],
        environment: Environment::Node,
        test_exclusions: DEFAULT_EXCLUDE_PATTERNS,
        coverage_exclusions: DEFAULT_EXCLUDE_PATTERNS,
    };

    #[must_use]
    pub fn recognizes(&self, environment: Environment) -> bool {
        self.environments.contains(&environment)
    }

    /// The record produced when every field is omitted.
    #[must_use]
    pub fn baseline(&self) -> ResolvedConfig {
        ResolvedConfig {
            preset: None,
            environment: self.environment,
            test_exclusions: PatternSet::from_static(self.test_exclusions),
            coverage_exclusions: PatternSet::from_static(self.coverage_exclusions),
        }
    }
}

impl Default for DefaultTables {
    fn default() -> Self {
        Self::BUILTIN
    }
}

/// Fully defaulted, validated configuration for one test run.
///
/// Instances only come out of [`ConfigResolver`](super::ConfigResolver) and
/// expose no mutators, so one value can be shared across every worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) preset: Option<PresetId>,
    pub(super) environment: Environment,
    pub(super) test_exclusions: PatternSet,
    pub(super) coverage_exclusions: PatternSet,
}

impl ResolvedConfig {
    /// Transformation preset; `None` means sources pass through unmodified.
    #[must_use]
    pub fn preset(&self) -> Option<&PresetId> {
        self.preset.as_ref()
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    #[must_use]
    pub fn test_exclusions(&self) -> &PatternSet {
        &self.test_exclusions
    }

    #[must_use]
    pub fn coverage_exclusions(&self) -> &PatternSet {
        &self.coverage_exclusions
    }

    /// Re-serialize to a raw record with canonical keys.
    ///
    /// Resolving the result yields a configuration equal to `self`.
    #[must_use]
    pub fn to_raw(&self) -> RawConfig {
        let mut raw = RawConfig::new();
        if let Some(preset) = &self.preset {
            raw.insert(Field::Preset.key(), preset.as_str());
        }
        raw.insert(Field::Environment.key(), self.environment.to_string());
        raw.insert(Field::TestExclusions.key(), self.test_exclusions.to_vec());
        raw.insert(
            Field::CoverageExclusions.key(),
            self.coverage_exclusions.to_vec(),
        );
        raw
    }

    /// Compile `testExclusions` for file discovery.
    pub fn test_matcher(&self) -> Result<PathMatcher, ConfigError> {
        compile(Field::TestExclusions, &self.test_exclusions)
    }

    /// Compile `coverageExclusions` for the coverage collector.
    pub fn coverage_matcher(&self) -> Result<PathMatcher, ConfigError> {
        compile(Field::CoverageExclusions, &self.coverage_exclusions)
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        DefaultTables::BUILTIN.baseline()
    }
}

fn compile(field: Field, set: &PatternSet) -> Result<PathMatcher, ConfigError> {
    PathMatcher::new(set).map_err(|e| ConfigError::InvalidPattern {
        field: field.key().to_string(),
        pattern: e.pattern,
        index: e.index,
        reason: e.source.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;

    #[test]
    fn preset_id_rejects_bad_names() {
        assert!(PresetId::parse("ts-jest").is_ok());
        assert!(PresetId::parse("@scope/preset").is_ok());
        assert!(PresetId::parse("").is_err());
        assert!(PresetId::parse(" ts-jest").is_err());
        assert!(PresetId::parse("ts\tjest").is_err());
    }

    #[test]
    fn baseline_matches_builtin_tables() {
        let baseline = ResolvedConfig::default();
        assert_eq!(baseline.preset(), None);
        assert_eq!(baseline.environment(), Environment::Node);
        assert_eq!(
            baseline.test_exclusions().to_vec(),
            vec!["**/node_modules/**", "**/lib/**"]
        );
        assert_eq!(baseline.coverage_exclusions(), baseline.test_exclusions());
    }

    #[test]
    fn to_raw_uses_canonical_keys() {
        let raw = ResolvedConfig::default().to_raw();
        let mut keys: Vec<_> = raw.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["coverageExclusions", "environment", "testExclusions"]);
    }

    #[test]
    fn matchers_compile_from_defaults() {
        let config = ResolvedConfig::default();
        assert!(config.test_matcher().unwrap().is_match(Utf8Path::new("node_modules/a.js")));
        assert!(!config.coverage_matcher().unwrap().is_match(Utf8Path::new("src/a.js")));
    }
}
