//! Per-file decisions derived from a resolved configuration.
//!
//! A [`RunPlan`] compiles the matchers and looks the preset up once, then
//! answers three questions for each source path: is it a test file, is it
//! instrumented for coverage, and which preset transforms it.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tracing::{debug, trace};

use testrig_config::{ConfigError, Environment, ResolvedConfig};
use testrig_presets::{PresetRegistry, Transform};
use testrig_selectors::{DEFAULT_TEST_MATCH_PATTERNS, PathMatcher};
use testrig_utils::error::TestrigError;

/// How the harness treats one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDecision {
    pub path: Utf8PathBuf,
    /// Follows the test naming convention and is not excluded.
    pub is_test: bool,
    /// `testExclusions` entries that matched, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub test_excluded_by: Vec<String>,
    /// Collected for coverage.
    pub instrument: bool,
    /// `coverageExclusions` entries that matched, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub coverage_excluded_by: Vec<String>,
    /// Preset applied before execution; `None` when passed through.
    pub transform: Option<String>,
    pub environment: Environment,
}

/// Compiled view of a [`ResolvedConfig`] for classifying paths.
#[derive(Debug, Clone)]
pub struct RunPlan<'r> {
    environment: Environment,
    transform: Transform<'r>,
    test_match: PathMatcher,
    test_exclusions: PathMatcher,
    coverage_exclusions: PathMatcher,
}

impl<'r> RunPlan<'r> {
    /// # Errors
    ///
    /// `TestrigError::Preset` when the configured preset is not registered,
    /// `TestrigError::Config` if an exclusion pattern fails to compile.
    pub fn new(config: &ResolvedConfig, registry: &'r PresetRegistry) -> Result<Self, TestrigError> {
        let transform = registry.lookup(config.preset())?;
        let test_match = PathMatcher::from_patterns(DEFAULT_TEST_MATCH_PATTERNS.iter().copied())
            .map_err(|e| ConfigError::InvalidPattern {
                field: "testMatch".to_string(),
                pattern: e.pattern,
                index: e.index,
                reason: e.source.to_string(),
            })?;

        let plan = Self {
            environment: config.environment(),
            transform,
            test_match,
            test_exclusions: config.test_matcher()?,
            coverage_exclusions: config.coverage_matcher()?,
        };

        debug!(
            environment = %plan.environment,
            preset = plan.transform.preset_name(),
            test_exclusions = plan.test_exclusions.patterns().len(),
            coverage_exclusions = plan.coverage_exclusions.patterns().len(),
            "run plan ready"
        );
        Ok(plan)
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    #[must_use]
    pub fn transform(&self) -> Transform<'r> {
        self.transform
    }

    pub fn classify(&self, path: &Utf8Path) -> FileDecision {
        let test_excluded_by = owned(self.test_exclusions.matching_patterns(path));
        let coverage_excluded_by = owned(self.coverage_exclusions.matching_patterns(path));

        let is_test = test_excluded_by.is_empty() && self.test_match.is_match(path);
        let instrument = coverage_excluded_by.is_empty();
        let transform = self
            .transform
            .applies_to(path)
            .map(|preset| preset.name.clone());

        trace!(%path, is_test, instrument, transform = transform.as_deref(), "classified");

        FileDecision {
            path: path.to_path_buf(),
            is_test,
            test_excluded_by,
            instrument,
            coverage_excluded_by,
            transform,
            environment: self.environment,
        }
    }
}

fn owned(patterns: Vec<&str>) -> Vec<String> {
    patterns.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use testrig_config::{RawConfig, resolve};

    fn plan_for<'r>(raw: &RawConfig, registry: &'r PresetRegistry) -> RunPlan<'r> {
        RunPlan::new(&resolve(raw).unwrap(), registry).unwrap()
    }

    #[test]
    fn defaults_skip_dependencies_and_build_output() {
        let registry = PresetRegistry::builtin();
        let plan = plan_for(&RawConfig::new(), &registry);

        let vendored = plan.classify(Utf8Path::new("node_modules/pkg/index.test.js"));
        assert!(!vendored.is_test);
        assert!(!vendored.instrument);
        assert_eq!(vendored.test_excluded_by, vec!["**/node_modules/**"]);

        let test = plan.classify(Utf8Path::new("src/__tests__/math.ts"));
        assert!(test.is_test);
        assert!(test.instrument);
        assert_eq!(test.transform, None);
        assert_eq!(test.environment, Environment::Node);
    }

    #[test]
    fn non_test_sources_are_still_instrumented() {
        let registry = PresetRegistry::builtin();
        let plan = plan_for(&RawConfig::new(), &registry);

        let source = plan.classify(Utf8Path::new("src/math.ts"));
        assert!(!source.is_test);
        assert!(source.instrument);
        assert!(source.test_excluded_by.is_empty());
    }

    #[test]
    fn preset_transforms_only_handled_extensions() {
        let registry = PresetRegistry::builtin();
        let raw = RawConfig::builder().preset("ts-jest").build();
        let plan = plan_for(&raw, &registry);

        assert_eq!(
            plan.classify(Utf8Path::new("src/app.spec.tsx")).transform.as_deref(),
            Some("ts-jest")
        );
        assert_eq!(plan.classify(Utf8Path::new("src/app.spec.js")).transform, None);
    }

    #[test]
    fn unknown_preset_fails_plan_construction() {
        let registry = PresetRegistry::builtin();
        let raw = RawConfig::builder().preset("coffee-jest").build();
        let err = RunPlan::new(&resolve(&raw).unwrap(), &registry).unwrap_err();
        assert!(matches!(err, TestrigError::Preset(_)));
    }

    #[test]
    fn empty_coverage_exclusions_instrument_everything() {
        let registry = PresetRegistry::builtin();
        let raw = RawConfig::builder()
            .coverage_exclusions(Vec::<String>::new())
            .build();
        let plan = plan_for(&raw, &registry);

        let decision = plan.classify(Utf8Path::new("node_modules/pkg/index.js"));
        assert!(decision.instrument);
        assert!(decision.coverage_excluded_by.is_empty());
    }

    #[test]
    fn windows_separators_are_normalized() {
        let registry = PresetRegistry::builtin();
        let plan = plan_for(&RawConfig::new(), &registry);
        let decision = plan.classify(Utf8Path::new(r"packages\core\lib\index.test.js"));
        assert!(!decision.is_test);
        assert_eq!(decision.test_excluded_by, vec!["**/lib/**"]);
    }
}
