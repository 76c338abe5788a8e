//! Property-based tests for configuration resolution
//!
//! Property test case counts can be configured via environment variables:
//!
//! - `PROPTEST_CASES`: Number of test cases per property (default: 64)
//! - `PROPTEST_MAX_SHRINK_ITERS`: Max shrinking iterations on failure (default: 1000)

use proptest::prelude::*;
use serde_json::{Value, json};
use std::env;
use strum::{IntoEnumIterator, VariantNames};

use testrig_config::{ConfigError, Environment, RawConfig, ResolvedConfig, resolve};

const DEFAULT_PROPTEST_CASES: u32 = 64;
const DEFAULT_MAX_SHRINK_ITERS: u32 = 1000;

fn proptest_config() -> ProptestConfig {
    let cases = env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_PROPTEST_CASES);

    let max_shrink_iters = env::var("PROPTEST_MAX_SHRINK_ITERS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_MAX_SHRINK_ITERS);

    ProptestConfig {
        cases,
        max_shrink_iters,
        ..ProptestConfig::default()
    }
}

/// Well-formed glob patterns such as `**/vendor/*.js` or `src/a-b/**`.
fn arb_pattern() -> impl Strategy<Value = String> {
    (
        prop::bool::ANY,
        prop::collection::vec("[a-z][a-z0-9_-]{0,7}", 1..4),
        prop_oneof![Just(""), Just("/**"), Just("/*.js"), Just("/*.{ts,tsx}")],
    )
        .prop_map(|(anchored, segments, tail)| {
            let prefix = if anchored { "" } else { "**/" };
            format!("{prefix}{}{tail}", segments.join("/"))
        })
}

fn arb_patterns() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_pattern(), 0..8)
}

fn arb_environment() -> impl Strategy<Value = Environment> {
    prop::sample::select(Environment::iter().collect::<Vec<_>>())
}

fn arb_unrecognized_environment() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z_-]{0,15}".prop_filter("must not name a known environment", |s| {
        !Environment::VARIANTS.contains(&s.as_str())
    })
}

fn arb_malformed_pattern() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("src/{a,b".to_string()),
        Just("[abc".to_string()),
        Just("   ".to_string()),
        Just(String::new()),
        "[a-z]{1,6}".prop_map(|s| format!("{s}/[")),
    ]
}

fn arb_raw() -> impl Strategy<Value = RawConfig> {
    (
        prop::option::of(prop_oneof![
            Just("ts-jest".to_string()),
            Just("babel-jest".to_string()),
            "[a-z][a-z-]{0,10}"
        ]),
        prop::option::of(arb_environment()),
        prop::option::of(arb_patterns()),
        prop::option::of(arb_patterns()),
    )
        .prop_map(|(preset, environment, tests, coverage)| {
            let mut raw = RawConfig::new();
            if let Some(preset) = preset {
                raw.insert("preset", preset);
            }
            if let Some(environment) = environment {
                raw.insert("environment", environment.to_string());
            }
            if let Some(tests) = tests {
                raw.insert("testExclusions", tests);
            }
            if let Some(coverage) = coverage {
                raw.insert("coverageExclusions", coverage);
            }
            raw
        })
}

fn sorted_unique(patterns: &[String]) -> Vec<String> {
    let mut out = patterns.to_vec();
    out.sort();
    out.dedup();
    out
}

#[test]
fn prop_resolution_is_idempotent() {
    proptest!(proptest_config(), |(raw in arb_raw())| {
        let first = resolve(&raw).unwrap();
        let second = resolve(&first.to_raw()).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.test_exclusions().to_vec(), second.test_exclusions().to_vec());
    });
}

#[test]
fn prop_recognized_environments_resolve_verbatim() {
    proptest!(proptest_config(), |(environment in arb_environment())| {
        let raw = RawConfig::from_value(json!({ "environment": environment.to_string() })).unwrap();
        prop_assert_eq!(resolve(&raw).unwrap().environment(), environment);
    });
}

#[test]
fn prop_unrecognized_environments_fail() {
    proptest!(proptest_config(), |(name in arb_unrecognized_environment())| {
        let raw = RawConfig::from_value(json!({ "testEnvironment": name.clone() })).unwrap();
        prop_assert_eq!(
            resolve(&raw).unwrap_err(),
            ConfigError::UnknownEnvironment { value: name }
        );
    });
}

#[test]
fn prop_valid_patterns_are_preserved_without_defaults() {
    proptest!(proptest_config(), |(tests in arb_patterns(), coverage in arb_patterns())| {
        let raw = RawConfig::builder()
            .test_exclusions(tests.clone())
            .coverage_exclusions(coverage.clone())
            .build();
        let resolved = resolve(&raw).unwrap();

        let mut got_tests = resolved.test_exclusions().to_vec();
        got_tests.sort();
        let mut got_coverage = resolved.coverage_exclusions().to_vec();
        got_coverage.sort();

        prop_assert_eq!(got_tests, sorted_unique(&tests));
        prop_assert_eq!(got_coverage, sorted_unique(&coverage));
    });
}

#[test]
fn prop_first_occurrence_order_is_kept() {
    proptest!(proptest_config(), |(patterns in arb_patterns())| {
        let raw = RawConfig::builder().test_exclusions(patterns.clone()).build();
        let resolved = resolve(&raw).unwrap();

        let mut expected: Vec<String> = Vec::new();
        for p in patterns {
            if !expected.contains(&p) {
                expected.push(p);
            }
        }
        prop_assert_eq!(resolved.test_exclusions().to_vec(), expected);
    });
}

#[test]
fn prop_malformed_pattern_reports_its_index() {
    proptest!(
        proptest_config(),
        |(mut patterns in arb_patterns(), bad in arb_malformed_pattern(), at in any::<prop::sample::Index>())| {
            let index = at.index(patterns.len() + 1);
            patterns.insert(index, bad.clone());

            let raw = RawConfig::from_value(json!({ "coverageExclusions": patterns })).unwrap();
            match resolve(&raw).unwrap_err() {
                ConfigError::InvalidPattern { field, pattern, index: reported, .. } => {
                    prop_assert_eq!(field, "coverageExclusions");
                    prop_assert_eq!(pattern, bad);
                    prop_assert_eq!(reported, index);
                }
                other => prop_assert!(false, "unexpected error: {other:?}"),
            }
        }
    );
}

#[test]
fn prop_unknown_keys_never_change_the_result() {
    proptest!(
        proptest_config(),
        |(raw in arb_raw(), extra in "[a-z]{3,10}", value in any::<i64>())| {
            prop_assume!(testrig_config::Field::from_key(&extra).is_none());

            let mut noisy = raw.clone();
            noisy.insert(extra, Value::from(value));
            prop_assert_eq!(resolve(&raw).unwrap(), resolve(&noisy).unwrap());
        }
    );
}

#[test]
fn empty_record_equals_baseline() {
    assert_eq!(resolve(&RawConfig::new()).unwrap(), ResolvedConfig::default());
}
