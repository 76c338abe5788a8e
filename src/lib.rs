//! testrig - configuration resolution for a JavaScript/TypeScript test harness
//!
//! A configuration record names a source-transformation preset, an execution
//! environment, and two exclusion glob lists: one for test discovery and one
//! for coverage. testrig loads that record from disk, layers command-line
//! overrides on top, fills in defaults, and validates everything in one pass.
//!
//! # Quick Start (CLI)
//!
//! ```bash
//! # Effective configuration with the source of each value
//! testrig resolve
//!
//! # How would these files be treated?
//! testrig check src/__tests__/math.ts node_modules/pkg/index.js --json
//! ```
//!
//! # Quick Start (Library)
//!
//! ```rust
//! use camino::Utf8Path;
//! use testrig::{PresetRegistry, RawConfig, RunPlan, resolve};
//!
//! let raw = RawConfig::from_json_str(r#"{
//!     "preset": "ts-jest",
//!     "testEnvironment": "bun",
//!     "testPathIgnorePatterns": ["**/node_modules/**", "**/lib/**"]
//! }"#)?;
//! let config = resolve(&raw)?;
//!
//! let registry = PresetRegistry::builtin();
//! let plan = RunPlan::new(&config, &registry)?;
//! let decision = plan.classify(Utf8Path::new("src/math.test.ts"));
//! assert!(decision.is_test);
//! assert_eq!(decision.transform.as_deref(), Some("ts-jest"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Crates
//!
//! - `testrig-config`: raw records, discovery, layering, resolution
//! - `testrig-selectors`: glob validation and path matching
//! - `testrig-presets`: preset registry
//! - `testrig-utils`: errors, exit codes, logging

pub mod cli;
pub mod plan;

pub use plan::{FileDecision, RunPlan};

pub use testrig_config::{
    ConfigError, ConfigErrorKind, ConfigResolver, ConfigSource, DefaultTables, EffectiveValue,
    Environment, Field, LayeredConfig, LoadError, PresetId, RawConfig, ResolvedConfig,
    effective_config, resolve,
};
pub use testrig_presets::{PresetDescriptor, PresetRegistry, Transform};
pub use testrig_selectors::{PathMatcher, PatternSet};
pub use testrig_utils::error::{PresetError, TestrigError, UserFriendlyError};
pub use testrig_utils::exit_codes::ExitCode;
