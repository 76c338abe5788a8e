//! CLI argument definitions and parsing structures
//!
//! This module defines the command-line interface structure using clap,
//! including the main `Cli` struct and all subcommand enums.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use testrig_config::{CONFIG_PATH_ENV, RawConfig};

/// testrig - test-harness configuration resolver
#[derive(Parser, Debug)]
#[command(name = "testrig")]
#[command(about = "Resolve test-harness configuration: presets, environments, and exclusion globs")]
#[command(long_about = r#"
testrig loads a test-harness configuration record, fills in defaults,
validates every field, and reports how each source file will be treated.

EXAMPLES:
  # Show the effective configuration and where each value came from
  testrig resolve

  # Same, as JSON
  testrig resolve --json

  # Classify files against the configuration
  testrig check src/__tests__/math.ts node_modules/pkg/index.js

  # Override the environment for one invocation
  testrig --environment jsdom resolve

  # List recognised environments
  testrig environments

CONFIGURATION:
  Configuration is loaded with precedence: CLI flags > config file > defaults
  The config file is discovered by searching upward from CWD for testrig.toml,
  testrig.json, testrig.yaml, or .testrig/config.toml, stopping at the
  repository root. Use --config or TESTRIG_CONFIG to name a file explicitly.
"#)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(long, global = true, env = CONFIG_PATH_ENV)]
    pub config: Option<PathBuf>,

    /// Transformation preset to apply to test sources
    #[arg(long, global = true)]
    pub preset: Option<String>,

    /// Execution environment for test files
    #[arg(long, global = true)]
    pub environment: Option<String>,

    /// Glob excluding paths from test discovery (repeatable; replaces the configured list)
    #[arg(long = "test-exclude", value_name = "GLOB", global = true)]
    pub test_exclude: Vec<String>,

    /// Glob excluding paths from coverage (repeatable; replaces the configured list)
    #[arg(long = "coverage-exclude", value_name = "GLOB", global = true)]
    pub coverage_exclude: Vec<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved configuration with the source of each value
    Resolve {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Report how each path is treated: test discovery, coverage, transform
    Check {
        /// Paths relative to the project root
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<Utf8PathBuf>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List recognised execution environments
    Environments,
}

impl Cli {
    /// Configuration layer built from the override flags.
    ///
    /// Only flags that were given produce keys, so an absent flag never
    /// masks the file. No validation happens here.
    #[must_use]
    pub fn overrides(&self) -> RawConfig {
        let mut builder = RawConfig::builder();
        if let Some(preset) = &self.preset {
            builder = builder.preset(preset.as_str());
        }
        if let Some(environment) = &self.environment {
            builder = builder.environment(environment);
        }
        if !self.test_exclude.is_empty() {
            builder = builder.test_exclusions(self.test_exclude.iter().cloned());
        }
        if !self.coverage_exclude.is_empty() {
            builder = builder.coverage_exclusions(self.coverage_exclude.iter().cloned());
        }
        builder.build()
    }
}

/// Build the clap command (for completions and docs).
#[must_use]
pub fn build_cli() -> clap::Command {
    <Cli as clap::CommandFactory>::command()
}
