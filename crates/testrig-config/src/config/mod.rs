//! Configuration management for testrig
//!
//! Configuration is layered with precedence CLI > programmatic > file >
//! defaults, then resolved in one pass. Supported file formats are TOML, JSON, and YAML;
//! all of them load into the same [`RawConfig`] shape.
//!
//! ```toml
//! preset = "ts-jest"
//! environment = "bun"
//! testExclusions = ["**/node_modules/**", "**/lib/**"]
//! coverageExclusions = ["**/node_modules/**", "**/lib/**"]
//! ```

mod builder;
mod discovery;
mod environment;
mod model;
mod raw;
mod resolver;
mod sources;

pub use builder::RawConfigBuilder;
pub use discovery::{
    CONFIG_FILE_NAMES, CONFIG_PATH_ENV, ConfigFile, discover, discover_config_file_from,
    discover_from, load_config_file,
};
pub use environment::Environment;
pub use model::{DefaultTables, PresetId, ResolvedConfig};
pub use raw::{ConfigFormat, NotATable, RawConfig};
pub use resolver::{ConfigResolver, resolve};
pub use sources::{EffectiveValue, LayeredConfig, effective_config};
pub use testrig_utils::types::ConfigSource;

use serde::{Serialize, Serializer};
use std::fmt;

/// The four fields a configuration record can set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Preset,
    Environment,
    TestExclusions,
    CoverageExclusions,
}

impl Field {
    /// Every field, in resolution order.
    pub const ALL: [Field; 4] = [
        Field::Preset,
        Field::Environment,
        Field::TestExclusions,
        Field::CoverageExclusions,
    ];

    /// Canonical key name.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Preset => "preset",
            Self::Environment => "environment",
            Self::TestExclusions => "testExclusions",
            Self::CoverageExclusions => "coverageExclusions",
        }
    }

    /// Alternative key names accepted on input (Jest-style spellings).
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Preset => &[],
            Self::Environment => &["testEnvironment"],
            Self::TestExclusions => &["testPathIgnorePatterns"],
            Self::CoverageExclusions => &["coveragePathIgnorePatterns"],
        }
    }

    /// Canonical key followed by aliases.
    pub fn spellings(self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.key()).chain(self.aliases().iter().copied())
    }

    /// Field a key belongs to, if any.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.spellings().any(|s| s == key))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}
