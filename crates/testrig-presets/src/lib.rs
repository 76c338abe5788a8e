//! Source-transformation presets for testrig
//!
//! The configuration layer only checks that a preset *name* is well formed.
//! Whether the name refers to something the pipeline can run is answered
//! here, by [`PresetRegistry::lookup`].
//!
//! ```rust
//! use testrig_config::PresetId;
//! use testrig_presets::{PresetRegistry, Transform};
//!
//! let registry = PresetRegistry::builtin();
//!
//! assert_eq!(registry.lookup(None).unwrap(), Transform::Passthrough);
//!
//! let ts = PresetId::parse("ts-jest").unwrap();
//! let transform = registry.lookup(Some(&ts)).unwrap();
//! assert_eq!(transform.preset_name(), Some("ts-jest"));
//!
//! let missing = PresetId::parse("coffee-jest").unwrap();
//! assert!(registry.lookup(Some(&missing)).is_err());
//! ```

use camino::Utf8Path;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use testrig_config::PresetId;
use testrig_utils::error::PresetError;

/// A named transformation and the source extensions it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetDescriptor {
    pub name: String,
    /// Extensions without the leading dot, e.g. `tsx`.
    pub extensions: Vec<String>,
    pub description: String,
}

impl PresetDescriptor {
    pub fn new<I, S>(name: impl Into<String>, extensions: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            extensions: extensions.into_iter().map(Into::into).collect(),
            description: description.into(),
        }
    }

    /// Whether this preset transforms `path`, judged by extension.
    #[must_use]
    pub fn handles(&self, path: &Utf8Path) -> bool {
        path.extension()
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

/// What the pipeline does to sources before execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform<'r> {
    /// No preset configured; sources run as written.
    Passthrough,
    Preset(&'r PresetDescriptor),
}

impl<'r> Transform<'r> {
    /// Preset that applies to `path`, if any.
    #[must_use]
    pub fn applies_to(&self, path: &Utf8Path) -> Option<&'r PresetDescriptor> {
        match *self {
            Self::Passthrough => None,
            Self::Preset(descriptor) => descriptor.handles(path).then_some(descriptor),
        }
    }

    #[must_use]
    pub fn preset_name(&self) -> Option<&'r str> {
        match *self {
            Self::Passthrough => None,
            Self::Preset(descriptor) => Some(descriptor.name.as_str()),
        }
    }
}

/// Set of presets the pipeline knows how to run.
#[derive(Debug, Clone, Default)]
pub struct PresetRegistry {
    presets: BTreeMap<String, PresetDescriptor>,
}

impl PresetRegistry {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding `ts-jest`, `babel-jest` and `swc-jest`.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(PresetDescriptor::new(
            "ts-jest",
            ["ts", "tsx", "mts", "cts"],
            "TypeScript compiled with the TypeScript compiler",
        ));
        registry.register(PresetDescriptor::new(
            "babel-jest",
            ["js", "jsx", "mjs", "cjs"],
            "JavaScript transformed with Babel",
        ));
        registry.register(PresetDescriptor::new(
            "swc-jest",
            ["js", "jsx", "ts", "tsx"],
            "JavaScript and TypeScript transformed with SWC",
        ));
        registry
    }

    /// Add or replace a preset. Returns the descriptor it displaced.
    pub fn register(&mut self, descriptor: PresetDescriptor) -> Option<PresetDescriptor> {
        debug!(preset = %descriptor.name, "registering preset");
        self.presets.insert(descriptor.name.clone(), descriptor)
    }

    /// Resolve a configured preset name.
    ///
    /// # Errors
    ///
    /// `PresetError::NotFound` when `preset` names nothing registered.
    pub fn lookup(&self, preset: Option<&PresetId>) -> Result<Transform<'_>, PresetError> {
        let Some(id) = preset else {
            return Ok(Transform::Passthrough);
        };

        self.presets
            .get(id.as_str())
            .map(Transform::Preset)
            .ok_or_else(|| PresetError::NotFound {
                name: id.to_string(),
                known: self.names().map(str::to_string).collect(),
            })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PresetDescriptor> {
        self.presets.get(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PresetDescriptor> {
        self.presets.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
