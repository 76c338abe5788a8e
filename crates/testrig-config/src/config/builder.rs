use serde_json::Value;

use super::{Field, RawConfig};

impl RawConfig {
    /// Create a builder for programmatic configuration.
    ///
    /// ```rust
    /// use testrig_config::{Environment, RawConfig, resolve};
    ///
    /// let raw = RawConfig::builder()
    ///     .preset("ts-jest")
    ///     .environment(Environment::Bun)
    ///     .test_exclusions(["**/node_modules/**", "**/lib/**"])
    ///     .build();
    ///
    /// let config = resolve(&raw).unwrap();
    /// assert_eq!(config.environment(), Environment::Bun);
    /// ```
    #[must_use]
    pub fn builder() -> RawConfigBuilder {
        RawConfigBuilder::new()
    }
}

/// Fluent construction of a [`RawConfig`] using canonical keys.
///
/// Nothing is validated until the record is resolved. Layered through
/// [`LayeredConfig::programmatic`](super::LayeredConfig::programmatic), every
/// field set here is attributed to `ConfigSource::Programmatic`.
#[derive(Debug, Clone, Default)]
pub struct RawConfigBuilder {
    raw: RawConfig,
}

impl RawConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn preset(mut self, name: impl Into<String>) -> Self {
        self.raw.insert(Field::Preset.key(), name.into());
        self
    }

    /// Accepts an [`Environment`](super::Environment) or any string, so
    /// unrecognised names surface from the resolver like file input does.
    #[must_use]
    pub fn environment(mut self, name: impl AsRef<str>) -> Self {
        self.raw.insert(Field::Environment.key(), name.as_ref());
        self
    }

    #[must_use]
    pub fn test_exclusions<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.raw.insert(Field::TestExclusions.key(), list(patterns));
        self
    }

    #[must_use]
    pub fn coverage_exclusions<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.raw.insert(Field::CoverageExclusions.key(), list(patterns));
        self
    }

    #[must_use]
    pub fn build(self) -> RawConfig {
        self.raw
    }
}

fn list<I, S>(patterns: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Value::Array(
        patterns
            .into_iter()
            .map(|p| Value::String(p.into()))
            .collect(),
    )
}
