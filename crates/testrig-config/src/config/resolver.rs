use serde_json::Value;
use tracing::{debug, warn};

use testrig_selectors::{PatternSet, validate_pattern};
use testrig_utils::error::ConfigError;

use super::raw::describe;
use super::{DefaultTables, Environment, Field, PresetId, RawConfig, ResolvedConfig};

/// Turns a [`RawConfig`] into a [`ResolvedConfig`].
///
/// Resolution is a pure function of the record and the resolver's
/// [`DefaultTables`]: no file-system access, no retained state. Fields are
/// processed in [`Field::ALL`] order and the first invalid one is returned
/// as the error; nothing partial is ever produced.
///
/// Every field falls back to its default when absent. Exclusion lists use
/// replace semantics: a supplied list (even an empty one) is used as-is and
/// the built-in denylist is not merged in.
///
/// ```rust
/// use testrig_config::{ConfigResolver, Environment, RawConfig};
///
/// let raw = RawConfig::from_toml_str(r#"
/// preset = "ts-jest"
/// environment = "bun"
/// testExclusions = ["**/vendor/**"]
/// "#)?;
///
/// let config = ConfigResolver::new().resolve(&raw)?;
/// assert_eq!(config.preset().map(|p| p.as_str()), Some("ts-jest"));
/// assert_eq!(config.environment(), Environment::Bun);
/// assert_eq!(config.test_exclusions().to_vec(), vec!["**/vendor/**"]);
/// assert_eq!(config.coverage_exclusions().len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigResolver<'t> {
    tables: &'t DefaultTables,
}

impl ConfigResolver<'static> {
    /// Resolver backed by [`DefaultTables::BUILTIN`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tables: &DefaultTables::BUILTIN,
        }
    }
}

impl Default for ConfigResolver<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> ConfigResolver<'t> {
    #[must_use]
    pub const fn with_tables(tables: &'t DefaultTables) -> Self {
        Self { tables }
    }

    #[must_use]
    pub const fn tables(&self) -> &'t DefaultTables {
        self.tables
    }

    pub fn resolve(&self, raw: &RawConfig) -> Result<ResolvedConfig, ConfigError> {
        for key in raw.unknown_keys() {
            warn!(key, "ignoring unrecognized configuration key");
        }

        let preset = self.resolve_preset(raw.lookup(Field::Preset)?)?;
        let environment = self.resolve_environment(raw.lookup(Field::Environment)?)?;
        let test_exclusions = resolve_patterns(
            Field::TestExclusions,
            raw.lookup(Field::TestExclusions)?,
            self.tables.test_exclusions,
        )?;
        let coverage_exclusions = resolve_patterns(
            Field::CoverageExclusions,
            raw.lookup(Field::CoverageExclusions)?,
            self.tables.coverage_exclusions,
        )?;

        debug!(
            preset = preset.as_ref().map(PresetId::as_str),
            %environment,
            test_exclusions = test_exclusions.len(),
            coverage_exclusions = coverage_exclusions.len(),
            "resolved configuration"
        );

        Ok(ResolvedConfig {
            preset,
            environment,
            test_exclusions,
            coverage_exclusions,
        })
    }

    fn resolve_preset(&self, value: Option<&Value>) -> Result<Option<PresetId>, ConfigError> {
        let Some(value) = value else {
            debug!(field = %Field::Preset, "no preset; sources pass through untransformed");
            return Ok(None);
        };

        let Value::String(name) = value else {
            return Err(malformed(
                Field::Preset,
                format!("expected a string, found {}", describe(value)),
            ));
        };

        PresetId::parse(name)
            .map(Some)
            .map_err(|reason| malformed(Field::Preset, reason))
    }

    fn resolve_environment(&self, value: Option<&Value>) -> Result<Environment, ConfigError> {
        let Some(value) = value else {
            debug!(
                field = %Field::Environment,
                default = %self.tables.environment,
                "using default environment"
            );
            return Ok(self.tables.environment);
        };

        let Value::String(name) = value else {
            return Err(malformed(
                Field::Environment,
                format!("expected a string, found {}", describe(value)),
            ));
        };

        match name.parse::<Environment>() {
            Ok(environment) if self.tables.recognizes(environment) => Ok(environment),
            _ => Err(ConfigError::UnknownEnvironment {
                value: name.clone(),
            }),
        }
    }
}

/// Resolve a field using [`ConfigResolver::new`].
pub fn resolve(raw: &RawConfig) -> Result<ResolvedConfig, ConfigError> {
    ConfigResolver::new().resolve(raw)
}

fn resolve_patterns(
    field: Field,
    value: Option<&Value>,
    defaults: &[&str],
) -> Result<PatternSet, ConfigError> {
    let Some(value) = value else {
        debug!(field = %field, count = defaults.len(), "using default exclusions");
        return Ok(PatternSet::from_static(defaults));
    };

    let Value::Array(items) = value else {
        return Err(malformed(
            field,
            format!("expected a list of glob patterns, found {}", describe(value)),
        ));
    };

    let mut set = PatternSet::new();
    for (index, item) in items.iter().enumerate() {
        let invalid = |pattern: String, reason: String| ConfigError::InvalidPattern {
            field: field.key().to_string(),
            pattern,
            index,
            reason,
        };

        let Value::String(pattern) = item else {
            return Err(invalid(
                item.to_string(),
                format!("expected a string, found {}", describe(item)),
            ));
        };

        validate_pattern(pattern).map_err(|e| invalid(pattern.clone(), e.to_string()))?;

        if !set.insert(pattern.as_str()) {
            debug!(field = %field, pattern = %pattern, index, "dropping duplicate pattern");
        }
    }

    Ok(set)
}

fn malformed(field: Field, reason: String) -> ConfigError {
    ConfigError::MalformedField {
        field: field.key().to_string(),
        reason,
    }
}
