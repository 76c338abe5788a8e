use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use super::{ConfigSource, Field, RawConfig, RawConfigBuilder, ResolvedConfig};

/// Accumulates raw layers with per-field override and remembers which layer
/// supplied each field.
///
/// Layers are applied lowest precedence first:
///
/// ```rust
/// use testrig_config::{ConfigSource, Field, LayeredConfig, RawConfig};
///
/// let file = RawConfig::from_toml_str("testEnvironment = \"jsdom\"\npreset = \"ts-jest\"\n")?;
/// let cli = RawConfig::builder().environment("bun").build();
///
/// let layered = LayeredConfig::new()
///     .layer(&file, ConfigSource::Config)
///     .layer(&cli, ConfigSource::Cli);
///
/// assert_eq!(layered.source(Field::Environment), ConfigSource::Cli);
/// assert_eq!(layered.source(Field::Preset), ConfigSource::Config);
/// assert_eq!(layered.source(Field::TestExclusions), ConfigSource::Default);
/// assert!(layered.raw().get("testEnvironment").is_none());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayeredConfig {
    raw: RawConfig,
    sources: HashMap<Field, ConfigSource>,
}

impl LayeredConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay `layer` on top of what has been accumulated so far.
    ///
    /// A field the layer sets replaces the earlier value outright, under
    /// whichever spelling the layer used. Unknown keys are carried along.
    #[must_use]
    pub fn layer(mut self, layer: &RawConfig, source: ConfigSource) -> Self {
        for field in Field::ALL {
            if !layer.sets(field) {
                continue;
            }
            for spelling in field.spellings() {
                self.raw.remove(spelling);
            }
            for spelling in field.spellings() {
                if let Some(value) = layer.get(spelling).filter(|v| !v.is_null()) {
                    self.raw.insert(spelling, value.clone());
                }
            }
            debug!(field = %field, %source, "field supplied by layer");
            self.sources.insert(field, source);
        }

        for (key, value) in layer.iter() {
            if Field::from_key(key).is_none() {
                self.raw.insert(key, value.clone());
            }
        }

        self
    }

    /// Overlay a record assembled in code, attributed to
    /// [`ConfigSource::Programmatic`].
    ///
    /// Embedders place it between the file and CLI layers.
    #[must_use]
    pub fn programmatic(self, builder: RawConfigBuilder) -> Self {
        let raw = builder.build();
        self.layer(&raw, ConfigSource::Programmatic)
    }

    #[must_use]
    pub fn raw(&self) -> &RawConfig {
        &self.raw
    }

    #[must_use]
    pub fn into_raw(self) -> RawConfig {
        self.raw
    }

    /// Layer that supplied `field`, or `Default` when none did.
    #[must_use]
    pub fn source(&self, field: Field) -> ConfigSource {
        self.sources.get(&field).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn sources(&self) -> &HashMap<Field, ConfigSource> {
        &self.sources
    }
}

/// One row of the effective-configuration report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveValue {
    pub field: Field,
    pub value: String,
    pub source: ConfigSource,
}

/// Render every field of `config` along with the layer it came from.
///
/// Rows are returned in resolution order.
#[must_use]
pub fn effective_config(config: &ResolvedConfig, layers: &LayeredConfig) -> Vec<EffectiveValue> {
    Field::ALL
        .into_iter()
        .map(|field| {
            let value = match field {
                Field::Preset => config
                    .preset()
                    .map_or_else(|| "(none)".to_string(), ToString::to_string),
                Field::Environment => config.environment().to_string(),
                Field::TestExclusions => render_list(config.test_exclusions().iter()),
                Field::CoverageExclusions => render_list(config.coverage_exclusions().iter()),
            };
            EffectiveValue {
                field,
                value,
                source: layers.source(field),
            }
        })
        .collect()
}

fn render_list<'a>(patterns: impl Iterator<Item = &'a str>) -> String {
    let items: Vec<&str> = patterns.collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawConfig {
        RawConfig::from_value(value).unwrap()
    }

    #[test]
    fn later_layer_replaces_alias_spelling() {
        let file = raw(json!({ "testPathIgnorePatterns": ["a/**"], "bail": true }));
        let cli = raw(json!({ "testExclusions": ["b/**"] }));

        let layered = LayeredConfig::new()
            .layer(&file, ConfigSource::Config)
            .layer(&cli, ConfigSource::Cli);

        assert_eq!(layered.raw().get("testPathIgnorePatterns"), None);
        assert_eq!(layered.raw().get("testExclusions"), Some(&json!(["b/**"])));
        assert_eq!(layered.raw().get("bail"), Some(&json!(true)));
        assert_eq!(layered.source(Field::TestExclusions), ConfigSource::Cli);
    }

    #[test]
    fn builder_layer_is_attributed_to_programmatic() {
        let file = raw(json!({ "preset": "ts-jest", "testEnvironment": "jsdom" }));
        let cli = raw(json!({ "coverageExclusions": [] }));

        let layered = LayeredConfig::new()
            .layer(&file, ConfigSource::Config)
            .programmatic(RawConfig::builder().environment("happy-dom"))
            .layer(&cli, ConfigSource::Cli);

        assert_eq!(layered.source(Field::Preset), ConfigSource::Config);
        assert_eq!(layered.source(Field::Environment), ConfigSource::Programmatic);
        assert_eq!(layered.source(Field::TestExclusions), ConfigSource::Default);
        assert_eq!(layered.source(Field::CoverageExclusions), ConfigSource::Cli);
        assert_eq!(layered.raw().get("testEnvironment"), None);

        let rows = effective_config(&resolve(layered.raw()).unwrap(), &layered);
        assert_eq!(rows[1].value, "happy-dom");
        assert_eq!(rows[1].source.to_string(), "programmatic");
    }

    #[test]
    fn cli_layer_overrides_programmatic() {
        let layered = LayeredConfig::new()
            .programmatic(RawConfig::builder().preset("babel-jest"))
            .layer(&raw(json!({ "preset": "swc-jest" })), ConfigSource::Cli);

        assert_eq!(layered.raw().get("preset"), Some(&json!("swc-jest")));
        assert_eq!(layered.source(Field::Preset), ConfigSource::Cli);
    }

    #[test]
    fn null_in_layer_does_not_override() {
        let file = raw(json!({ "preset": "ts-jest" }));
        let cli = raw(json!({ "preset": null }));

        let layered = LayeredConfig::new()
            .layer(&file, ConfigSource::Config)
            .layer(&cli, ConfigSource::Cli);

        assert_eq!(layered.raw().get("preset"), Some(&json!("ts-jest")));
        assert_eq!(layered.source(Field::Preset), ConfigSource::Config);
    }

    #[test]
    fn effective_config_reports_sources_in_order() {
        let file = raw(json!({ "environment": "jsdom", "coverageExclusions": [] }));
        let layered = LayeredConfig::new().layer(&file, ConfigSource::Config);
        let resolved = resolve(layered.raw()).unwrap();

        let rows = effective_config(&resolved, &layered);
        let fields: Vec<Field> = rows.iter().map(|r| r.field).collect();
        assert_eq!(fields, Field::ALL.to_vec());

        assert_eq!(rows[0].value, "(none)");
        assert_eq!(rows[0].source, ConfigSource::Default);
        assert_eq!(rows[1].value, "jsdom");
        assert_eq!(rows[1].source, ConfigSource::Config);
        assert_eq!(rows[2].value, "[**/node_modules/**, **/lib/**]");
        assert_eq!(rows[3].value, "[]");
        assert_eq!(rows[3].source, ConfigSource::Config);
    }

    #[test]
    fn effective_values_serialize_with_labels() {
        let rows = effective_config(&ResolvedConfig::default(), &LayeredConfig::new());
        let json = serde_json::to_value(&rows[1]).unwrap();
        assert_eq!(
            json,
            json!({ "field": "environment", "value": "node", "source": "default" })
        );
    }
}
