use serde::{Deserialize, Serialize};

/// Source of a configuration value.
///
/// Indicates where a configuration value originated from in the precedence chain:
/// CLI arguments > config file > programmatic overrides > built-in defaults.
///
/// # Serialization
///
/// Serializes to lowercase strings: `"cli"`, `"config"`, `"programmatic"`, `"default"`.
///
/// ```rust
/// use testrig_utils::types::ConfigSource;
///
/// let source = ConfigSource::Cli;
/// assert_eq!(serde_json::to_string(&source).unwrap(), r#""cli""#);
/// assert_eq!(source.to_string(), "cli");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
    strum::VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConfigSource {
    /// Value provided via CLI argument (highest precedence).
    Cli,
    /// Value loaded from a configuration file.
    Config,
    /// Value provided programmatically (e.g., `RawConfig::builder()`).
    Programmatic,
    /// Built-in default value (lowest precedence).
    #[default]
    Default,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::VariantNames;

    #[test]
    fn labels_match_serde_names() {
        for (variant, label) in [
            (ConfigSource::Cli, "cli"),
            (ConfigSource::Config, "config"),
            (ConfigSource::Programmatic, "programmatic"),
            (ConfigSource::Default, "default"),
        ] {
            assert_eq!(variant.as_ref(), label);
            assert_eq!(serde_json::to_value(variant).unwrap(), label);
        }
        assert_eq!(ConfigSource::VARIANTS.len(), 4);
    }
}
