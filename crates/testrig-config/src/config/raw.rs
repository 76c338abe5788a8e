use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

use testrig_utils::error::{ConfigError, LoadError};

use super::Field;

/// Supported on-disk representations of a configuration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick a format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// A document whose top level is not a table of settings.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("top level must be a table of settings, found {found}")]
pub struct NotATable {
    pub found: &'static str,
}

/// Untrusted configuration record: an unordered key-value mapping of
/// arbitrary shape.
///
/// Nothing is validated on construction; [`ConfigResolver`](super::ConfigResolver)
/// does all checking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawConfig(Map<String, Value>);

impl RawConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Build from any JSON value; only objects are records.
    pub fn from_value(value: Value) -> Result<Self, NotATable> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(NotATable {
                found: describe(&other),
            }),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, LoadError> {
        Self::parse(content, ConfigFormat::Toml, Path::new("<inline>"))
    }

    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        Self::parse(content, ConfigFormat::Json, Path::new("<inline>"))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, LoadError> {
        Self::parse(content, ConfigFormat::Yaml, Path::new("<inline>"))
    }

    /// Parse `content` in the given format. `origin` is only used in errors.
    ///
    /// A blank document is an empty record in every format.
    pub fn parse(content: &str, format: ConfigFormat, origin: &Path) -> Result<Self, LoadError> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        let invalid = |reason: String| LoadError::InvalidFile {
            path: PathBuf::from(origin),
            reason,
        };

        let value: Value = match format {
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| invalid(e.to_string()))?,
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| invalid(e.to_string()))?
            }
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| invalid(e.to_string()))?
            }
        };

        Self::from_value(value).map_err(|e| invalid(e.to_string()))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Whether the record sets `field` under any spelling. A JSON `null`
    /// counts as unset.
    #[must_use]
    pub fn sets(&self, field: Field) -> bool {
        field
            .spellings()
            .any(|key| self.get(key).is_some_and(|v| !v.is_null()))
    }

    /// Value for `field` under its canonical key or one alias.
    ///
    /// # Errors
    ///
    /// `MalformedField` when more than one spelling is present, since the
    /// record is then ambiguous.
    pub fn lookup(&self, field: Field) -> Result<Option<&Value>, ConfigError> {
        let mut found: Option<(&str, &Value)> = None;
        for key in field.spellings() {
            let Some(value) = self.get(key).filter(|v| !v.is_null()) else {
                continue;
            };
            if let Some((first, _)) = found {
                return Err(ConfigError::MalformedField {
                    field: field.key().to_string(),
                    reason: format!("set both as '{first}' and as '{key}'"),
                });
            }
            found = Some((key, value));
        }
        Ok(found.map(|(_, value)| value))
    }

    /// Keys that belong to no known field.
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.keys().filter(|key| Field::from_key(key).is_none())
    }
}

impl From<Map<String, Value>> for RawConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Short human description of a JSON value's shape, for error messages.
pub(super) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a table",
    }
}
