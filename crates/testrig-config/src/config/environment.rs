use serde::{Deserialize, Serialize};

/// Simulated runtime context a test file executes under.
///
/// Names are lowercase kebab-case and match case-sensitively:
///
/// ```rust
/// use testrig_config::Environment;
///
/// assert_eq!("happy-dom".parse::<Environment>().unwrap(), Environment::HappyDom);
/// assert_eq!(Environment::Bun.to_string(), "bun");
/// assert!("Node".parse::<Environment>().is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::VariantNames,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Environment {
    /// Server-process runtime with no DOM.
    Node,
    /// Browser-like DOM emulation backed by jsdom.
    Jsdom,
    /// Lightweight browser-like DOM emulation.
    HappyDom,
    /// Bun runtime.
    Bun,
}

impl Environment {
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Node => "server-process runtime, no DOM",
            Self::Jsdom => "browser-like DOM emulation (jsdom)",
            Self::HappyDom => "lightweight browser-like DOM emulation (happy-dom)",
            Self::Bun => "Bun runtime",
        }
    }
}
