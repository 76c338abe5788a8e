//! State shared by the configuration-consuming commands.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use testrig_config::{ConfigSource, LayeredConfig, RawConfig, ResolvedConfig, discover, resolve};
use testrig_utils::error::TestrigError;

/// Configuration loaded, layered, and resolved for one invocation.
#[derive(Debug, Clone)]
pub struct Session {
    /// File the configuration came from, if any.
    pub config_file: Option<PathBuf>,
    pub layers: LayeredConfig,
    pub config: ResolvedConfig,
}

impl Session {
    /// Discover the configuration file, put `overrides` on top, and resolve.
    pub fn load(explicit: Option<&Path>, overrides: &RawConfig) -> Result<Self, TestrigError> {
        let file = discover(explicit)?;
        match &file.path {
            Some(path) => info!(path = %path.display(), "using configuration file"),
            None => debug!("no configuration file; using defaults"),
        }

        Self::from_layers(file.path, &file.raw, overrides)
    }

    /// Layer an already-loaded file record and CLI overrides, then resolve.
    pub fn from_layers(
        config_file: Option<PathBuf>,
        file: &RawConfig,
        overrides: &RawConfig,
    ) -> Result<Self, TestrigError> {
        let layers = LayeredConfig::new()
            .layer(file, ConfigSource::Config)
            .layer(overrides, ConfigSource::Cli);
        Self::from_layered(config_file, layers)
    }

    /// Resolve layers assembled by the caller, for embedders that add a
    /// programmatic layer of their own.
    pub fn from_layered(
        config_file: Option<PathBuf>,
        layers: LayeredConfig,
    ) -> Result<Self, TestrigError> {
        let config = resolve(layers.raw())?;

        Ok(Self {
            config_file,
            layers,
            config,
        })
    }
}
