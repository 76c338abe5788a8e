use std::path::{Path, PathBuf};
use tracing::debug;

use testrig_utils::error::LoadError;

use super::{ConfigFormat, RawConfig};

/// File names checked in each directory, first hit wins.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "testrig.toml",
    "testrig.json",
    "testrig.yaml",
    "testrig.yml",
    ".testrig/config.toml",
];

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "TESTRIG_CONFIG";

const REPO_ROOT_MARKERS: &[&str] = &[".git", ".hg", ".svn"];

/// A configuration record together with where it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    /// `None` when no file was found and the empty record is in use.
    pub path: Option<PathBuf>,
    pub raw: RawConfig,
}

impl RawConfig {
    /// Read and parse a configuration file, choosing the format from its
    /// extension.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        load_config_file(path)
    }
}

/// Walk upward from `start_dir` looking for a configuration file.
///
/// Stops after the first directory holding a repository marker (`.git`,
/// `.hg`, `.svn`) or at the file-system root.
#[must_use]
pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = Some(start_dir);

    while let Some(dir) = current {
        if let Some(found) = CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
        {
            return Some(found);
        }

        if REPO_ROOT_MARKERS.iter().any(|m| dir.join(m).exists()) {
            debug!(root = %dir.display(), "reached repository root without a config file");
            break;
        }

        current = dir.parent();
    }

    None
}

pub fn load_config_file(path: &Path) -> Result<RawConfig, LoadError> {
    let format = ConfigFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let raw = RawConfig::parse(&content, format, path)?;
    debug!(path = %path.display(), keys = raw.len(), "loaded configuration file");
    Ok(raw)
}

/// Locate and load configuration relative to `start_dir`.
///
/// An `explicit` path must exist; relative paths are taken from
/// `start_dir`. Without one, the upward search is used, and finding
/// nothing yields an empty record.
pub fn discover_from(start_dir: &Path, explicit: Option<&Path>) -> Result<ConfigFile, LoadError> {
    let path = match explicit {
        Some(path) if path.is_relative() => Some(start_dir.join(path)),
        Some(path) => Some(path.to_path_buf()),
        None => discover_config_file_from(start_dir),
    };

    let Some(path) = path else {
        debug!(start = %start_dir.display(), "no configuration file found; using defaults");
        return Ok(ConfigFile::default());
    };

    let raw = load_config_file(&path)?;
    Ok(ConfigFile {
        path: Some(path),
        raw,
    })
}

/// Locate and load configuration from the current directory.
///
/// `explicit` takes precedence over [`CONFIG_PATH_ENV`].
pub fn discover(explicit: Option<&Path>) -> Result<ConfigFile, LoadError> {
    let cwd = std::env::current_dir().map_err(|source| LoadError::Io {
        path: PathBuf::from("."),
        source,
    })?;

    let from_env = std::env::var_os(CONFIG_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);

    discover_from(&cwd, explicit.or(from_env.as_deref()))
}
