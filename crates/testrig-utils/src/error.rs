use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Library-level error type with rich context and user-friendly reporting.
///
/// `TestrigError` is the primary error type returned by testrig library operations.
/// It provides:
/// - Detailed error information for programmatic handling
/// - User-friendly messages with context and suggestions
/// - Mapping to CLI exit codes for consistent error reporting
///
/// # Error Categories
///
/// | Category | Description |
/// |----------|-------------|
/// | `Config` | A raw configuration record failed resolution |
/// | `Load` | A configuration file could not be found, read, or parsed |
/// | `Preset` | A named preset is not known to the transformation pipeline |
///
/// # Exit Code Mapping
///
/// Use [`to_exit_code()`](Self::to_exit_code) to map errors to CLI exit codes:
///
/// | Exit Code | Error Type |
/// |-----------|------------|
/// | 2 | Configuration resolution errors |
/// | 3 | Configuration file load errors |
/// | 4 | Preset not found |
/// | 1 | Other errors |
///
/// ```rust
/// use testrig_utils::error::{ConfigError, TestrigError};
/// use testrig_utils::exit_codes::ExitCode;
///
/// let err = TestrigError::from(ConfigError::UnknownEnvironment {
///     value: "sandboxed-runtime".to_string(),
/// });
/// assert_eq!(err.to_exit_code(), ExitCode::CONFIG);
/// assert!(err.display_for_user().contains("sandboxed-runtime"));
/// ```
///
/// Library code returns `TestrigError` and does NOT call `std::process::exit()`.
#[derive(Error, Debug)]
pub enum TestrigError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Configuration load error: {0}")]
    Load(#[from] LoadError),

    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for providing user-friendly error reporting with context and suggestions
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get contextual information about the error
    fn context(&self) -> Option<String>;

    /// Get suggested actions to resolve the error
    fn suggestions(&self) -> Vec<String>;

    /// Get the error category for grouping similar errors
    fn category(&self) -> ErrorCategory;
}

/// Categories of errors for better organization and handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    FileSystem,
    Transformation,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::FileSystem => write!(f, "File System"),
            Self::Transformation => write!(f, "Transformation"),
        }
    }
}

/// Discriminant of a [`ConfigError`], for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigErrorKind {
    UnknownEnvironment,
    InvalidPattern,
    MalformedField,
}

/// Errors raised while resolving a raw configuration record.
///
/// Resolution is fail-fast: the first offending field is reported and no
/// partial configuration is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown environment '{value}'")]
    UnknownEnvironment { value: String },

    #[error("Invalid glob pattern '{pattern}' at {field}[{index}]: {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        index: usize,
        reason: String,
    },

    #[error("Malformed field '{field}': {reason}")]
    MalformedField { field: String, reason: String },
}

impl ConfigError {
    #[must_use]
    pub const fn kind(&self) -> ConfigErrorKind {
        match self {
            Self::UnknownEnvironment { .. } => ConfigErrorKind::UnknownEnvironment,
            Self::InvalidPattern { .. } => ConfigErrorKind::InvalidPattern,
            Self::MalformedField { .. } => ConfigErrorKind::MalformedField,
        }
    }
}

impl UserFriendlyError for ConfigError {
    fn user_message(&self) -> String {
        match self {
            Self::UnknownEnvironment { value } => {
                format!("Test environment '{value}' is not recognized")
            }
            Self::InvalidPattern {
                field,
                pattern,
                index,
                reason,
            } => {
                format!("Entry {index} of '{field}' is not a valid glob pattern ('{pattern}'): {reason}")
            }
            Self::MalformedField { field, reason } => {
                format!("Configuration '{field}' has the wrong shape: {reason}")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::UnknownEnvironment { .. } => Some(
                "The environment selects the simulated runtime every test file executes under."
                    .to_string(),
            ),
            Self::InvalidPattern { .. } => Some(
                "Exclusion lists replace the built-in defaults, so one malformed entry invalidates the whole list."
                    .to_string(),
            ),
            Self::MalformedField { .. } => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownEnvironment { .. } => vec![
                "Run 'testrig environments' to list the recognized environments".to_string(),
                "Remove the 'environment' key to use the default".to_string(),
            ],
            Self::InvalidPattern { .. } => vec![
                "Check that every '[' and '{' in the pattern is closed".to_string(),
                "Use '**/name/**' to exclude a directory tree".to_string(),
            ],
            Self::MalformedField { field, .. } => match field.as_str() {
                "preset" => vec!["Set 'preset' to a non-empty name such as \"ts-jest\"".to_string()],
                "environment" => vec!["Set 'environment' to a string such as \"node\"".to_string()],
                _ => vec![format!("Set '{field}' to a list of glob strings")],
            },
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }
}

/// Errors raised while locating, reading, or parsing a configuration file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Configuration file not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Invalid configuration file {}: {reason}", path.display())]
    InvalidFile { path: PathBuf, reason: String },

    #[error("Unsupported configuration format for {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl UserFriendlyError for LoadError {
    fn user_message(&self) -> String {
        match self {
            Self::NotFound { path } => format!("Configuration file not found: {}", path.display()),
            Self::InvalidFile { path, reason } => {
                format!("Configuration file {} has invalid format: {reason}", path.display())
            }
            Self::UnsupportedFormat { path } => {
                format!("Cannot tell the format of {}", path.display())
            }
            Self::Io { path, source } => format!("Could not read {}: {source}", path.display()),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::NotFound { .. } | Self::Io { .. } => Some(
                "testrig searches for testrig.toml, testrig.json, testrig.yaml, or .testrig/config.toml from the current directory upward."
                    .to_string(),
            ),
            Self::InvalidFile { .. } => {
                Some("The top level of a configuration file must be a key-value table.".to_string())
            }
            Self::UnsupportedFormat { .. } => {
                Some("The format is chosen from the file extension.".to_string())
            }
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotFound { .. } => vec![
                "Check the path passed to --config or TESTRIG_CONFIG".to_string(),
                "Omit --config to fall back to discovery and defaults".to_string(),
            ],
            Self::InvalidFile { .. } => vec!["Validate the file syntax".to_string()],
            Self::UnsupportedFormat { .. } => {
                vec!["Use a .toml, .json, .yaml, or .yml extension".to_string()]
            }
            Self::Io { .. } => vec!["Check file permissions".to_string()],
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::FileSystem
    }
}

/// Errors raised by the transformation-pipeline preset lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    #[error("Preset '{name}' not found")]
    NotFound { name: String, known: Vec<String> },
}

impl UserFriendlyError for PresetError {
    fn user_message(&self) -> String {
        match self {
            Self::NotFound { name, .. } => format!("No transformation preset named '{name}'"),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::NotFound { known, .. } if !known.is_empty() => {
                Some(format!("Known presets: {}", known.join(", ")))
            }
            Self::NotFound { .. } => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        vec!["Remove 'preset' to run test sources untransformed".to_string()]
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Transformation
    }
}

impl UserFriendlyError for TestrigError {
    fn user_message(&self) -> String {
        match self {
            Self::Config(err) => err.user_message(),
            Self::Load(err) => err.user_message(),
            Self::Preset(err) => err.user_message(),
            Self::Io(err) => format!("I/O failure: {err}"),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Config(err) => err.context(),
            Self::Load(err) => err.context(),
            Self::Preset(err) => err.context(),
            Self::Io(_) => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Config(err) => err.suggestions(),
            Self::Load(err) => err.suggestions(),
            Self::Preset(err) => err.suggestions(),
            Self::Io(_) => Vec::new(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(err) => err.category(),
            Self::Load(err) => err.category(),
            Self::Preset(err) => err.category(),
            Self::Io(_) => ErrorCategory::FileSystem,
        }
    }
}

impl TestrigError {
    /// Get a user-friendly error message with context and actionable suggestions.
    ///
    /// ```text
    /// Error: <user message>
    ///
    /// Context: <context if available>
    ///
    /// Suggestions:
    ///   • <suggestion 1>
    /// ```
    #[must_use]
    pub fn display_for_user(&self) -> String {
        let mut output = format!("Error: {}\n", self.user_message());

        if let Some(ctx) = self.context() {
            output.push_str(&format!("\nContext: {ctx}\n"));
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }
}
