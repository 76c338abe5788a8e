//! Exit code constants and error mapping for testrig.
//!
//! # Exit Code Table
//!
//! | Code | Constant | Description |
//! |------|----------|-------------|
//! | 0 | `SUCCESS` | Operation completed successfully |
//! | 1 | `INTERNAL` | General/internal failure |
//! | 2 | `CONFIG` | Configuration record failed resolution, or invalid CLI arguments |
//! | 3 | `CONFIG_LOAD` | Configuration file could not be found, read, or parsed |
//! | 4 | `PRESET_NOT_FOUND` | Named preset is not registered |

use crate::error::TestrigError;

/// Exit codes matching the documented exit code table.
///
/// The numeric values are part of the public API.
///
/// ```rust
/// use testrig_utils::exit_codes::ExitCode;
///
/// assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
/// assert_eq!(ExitCode::CONFIG, ExitCode::from_i32(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Success - operation completed successfully
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// Internal error - general failure
    pub const INTERNAL: ExitCode = ExitCode(1);

    /// Configuration error - a field failed validation
    pub const CONFIG: ExitCode = ExitCode(2);

    /// Configuration file could not be loaded
    pub const CONFIG_LOAD: ExitCode = ExitCode(3);

    /// Preset lookup failed
    pub const PRESET_NOT_FOUND: ExitCode = ExitCode(4);

    /// Get the numeric exit code value.
    ///
    /// Use this with `std::process::exit()`.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Create an ExitCode from a raw i32 value.
    ///
    /// Prefer using the named constants when possible.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<i32> for ExitCode {
    fn from(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl TestrigError {
    /// Map this error to its CLI exit code.
    #[must_use]
    pub fn to_exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_) => ExitCode::CONFIG,
            Self::Load(_) => ExitCode::CONFIG_LOAD,
            Self::Preset(_) => ExitCode::PRESET_NOT_FOUND,
            Self::Io(_) => ExitCode::INTERNAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, LoadError, PresetError};
    use std::path::PathBuf;

    #[test]
    fn errors_map_to_documented_codes() {
        let config = TestrigError::from(ConfigError::MalformedField {
            field: "testExclusions".to_string(),
            reason: "expected a list".to_string(),
        });
        let load = TestrigError::from(LoadError::NotFound {
            path: PathBuf::from("missing.toml"),
        });
        let preset = TestrigError::from(PresetError::NotFound {
            name: "x".to_string(),
            known: Vec::new(),
        });
        let io = TestrigError::from(std::io::Error::other("boom"));

        assert_eq!(config.to_exit_code(), ExitCode::CONFIG);
        assert_eq!(load.to_exit_code(), ExitCode::CONFIG_LOAD);
        assert_eq!(preset.to_exit_code().as_i32(), 4);
        assert_eq!(io.to_exit_code(), ExitCode::INTERNAL);
    }

    #[test]
    fn i32_conversions_round_trip() {
        let code: i32 = ExitCode::CONFIG_LOAD.into();
        assert_eq!(code, 3);
        assert_eq!(ExitCode::from(3), ExitCode::CONFIG_LOAD);
    }
}
