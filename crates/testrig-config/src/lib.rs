//! testrig-config - configuration model, discovery, and resolution
//!
//! The central entry point is [`ConfigResolver::resolve`], a pure function
//! from an untrusted [`RawConfig`] to an immutable [`ResolvedConfig`].

pub mod config;

pub use config::*;
pub use testrig_utils::error::{ConfigError, ConfigErrorKind, LoadError};
