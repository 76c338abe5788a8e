//! Logging infrastructure for testrig
//!
//! Structured logging through `tracing`. Events go to stderr so that
//! command output on stdout stays machine-readable.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber for structured logging
///
/// `RUST_LOG` takes precedence when set. Otherwise the filter is
/// `testrig=info,warn`, or `testrig=debug,info` when `verbose` is true.
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(verbose)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_line_number(false)
                .with_file(false)
                .compact(),
        )
        .try_init()?;

    Ok(())
}

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "testrig=debug,info"
    } else {
        "testrig=info,warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_parse() {
        for verbose in [false, true] {
            assert!(EnvFilter::try_new(default_directives(verbose)).is_ok());
        }
    }

    #[test]
    fn default_directives_match_documented_levels() {
        assert_eq!(default_directives(false), "testrig=info,warn");
        assert_eq!(default_directives(true), "testrig=debug,info");
    }
}
