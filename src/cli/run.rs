//! CLI entry point and dispatch logic
//!
//! This module owns the `run()` function which:
//! - Parses CLI arguments and installs logging
//! - Discovers, layers, and resolves configuration
//! - Dispatches to command handlers
//! - Handles all error output

use clap::Parser;
use tracing::debug;

use testrig_config::DefaultTables;
use testrig_presets::PresetRegistry;
use testrig_utils::error::TestrigError;
use testrig_utils::exit_codes::ExitCode;
use testrig_utils::logging::init_tracing;

use super::args::{Cli, Commands};
use super::commands::{self, Session};

/// Main CLI execution function.
///
/// Prints everything itself, including errors, and returns the exit code to
/// use on failure. `main.rs` only calls `std::process::exit`.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();
    run_with(cli)
}

/// Run an already-parsed command line.
pub fn run_with(cli: Cli) -> Result<(), ExitCode> {
    if let Err(e) = init_tracing(cli.verbose) {
        // A subscriber may already be installed when embedded; keep going.
        eprintln!("warning: logging not initialised: {e}");
    }

    let result = dispatch(&cli);

    if let Err(error) = result {
        if let Some(testrig_error) = error.downcast_ref::<TestrigError>() {
            eprint!("{}", testrig_error.display_for_user());
            return Err(testrig_error.to_exit_code());
        }

        eprintln!("✗ Unexpected error: {error:#}");
        eprintln!("\n  Run with --verbose for more detailed output");
        return Err(ExitCode::INTERNAL);
    }

    Ok(())
}

fn dispatch(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Environments => commands::execute_environments_command(&DefaultTables::BUILTIN),
        Commands::Resolve { json } => {
            let session = load_session(cli)?;
            commands::execute_resolve_command(&session, *json)
        }
        Commands::Check { paths, json } => {
            let session = load_session(cli)?;
            let registry = PresetRegistry::builtin();
            commands::execute_check_command(&session, &registry, paths, *json)
        }
    }
}

fn load_session(cli: &Cli) -> Result<Session, TestrigError> {
    let overrides = cli.overrides();
    debug!(keys = overrides.len(), "command-line overrides");
    Session::load(cli.config.as_deref(), &overrides)
}
