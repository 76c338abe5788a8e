//! CLI command implementations.
//!
//! Each subcommand lives in its own module; `run.rs` dispatches to them.

mod check;
mod common;
mod environments;
mod json_emit;
mod resolve;

pub use check::execute_check_command;
pub use common::Session;
pub use environments::execute_environments_command;
pub use resolve::execute_resolve_command;
