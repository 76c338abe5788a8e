//! Resolve command implementation
//!
//! Handles `testrig resolve` and `testrig resolve --json`.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use testrig_config::{EffectiveValue, ResolvedConfig, effective_config};

use super::common::Session;
use super::json_emit::emit_json;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveOutput<'a> {
    config_file: Option<&'a Path>,
    config: &'a ResolvedConfig,
    sources: Vec<EffectiveValue>,
}

/// Execute the resolve command
pub fn execute_resolve_command(session: &Session, json: bool) -> Result<()> {
    let rows = effective_config(&session.config, &session.layers);

    if json {
        let output = ResolveOutput {
            config_file: session.config_file.as_deref(),
            config: &session.config,
            sources: rows,
        };
        println!("{}", emit_json(&output, "resolved configuration")?);
        return Ok(());
    }

    match &session.config_file {
        Some(path) => println!("Configuration file: {}", path.display()),
        None => println!("Configuration file: none (built-in defaults)"),
    }
    println!();
    for row in &rows {
        println!("  {:<20} {:<48} [{}]", row.field.key(), row.value, row.source);
    }

    Ok(())
}
