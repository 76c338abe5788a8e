//! Check command implementation
//!
//! Handles `testrig check <PATH>...`: classify each path against the
//! resolved configuration.

use anyhow::Result;
use camino::Utf8PathBuf;

use testrig_presets::PresetRegistry;

use super::common::Session;
use super::json_emit::emit_json;
use crate::plan::{FileDecision, RunPlan};

/// Execute the check command
pub fn execute_check_command(
    session: &Session,
    registry: &PresetRegistry,
    paths: &[Utf8PathBuf],
    json: bool,
) -> Result<()> {
    let plan = RunPlan::new(&session.config, registry)?;
    let decisions: Vec<FileDecision> = paths.iter().map(|p| plan.classify(p)).collect();

    if json {
        println!("{}", emit_json(&decisions, "check")?);
        return Ok(());
    }

    for decision in &decisions {
        print_decision(decision);
    }

    Ok(())
}

fn print_decision(decision: &FileDecision) {
    let role = if decision.is_test { "test" } else { "source" };
    let coverage = if decision.instrument {
        "instrumented"
    } else {
        "not instrumented"
    };
    let transform = decision.transform.as_deref().unwrap_or("none");

    println!(
        "{}: {role}, {coverage}, transform: {transform}, environment: {}",
        decision.path, decision.environment
    );
    for pattern in &decision.test_excluded_by {
        println!("  excluded from tests by '{pattern}'");
    }
    for pattern in &decision.coverage_excluded_by {
        println!("  excluded from coverage by '{pattern}'");
    }
}
