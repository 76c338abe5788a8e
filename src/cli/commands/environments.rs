//! Environments command implementation

use anyhow::Result;

use testrig_config::DefaultTables;

/// Execute the environments command
pub fn execute_environments_command(tables: &DefaultTables) -> Result<()> {
    for environment in tables.environments {
        let marker = if *environment == tables.environment {
            " (default)"
        } else {
            ""
        };
        let name: &str = environment.as_ref();
        println!("  {name:<12} {}{marker}", environment.description());
    }
    Ok(())
}
