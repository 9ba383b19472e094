//! The list command

use colored::Colorize;
use serde_json::json;

use kit_core::{Error as CoreError, Manifest, ModuleRegistry};

use crate::context::CommandContext;
use crate::error::Result;

/// List registry modules, marking those tracked in the project manifest.
pub fn run_list(ctx: &CommandContext, json: bool) -> Result<()> {
    let registry = ModuleRegistry::builtin()?;
    let tracked = tracked_modules(ctx)?;

    if json {
        let modules: Vec<_> = registry
            .iter()
            .map(|entry| {
                json!({
                    "name": entry.name,
                    "package": entry.package,
                    "description": entry.description,
                    "installed": tracked.contains(&entry.name),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&modules).map_err(CoreError::from)?);
        return Ok(());
    }

    println!("{} Available modules:", "=>".blue().bold());
    println!();
    for entry in registry.iter() {
        let marker = if tracked.contains(&entry.name) {
            "*".green().bold().to_string()
        } else {
            " ".to_string()
        };
        println!(
            " {} {:<8} {:<24} {}",
            marker,
            entry.name.cyan(),
            entry.package,
            entry.description.dimmed()
        );
    }
    if !tracked.is_empty() {
        println!();
        println!("{} installed in this project", "*".green().bold());
    }
    Ok(())
}

/// Tracked module names, or none when the project has no manifest.
fn tracked_modules(ctx: &CommandContext) -> Result<Vec<String>> {
    match Manifest::load(&ctx.manifest_path()) {
        Ok(manifest) => Ok(manifest.tracked_modules()),
        Err(CoreError::ManifestNotFound { .. }) => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}
