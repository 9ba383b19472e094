//! The add command

use colored::Colorize;

use kit_core::{ModuleRegistry, SyncKind, SyncMode};

use crate::context::CommandContext;
use crate::error::Result;

use super::report;

/// Add `modules` to the manifest and install them.
///
/// Unknown names are reported and skipped; they do not fail the command.
pub fn run_add(ctx: &CommandContext, modules: &[String], dry_run: bool) -> Result<()> {
    let registry = ModuleRegistry::builtin()?;
    let sync = ctx.synchronizer(registry);

    report::warn_pending(&sync)?;

    let mode = SyncMode::from_dry_run(dry_run);
    if mode == SyncMode::Apply {
        println!(
            "{} Adding {} to {}",
            "=>".blue().bold(),
            modules.join(", ").cyan(),
            sync.manifest_path()
        );
    }

    let outcome = sync.resolve_and_apply(modules, SyncKind::Add, mode)?;
    report::print_outcome("Added", &outcome);
    Ok(())
}
