//! The upgrade command

use colored::Colorize;

use kit_core::{ModuleRegistry, SyncKind, SyncMode, SyncStatus};

use crate::context::CommandContext;
use crate::error::Result;

use super::report;

/// Upgrade `modules`, or every tracked module when none are named.
pub fn run_upgrade(ctx: &CommandContext, modules: &[String], dry_run: bool) -> Result<()> {
    let registry = ModuleRegistry::builtin()?;
    let sync = ctx.synchronizer(registry);

    report::warn_pending(&sync)?;

    let mode = SyncMode::from_dry_run(dry_run);
    if mode == SyncMode::Apply {
        let target = if modules.is_empty() {
            "all installed modules".to_string()
        } else {
            modules.join(", ")
        };
        println!("{} Upgrading {}", "=>".blue().bold(), target.cyan());
    }

    let outcome = sync.resolve_and_apply(modules, SyncKind::Upgrade, mode)?;
    if outcome.status == SyncStatus::NothingToDo {
        println!("{}", "No installed modules to upgrade.".dimmed());
        return Ok(());
    }
    report::print_outcome("Upgraded", &outcome);
    Ok(())
}
