//! Terminal rendering of synchronizer results

use colored::Colorize;

use kit_core::{ManifestSynchronizer, SyncOutcome, SyncStatus};
use kit_fs::io;

use crate::error::Result;

/// Warn about an install that never confirmed success.
pub fn warn_pending(sync: &ManifestSynchronizer<'_>) -> Result<()> {
    let Some(pending) = sync.pending()? else {
        return Ok(());
    };

    let what = if pending.modules.is_empty() {
        String::new()
    } else {
        format!(" of {}", pending.modules.join(", "))
    };
    eprintln!(
        "{} a previous install{} did not finish ({}, started {})",
        "warning:".yellow().bold(),
        what,
        pending.command,
        pending.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );

    let file_name = sync.manifest_path().file_name().unwrap_or("package.json");
    let current = io::read_text_if_exists(sync.manifest_path())?;
    if current.is_some_and(|text| pending.manifest_changed_since(&text)) {
        eprintln!("   {file_name} has been edited since then");
    }
    eprintln!("   installed packages may not match {file_name} until an install succeeds");
    Ok(())
}

/// Print an outcome. `verb` is the past tense used for applied changes.
pub fn print_outcome(verb: &str, outcome: &SyncOutcome) {
    for diagnostic in &outcome.diagnostics {
        eprintln!("{} {}", "warning:".yellow().bold(), diagnostic);
    }

    match outcome.status {
        SyncStatus::NothingToDo => {
            println!("{} Nothing to do.", "OK".green().bold());
        }
        SyncStatus::Preview => {
            println!("{} Dry run, package.json was not modified.", "=>".blue().bold());
            if outcome.is_noop() {
                println!("   No known modules requested.");
                return;
            }
            println!("   Would update: {}", outcome.staged.join(", ").cyan());
            println!("   Packages: {}", outcome.changed_packages.join(", "));
            if let Some(diff) = &outcome.diff {
                println!();
                print_diff(diff);
            }
        }
        SyncStatus::Applied => {
            if outcome.is_noop() {
                println!(
                    "{} No known modules requested; dependencies reinstalled.",
                    "OK".green().bold()
                );
                return;
            }
            println!(
                "{} {} {} ({})",
                "OK".green().bold(),
                verb,
                outcome.staged.join(", ").cyan(),
                outcome.changed_packages.join(", ")
            );
        }
    }
}

fn print_diff(diff: &str) {
    for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else {
            println!("{line}");
        }
    }
}
