use colored::Colorize;

use crate::error::Result;

pub fn run_version() -> Result<()> {
    println!("{} {}", "fe-kit".green().bold(), env!("CARGO_PKG_VERSION"));
    Ok(())
}
