//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// fe-kit - add and upgrade front-end modules in package.json
#[derive(Parser, Debug)]
#[command(name = "fe-kit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Project root containing package.json (defaults to the current directory)
    #[arg(short = 'C', long = "dir", global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Package manager used to install dependencies
    #[arg(long, global = true, env = "FE_KIT_PACKAGE_MANAGER", value_name = "PROGRAM")]
    pub package_manager: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Add modules to package.json and install them
    ///
    /// Examples:
    ///   fe-kit add utils http
    ///   fe-kit add query --dry-run
    Add {
        /// Module names (use 'fe-kit list' to see options)
        #[arg(required = true, value_name = "MODULE")]
        modules: Vec<String>,

        /// Preview changes without writing package.json
        #[arg(long)]
        dry_run: bool,
    },

    /// List available modules
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Upgrade modules to their latest version
    ///
    /// Without module names, every module recorded in package.json is upgraded.
    ///
    /// Examples:
    ///   fe-kit upgrade
    ///   fe-kit upgrade utils --dry
    Upgrade {
        /// Module names (defaults to all installed modules)
        #[arg(value_name = "MODULE")]
        modules: Vec<String>,

        /// Preview changes without writing package.json
        #[arg(long = "dry", visible_alias = "dry-run")]
        dry_run: bool,
    },

    /// Print the CLI version
    Version,
}

/// Map a leading `-v` to `--version`; clap reserves `-V`.
pub fn normalize_args<I>(args: I) -> Vec<std::ffi::OsString>
where
    I: IntoIterator<Item = std::ffi::OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| if i == 1 && arg == "-v" { "--version".into() } else { arg })
        .collect()
}
