//! Dependency installation through an external package manager.
//!
//! After a successful manifest write the synchronizer hands control to an
//! [`Installer`], which blocks until the package manager exits. There is no
//! timeout and no retry.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Something that can bring `node_modules` in line with the manifest.
pub trait Installer {
    /// Cheap checks that run before the manifest is written.
    fn preflight(&self) -> Result<()> {
        Ok(())
    }

    /// Run the installation in `root` and wait for it to finish.
    fn install(&self, root: &Path) -> Result<()>;

    /// Human-readable form of what `install` runs, e.g. `pnpm install`.
    fn describe(&self) -> String;
}

/// Runs `<program> <args...>` in the project root with inherited stdio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInstaller {
    program: String,
    args: Vec<String>,
}

impl CommandInstaller {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Default for CommandInstaller {
    /// `pnpm install`
    fn default() -> Self {
        Self::new("pnpm", vec!["install".to_string()])
    }
}

impl Installer for CommandInstaller {
    fn preflight(&self) -> Result<()> {
        let resolved = check_binary_on_path(&self.program)?;
        tracing::debug!(program = %self.program, path = %resolved.display(), "package manager found");
        Ok(())
    }

    /// Stdin, stdout and stderr are inherited so progress output streams
    /// live to the terminal. A non-zero exit returns [`Error::InstallFailed`].
    fn install(&self, root: &Path) -> Result<()> {
        let command = self.describe();
        tracing::info!(%command, root = %root.display(), "running package manager");

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| {
                tracing::error!(%command, error = %e, "failed to start package manager");
                Error::InstallFailed {
                    command: command.clone(),
                    exit_code: None,
                }
            })?;

        if !status.success() {
            return Err(Error::InstallFailed {
                command,
                exit_code: status.code(),
            });
        }

        Ok(())
    }

    fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Verify a binary is on PATH. Returns the resolved path or
/// [`Error::PackageManagerNotFound`].
///
/// A program given as a path (containing a separator) is checked directly.
pub fn check_binary_on_path(tool: &str) -> Result<PathBuf> {
    let not_found = || Error::PackageManagerNotFound {
        tool: tool.to_string(),
        hint: install_hint(tool).map(str::to_string),
    };

    if tool.contains('/') || tool.contains('\\') {
        let candidate = PathBuf::from(tool);
        return if candidate.is_file() {
            Ok(candidate)
        } else {
            Err(not_found())
        };
    }

    let path_var = std::env::var_os("PATH").unwrap_or_default();
    let extensions: Vec<String> = if cfg!(windows) {
        std::env::var("PATHEXT")
            .unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string())
            .split(';')
            .map(|s| s.to_ascii_lowercase())
            .collect()
    } else {
        vec![String::new()]
    };

    for dir in std::env::split_paths(&path_var) {
        for ext in &extensions {
            let candidate = if ext.is_empty() {
                dir.join(tool)
            } else {
                dir.join(format!("{tool}{ext}"))
            };
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    Err(not_found())
}

fn install_hint(tool: &str) -> Option<&'static str> {
    match tool {
        "pnpm" => Some("\n  Install: npm install -g pnpm  (or enable it with `corepack enable`)"),
        "npm" => Some("\n  Install: https://nodejs.org"),
        "yarn" => Some("\n  Install: corepack enable"),
        "bun" => Some("\n  Install: https://bun.sh"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pnpm_install() {
        let installer = CommandInstaller::default();
        assert_eq!(installer.program(), "pnpm");
        assert_eq!(installer.describe(), "pnpm install");
    }

    #[test]
    fn test_describe_joins_args() {
        let installer =
            CommandInstaller::new("npm", vec!["install".into(), "--no-audit".into()]);
        assert_eq!(installer.describe(), "npm install --no-audit");
    }

    #[cfg(unix)]
    #[test]
    fn test_install_nonzero_exit_fails() {
        let tmp = tempfile::TempDir::new().unwrap();
        let installer = CommandInstaller::new("sh", vec!["-c".into(), "exit 3".into()]);

        let err = installer.install(tmp.path()).unwrap_err();
        assert!(
            matches!(err, Error::InstallFailed { exit_code: Some(3), .. }),
            "expected InstallFailed, got: {err:?}"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_install_success() {
        let tmp = tempfile::TempDir::new().unwrap();
        let installer = CommandInstaller::new("true", vec![]);
        installer.install(tmp.path()).unwrap();
    }

    #[test]
    fn test_install_missing_program_fails_without_exit_code() {
        let tmp = tempfile::TempDir::new().unwrap();
        let installer = CommandInstaller::new("nonexistent_tool_xyz_12345", vec![]);

        let err = installer.install(tmp.path()).unwrap_err();
        assert!(matches!(err, Error::InstallFailed { exit_code: None, .. }));
    }

    #[test]
    fn test_check_binary_on_path_not_found() {
        let err = check_binary_on_path("nonexistent_tool_xyz_12345").unwrap_err();
        assert!(
            matches!(err, Error::PackageManagerNotFound { ref tool, .. } if tool == "nonexistent_tool_xyz_12345"),
            "expected PackageManagerNotFound, got: {err:?}"
        );
    }

    #[test]
    fn test_preflight_reports_hint_for_known_tools() {
        let err = CommandInstaller::new("/definitely/not/here/pnpm", vec![])
            .preflight()
            .unwrap_err();
        assert!(matches!(err, Error::PackageManagerNotFound { hint: None, .. }));

        assert!(install_hint("pnpm").is_some());
        assert!(install_hint("mystery").is_none());
    }
}
