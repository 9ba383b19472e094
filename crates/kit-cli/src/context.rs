//! Per-invocation context: the project root and its resolved configuration.

use std::path::Path;

use kit_core::{ConfigOverrides, ConfigResolver, KitConfig, ManifestSynchronizer, ModuleRegistry};
use kit_fs::NormalizedPath;

use crate::error::{CliError, Result};

#[derive(Debug, Clone)]
pub struct CommandContext {
    pub root: NormalizedPath,
    pub config: KitConfig,
}

impl CommandContext {
    /// Resolve the project root (`-C` or the current directory) and merge
    /// configuration layers for it.
    pub fn resolve(dir: Option<&Path>, package_manager: Option<String>) -> Result<Self> {
        let start = match dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir()?,
        };
        if !start.is_dir() {
            return Err(CliError::user(format!(
                "project directory '{}' does not exist",
                start.display()
            )));
        }
        let root = NormalizedPath::canonical_root(&start)?;
        tracing::debug!(root = %root, "project root");

        let overrides = ConfigOverrides { package_manager };
        let config = ConfigResolver::new(root.clone()).resolve(&overrides)?;
        tracing::debug!(?config, "resolved configuration");

        Ok(Self { root, config })
    }

    pub fn manifest_path(&self) -> NormalizedPath {
        self.config.manifest_path(&self.root)
    }

    pub fn synchronizer<'r>(&self, registry: &'r ModuleRegistry) -> ManifestSynchronizer<'r> {
        ManifestSynchronizer::from_config(self.root.clone(), &self.config, registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_explicit_dir_with_override() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = CommandContext::resolve(Some(dir.path()), Some("npm".into())).unwrap();

        assert_eq!(ctx.config.package_manager, "npm");
        assert!(ctx.manifest_path().as_str().ends_with("/package.json"));
    }

    #[test]
    fn test_resolve_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = CommandContext::resolve(Some(&missing), None).unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
    }
}
