//! Tool configuration with layered resolution
//!
//! Layers, later overriding earlier:
//! 1. Built-in defaults (`pnpm install`, `package.json`)
//! 2. User config (`~/.config/fe-kit/config.toml` on Linux)
//! 3. Project config (`<root>/.fe-kit.toml`)
//! 4. Explicit overrides from the command line or environment

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use kit_fs::{ConfigStore, KitPath, NormalizedPath};

use crate::error::{Error, Result};
use crate::installer::CommandInstaller;

const APP_DIR: &str = "fe-kit";
const USER_CONFIG_FILE: &str = "config.toml";

/// Effective configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KitConfig {
    /// Package manager executable.
    pub package_manager: String,
    /// Arguments passed to the package manager.
    pub install_args: Vec<String>,
    /// Manifest file name, relative to the project root.
    pub manifest_file: String,
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            package_manager: "pnpm".to_string(),
            install_args: vec!["install".to_string()],
            manifest_file: KitPath::Manifest.as_str().to_string(),
        }
    }
}

impl KitConfig {
    /// The installer this configuration describes.
    pub fn installer(&self) -> CommandInstaller {
        CommandInstaller::new(self.package_manager.clone(), self.install_args.clone())
    }

    /// Path of the manifest under `root`.
    pub fn manifest_path(&self, root: &NormalizedPath) -> NormalizedPath {
        root.join(&self.manifest_file)
    }

    fn apply(&mut self, layer: ConfigLayer) {
        if let Some(pm) = layer.package_manager {
            self.package_manager = pm;
        }
        if let Some(args) = layer.install_args {
            self.install_args = args;
        }
        if let Some(file) = layer.manifest_file {
            self.manifest_file = file;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.package_manager.trim().is_empty() {
            return Err(Error::InvalidConfig {
                reason: "package_manager must not be empty".to_string(),
            });
        }

        let manifest = Path::new(&self.manifest_file);
        if self.manifest_file.is_empty()
            || manifest.has_root()
            || manifest.components().any(|c| c == Component::ParentDir)
        {
            return Err(Error::InvalidConfig {
                reason: format!(
                    "manifest_file '{}' must be a relative path inside the project",
                    self.manifest_file
                ),
            });
        }

        Ok(())
    }
}

/// One configuration file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigLayer {
    package_manager: Option<String>,
    install_args: Option<Vec<String>>,
    manifest_file: Option<String>,
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub package_manager: Option<String>,
}

/// Resolves [`KitConfig`] for a project root.
pub struct ConfigResolver {
    root: NormalizedPath,
    /// Override for the user config directory (used for testing).
    user_config_dir_override: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            user_config_dir_override: None,
        }
    }

    /// Create a resolver that reads user config from `dir` instead of the
    /// platform config directory.
    pub fn with_user_config_dir(root: NormalizedPath, dir: PathBuf) -> Self {
        Self {
            root,
            user_config_dir_override: Some(dir),
        }
    }

    fn user_config_path(&self) -> Option<NormalizedPath> {
        let dir = match &self.user_config_dir_override {
            Some(dir) => dir.clone(),
            None => dirs::config_dir()?.join(APP_DIR),
        };
        Some(NormalizedPath::new(dir.join(USER_CONFIG_FILE)))
    }

    fn project_config_path(&self) -> NormalizedPath {
        self.root.join(KitPath::ProjectConfig.as_str())
    }

    /// Merge all layers and validate the result.
    ///
    /// Missing files are skipped; unreadable or malformed ones are errors.
    pub fn resolve(&self, overrides: &ConfigOverrides) -> Result<KitConfig> {
        let store = ConfigStore::new();
        let mut config = KitConfig::default();

        let files = self
            .user_config_path()
            .into_iter()
            .chain(std::iter::once(self.project_config_path()));
        for path in files {
            if let Some(layer) = store.load_optional::<ConfigLayer>(&path)? {
                tracing::debug!(path = %path, "applying config layer");
                config.apply(layer);
            }
        }

        if let Some(pm) = &overrides.package_manager {
            config.package_manager = pm.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
