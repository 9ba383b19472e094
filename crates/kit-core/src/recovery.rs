//! Recovery marker for installs that never confirmed success.
//!
//! The manifest is written before the package manager runs, so a failed
//! install leaves `package.json` claiming modules that are not installed. The
//! marker records that window: it is written right before the installer
//! starts and removed once it exits successfully. A marker found at the start
//! of a later run means the previous install did not finish.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kit_fs::{ConfigStore, KitPath, NormalizedPath, checksum, io};

use crate::error::Result;

/// Contents of `.fe-kit/pending-install.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingInstall {
    /// Modules staged by the interrupted run.
    pub modules: Vec<String>,
    /// Packages whose dependency entries were changed.
    pub packages: Vec<String>,
    /// Install command that was about to run.
    pub command: String,
    /// Checksum of the manifest text that was written.
    pub manifest_checksum: String,
    pub created_at: DateTime<Utc>,
}

impl PendingInstall {
    pub fn new(
        modules: Vec<String>,
        packages: Vec<String>,
        command: String,
        manifest_text: &str,
    ) -> Self {
        Self {
            modules,
            packages,
            command,
            manifest_checksum: checksum::content_checksum(manifest_text),
            created_at: Utc::now(),
        }
    }

    /// Marker location under a project root.
    pub fn path_in(root: &NormalizedPath) -> NormalizedPath {
        root.join(KitPath::PendingInstall.as_str())
    }

    pub fn load(path: &NormalizedPath) -> Result<Option<Self>> {
        Ok(ConfigStore::new().load_optional(path)?)
    }

    pub fn save(&self, path: &NormalizedPath) -> Result<()> {
        ConfigStore::new().save(path, self)?;
        tracing::debug!(path = %path, "recovery marker written");
        Ok(())
    }

    /// Remove the marker. Returns whether one existed.
    pub fn clear(path: &NormalizedPath) -> Result<bool> {
        let removed = io::remove_if_exists(path)?;
        if removed {
            tracing::debug!(path = %path, "recovery marker cleared");
        }
        Ok(removed)
    }

    /// Whether the manifest was edited after the interrupted run wrote it.
    pub fn manifest_changed_since(&self, current_manifest: &str) -> bool {
        checksum::content_checksum(current_manifest) != self.manifest_checksum
    }
}
