//! ManifestSynchronizer implementation

use kit_fs::NormalizedPath;

use crate::Result;
use crate::config::KitConfig;
use crate::installer::Installer;
use crate::manifest::Manifest;
use crate::recovery::PendingInstall;
use crate::registry::ModuleRegistry;

use super::outcome::{Diagnostic, SyncOutcome, SyncStatus};
use super::preview::unified_diff;

/// Which command is reconciling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncKind {
    /// `add <name...>`: only the named modules.
    Add,
    /// `upgrade [<name...>]`: with no names, every tracked module.
    Upgrade,
}

/// Whether staged mutations are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    Apply,
    DryRun,
}

impl SyncMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run { Self::DryRun } else { Self::Apply }
    }
}

/// Mutations staged against a loaded manifest.
#[derive(Default)]
struct Staged {
    modules: Vec<String>,
    /// `(module, package)` for each staged module, for verification.
    pairs: Vec<(String, String)>,
    packages: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

/// Reconciles requested modules against the registry and the project
/// manifest.
///
/// The manifest is read fresh on every call and written at most once. No lock
/// is held between read and write: a concurrent editor can lose updates.
pub struct ManifestSynchronizer<'r> {
    root: NormalizedPath,
    manifest_path: NormalizedPath,
    registry: &'r ModuleRegistry,
    installer: Box<dyn Installer + 'r>,
}

impl<'r> ManifestSynchronizer<'r> {
    /// Create a synchronizer for the `package.json` directly under `root`.
    pub fn new(
        root: NormalizedPath,
        registry: &'r ModuleRegistry,
        installer: Box<dyn Installer + 'r>,
    ) -> Self {
        let manifest_path = KitConfig::default().manifest_path(&root);
        Self {
            root,
            manifest_path,
            registry,
            installer,
        }
    }

    /// Create a synchronizer using the manifest name and installer from
    /// `config`.
    pub fn from_config(
        root: NormalizedPath,
        config: &KitConfig,
        registry: &'r ModuleRegistry,
    ) -> Self {
        Self {
            manifest_path: config.manifest_path(&root),
            installer: Box::new(config.installer()),
            root,
            registry,
        }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn manifest_path(&self) -> &NormalizedPath {
        &self.manifest_path
    }

    pub fn marker_path(&self) -> NormalizedPath {
        PendingInstall::path_in(&self.root)
    }

    /// The recovery marker left by an install that did not succeed, if any.
    pub fn pending(&self) -> Result<Option<PendingInstall>> {
        PendingInstall::load(&self.marker_path())
    }

    /// Resolve `requested` against the registry and stage the results.
    ///
    /// With [`SyncMode::DryRun`] the manifest on disk is never touched. With
    /// [`SyncMode::Apply`] the manifest is persisted in full and the installer
    /// runs afterwards; an install failure is returned as an error but the
    /// manifest write is not undone (the recovery marker stays behind).
    ///
    /// # Errors
    ///
    /// - [`Error::ManifestNotFound`](crate::Error::ManifestNotFound) before
    ///   any mutation
    /// - [`Error::PackageManagerNotFound`](crate::Error::PackageManagerNotFound)
    ///   from the installer preflight, before the write
    /// - [`Error::InstallFailed`](crate::Error::InstallFailed) after the write
    pub fn resolve_and_apply(
        &self,
        requested: &[String],
        kind: SyncKind,
        mode: SyncMode,
    ) -> Result<SyncOutcome> {
        let mut manifest = Manifest::load(&self.manifest_path)?;

        let targets = effective_targets(requested, kind, &manifest);
        if targets.is_empty() && kind == SyncKind::Upgrade {
            tracing::info!("no tracked modules to upgrade");
            return Ok(SyncOutcome::nothing_to_do());
        }
        tracing::debug!(?targets, ?kind, ?mode, "reconciling modules");

        let staged = self.stage(&mut manifest, &targets);

        match mode {
            SyncMode::DryRun => self.preview(&manifest, staged),
            SyncMode::Apply => self.persist_and_install(&manifest, staged),
        }
    }

    fn stage(&self, manifest: &mut Manifest, targets: &[String]) -> Staged {
        let mut staged = Staged::default();

        for name in targets {
            let Some(entry) = self.registry.get(name) else {
                tracing::warn!(module = %name, "unknown module");
                staged.diagnostics.push(Diagnostic::UnknownModule { name: name.clone() });
                continue;
            };

            manifest.stage_module(name, &entry.package);
            tracing::debug!(module = %name, package = %entry.package, "staged");

            staged.modules.push(name.clone());
            staged.pairs.push((name.clone(), entry.package.clone()));
            if !staged.packages.contains(&entry.package) {
                staged.packages.push(entry.package.clone());
            }
        }

        staged
    }

    fn preview(&self, manifest: &Manifest, staged: Staged) -> Result<SyncOutcome> {
        let diff = if staged.modules.is_empty() {
            None
        } else {
            let rendered = manifest.render()?;
            let file_name = self.manifest_path.file_name().unwrap_or("package.json");
            unified_diff(file_name, manifest.source(), &rendered)
        };
        Ok(SyncOutcome {
            status: SyncStatus::Preview,
            diff,
            staged: staged.modules,
            changed_packages: staged.packages,
            diagnostics: staged.diagnostics,
        })
    }

    fn persist_and_install(&self, manifest: &Manifest, staged: Staged) -> Result<SyncOutcome> {
        manifest.verify_staged(
            staged
                .pairs
                .iter()
                .map(|(module, package)| (module.as_str(), package.as_str())),
        )?;
        self.installer.preflight()?;

        let written = manifest.save()?;

        let marker_path = self.marker_path();
        PendingInstall::new(
            staged.modules.clone(),
            staged.packages.clone(),
            self.installer.describe(),
            &written,
        )
        .save(&marker_path)?;

        if let Err(e) = self.installer.install(self.root.as_ref()) {
            tracing::warn!(
                marker = %marker_path,
                "install failed after the manifest was written; manifest and installed packages may differ"
            );
            return Err(e);
        }
        PendingInstall::clear(&marker_path)?;

        Ok(SyncOutcome {
            status: SyncStatus::Applied,
            staged: staged.modules,
            changed_packages: staged.packages,
            diagnostics: staged.diagnostics,
            diff: None,
        })
    }
}

/// Explicit names win. An upgrade without names targets every tracked module
/// in document order; an add without names targets nothing.
fn effective_targets(requested: &[String], kind: SyncKind, manifest: &Manifest) -> Vec<String> {
    if !requested.is_empty() {
        return requested.to_vec();
    }
    match kind {
        SyncKind::Add => Vec::new(),
        SyncKind::Upgrade => manifest.tracked_modules(),
    }
}
