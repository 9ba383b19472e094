//! Helpers shared by the kit-core integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use kit_core::{Error, Installer, ManifestSynchronizer, ModuleRegistry, Result};
use kit_fs::NormalizedPath;
use kit_test_utils::{TEST_REGISTRY, project::TestProject};

/// Installer that records calls instead of spawning a package manager.
#[derive(Clone, Default)]
pub struct FakeInstaller {
    calls: Rc<Cell<usize>>,
    exit_code: Option<i32>,
    missing: bool,
}

impl FakeInstaller {
    /// An installer whose package manager exits with `code`.
    pub fn failing(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            ..Self::default()
        }
    }

    /// An installer whose package manager is not on PATH.
    pub fn missing() -> Self {
        Self {
            missing: true,
            ..Self::default()
        }
    }

    /// Handle for reading the call count after the installer is boxed.
    pub fn calls(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }
}

impl Installer for FakeInstaller {
    fn preflight(&self) -> Result<()> {
        if self.missing {
            return Err(Error::PackageManagerNotFound {
                tool: "fake-pm".into(),
                hint: None,
            });
        }
        Ok(())
    }

    fn install(&self, root: &Path) -> Result<()> {
        assert!(root.is_dir(), "install must run inside the project root");
        self.calls.set(self.calls.get() + 1);
        match self.exit_code {
            Some(code) => Err(Error::InstallFailed {
                command: self.describe(),
                exit_code: Some(code),
            }),
            None => Ok(()),
        }
    }

    fn describe(&self) -> String {
        "fake-pm install".to_string()
    }
}

pub fn test_registry() -> ModuleRegistry {
    ModuleRegistry::from_json(TEST_REGISTRY).unwrap()
}

pub fn synchronizer<'r>(
    project: &TestProject,
    registry: &'r ModuleRegistry,
    installer: FakeInstaller,
) -> ManifestSynchronizer<'r> {
    ManifestSynchronizer::new(
        NormalizedPath::new(project.root()),
        registry,
        Box::new(installer),
    )
}

pub fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
