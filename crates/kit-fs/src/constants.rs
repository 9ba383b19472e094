//! Well-known paths inside a project root.

use std::path::Path;

/// Files and directories fe-kit reads or writes relative to the project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KitPath {
    /// The default project manifest (`package.json`)
    Manifest,
    /// Project-level configuration (`.fe-kit.toml`)
    ProjectConfig,
    /// Tool state directory (`.fe-kit`)
    StateDir,
    /// Recovery marker written before the installer runs
    PendingInstall,
}

impl KitPath {
    /// Get the path relative to the project root.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manifest => "package.json",
            Self::ProjectConfig => ".fe-kit.toml",
            Self::StateDir => ".fe-kit",
            Self::PendingInstall => ".fe-kit/pending-install.json",
        }
    }
}

impl AsRef<Path> for KitPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for KitPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for KitPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_marker_lives_in_state_dir() {
        assert!(
            KitPath::PendingInstall
                .as_str()
                .starts_with(KitPath::StateDir.as_str())
        );
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(KitPath::Manifest.to_string(), "package.json");
    }
}
