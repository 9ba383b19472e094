//! Slash-separated paths for project files

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path stored with `/` separators.
///
/// Project roots and the files below them travel as `NormalizedPath` so log
/// lines and error messages read the same on every platform. Native paths are
/// rebuilt only where the filesystem is touched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self(path.as_ref().to_string_lossy().replace('\\', "/"))
    }

    /// Absolute, symlink-free form of an existing directory.
    ///
    /// `dunce` keeps Windows roots free of the `\\?\` prefix.
    pub fn canonical_root(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        dunce::canonicalize(path)
            .map(Self::new)
            .map_err(|e| Error::io(path, e))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// Append a relative segment. Leading separators on `segment` are ignored.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let segment = segment.trim_start_matches('/');
        match self.0.as_str() {
            "" => Self(segment.to_string()),
            base => Self(format!("{}/{}", base.trim_end_matches('/'), segment)),
        }
    }

    /// Last component, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.0
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }

    /// Text after the last dot of the file name. Dotfiles like `.fe-kit`
    /// have no extension.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(&name[idx + 1..]),
        }
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
