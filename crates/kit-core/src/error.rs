//! Error types for kit-core

use std::path::PathBuf;

/// Result type for kit-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in kit-core operations
///
/// Unknown module names are not errors; they are reported per name as
/// [`Diagnostic`](crate::Diagnostic)s and never abort a batch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No manifest at the expected location
    #[error("package.json not found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// The manifest exists but is not a usable JSON document
    #[error("failed to parse manifest {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// The in-memory manifest could not be rendered back to JSON
    #[error("failed to serialize manifest: {0}")]
    ManifestSerialize(String),

    /// The module registry is malformed
    #[error("invalid module registry: {0}")]
    RegistryParse(String),

    /// A configuration layer holds an unusable value
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The package manager exited unsuccessfully or could not be started
    #[error("install command '{command}' failed; check the output above")]
    InstallFailed {
        command: String,
        exit_code: Option<i32>,
    },

    /// The configured package manager is not on PATH
    #[error("'{tool}' was not found on PATH{}", .hint.as_deref().unwrap_or(""))]
    PackageManagerNotFound { tool: String, hint: Option<String> },

    /// A staged module has no matching dependency entry. Indicates a bug.
    #[error("module '{module}' is tracked but its package '{package}' is missing from dependencies")]
    InconsistentState { module: String, package: String },

    /// Filesystem error from kit-fs
    #[error(transparent)]
    Fs(#[from] kit_fs::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
