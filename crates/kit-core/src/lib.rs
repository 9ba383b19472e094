//! Manifest synchronization core for fe-kit
//!
//! fe-kit tracks "modules" (named front-end building blocks, each backed by
//! one npm package) inside a project's `package.json`. This crate holds the
//! pieces the CLI drives:
//!
//! - **Registry**: the bundled, read-only catalog of module → package
//! - **Manifest**: a typed view over `package.json` that preserves every key
//!   the tool does not own
//! - **ManifestSynchronizer**: resolves requested modules, stages manifest
//!   mutations, and either previews them or persists them and runs the
//!   package manager
//! - **Recovery marker**: evidence of an install that never confirmed success
//!
//! # Architecture
//!
//! ```text
//!            kit-cli
//!               |
//!            kit-core
//!   registry  manifest  sync  installer  recovery  config
//!               |
//!             kit-fs
//! ```

pub mod config;
pub mod error;
pub mod installer;
pub mod manifest;
pub mod recovery;
pub mod registry;
pub mod sync;

pub use config::{ConfigOverrides, ConfigResolver, KitConfig};
pub use error::{Error, Result};
pub use installer::{CommandInstaller, Installer};
pub use manifest::{KitSection, LATEST, Manifest, ModuleRecord};
pub use recovery::PendingInstall;
pub use registry::{ModuleEntry, ModuleRegistry};
pub use sync::{Diagnostic, ManifestSynchronizer, SyncKind, SyncMode, SyncOutcome, SyncStatus};
