//! Filesystem primitives for fe-kit
//!
//! Path normalization, atomic writes, format-agnostic config loading and
//! content checksums. Everything above this crate goes through these helpers
//! instead of touching `std::fs` directly.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::KitPath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
