//! Shared test utilities for the fe-kit workspace.
//!
//! Dev-dependency only; never published.
//!
//! - [`project`]: [`TestProject`](project::TestProject), a temporary project
//!   root with a `package.json`

pub mod project;

/// Registry used across test suites: two modules on distinct packages plus
/// two modules sharing one package.
pub const TEST_REGISTRY: &str = r#"{
  "alpha": { "package": "pkg-a", "description": "Alpha module" },
  "beta": { "package": "pkg-b", "description": "Beta module" },
  "gamma": { "package": "pkg-shared", "description": "Gamma module" },
  "delta": { "package": "pkg-shared", "description": "Delta module" }
}"#;
