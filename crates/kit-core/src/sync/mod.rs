//! Manifest synchronization
//!
//! [`ManifestSynchronizer`] is the single entry point for the `add` and
//! `upgrade` flows. Each call walks `Loaded → Mutated → (Previewed |
//! Persisted)` once; nothing is retried and nothing is rolled back.

mod engine;
mod outcome;
mod preview;

pub use engine::{ManifestSynchronizer, SyncKind, SyncMode};
pub use outcome::{Diagnostic, SyncOutcome, SyncStatus};
pub use preview::unified_diff;
