//! Result types returned by the synchronizer

use std::fmt;

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Mutations were computed but not written (dry-run).
    Preview,
    /// Mutations were written and the installer succeeded.
    Applied,
    /// There was nothing to reconcile; no write, no install.
    NothingToDo,
}

/// Non-fatal, per-name problem found while resolving a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The name is not in the registry. Nothing was changed for it.
    UnknownModule { name: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownModule { name } => write!(f, "Unknown module: {name}"),
        }
    }
}

/// Summary of one `resolve_and_apply` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub status: SyncStatus,
    /// Module names staged, in processing order. Unknown names never appear.
    pub staged: Vec<String>,
    /// Distinct packages whose dependency entries were set, first-seen order.
    pub changed_packages: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    /// Unified diff of the manifest, for previews that change something.
    pub diff: Option<String>,
}

impl SyncOutcome {
    pub fn nothing_to_do() -> Self {
        Self {
            status: SyncStatus::NothingToDo,
            staged: Vec::new(),
            changed_packages: Vec::new(),
            diagnostics: Vec::new(),
            diff: None,
        }
    }

    /// Names reported as unknown.
    pub fn unknown_modules(&self) -> Vec<&str> {
        self.diagnostics
            .iter()
            .map(|d| match d {
                Diagnostic::UnknownModule { name } => name.as_str(),
            })
            .collect()
    }

    pub fn is_noop(&self) -> bool {
        self.staged.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_to_do_is_noop() {
        let outcome = SyncOutcome::nothing_to_do();
        assert_eq!(outcome.status, SyncStatus::NothingToDo);
        assert!(outcome.is_noop());
        assert!(outcome.unknown_modules().is_empty());
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::UnknownModule {
            name: "ghost".into(),
        };
        assert_eq!(d.to_string(), "Unknown module: ghost");
    }
}
