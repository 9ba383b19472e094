//! Text diff of a manifest before and after staging

use similar::TextDiff;

const CONTEXT_LINES: usize = 2;

/// Unified diff from `old` to `new`, or `None` when they are identical.
pub fn unified_diff(file_name: &str, old: &str, new: &str) -> Option<String> {
    if old == new {
        return None;
    }

    let diff = TextDiff::from_lines(old, new);
    let rendered = diff
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(&format!("{file_name} (current)"), &format!("{file_name} (preview)"))
        .to_string();
    Some(rendered)
}
