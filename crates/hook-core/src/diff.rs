//! Unified diffs for dry runs

use std::path::Path;

use similar::TextDiff;

/// Render a unified diff of a planned change to `path`.
///
/// Returns an empty string when the contents are equal.
pub fn unified_diff(path: &Path, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }

    let old_header = format!("a/{}", path.display());
    let new_header = format!("b/{}", path.display());

    TextDiff::from_lines(before, after)
        .unified_diff()
        .context_radius(3)
        .header(&old_header, &new_header)
        .to_string()
}
