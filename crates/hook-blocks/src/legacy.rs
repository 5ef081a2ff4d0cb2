//! Removal of block formats written by older tool versions.
//!
//! Two kinds of legacy artifact are recognised:
//!
//! - an inline definition pasted straight into the rc file, starting at a line
//!   containing an anchor comment and ending at the first later line that
//!   starts with a terminator prefix (typically an alias declaration);
//! - a block delimited by a previous marker pair.

use crate::markers::MarkerPair;
use crate::writer::remove_all;

/// An inline definition bounded by an anchor comment and a terminator line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchoredDefinition {
    /// Text contained in the first line of the definition.
    pub anchor: String,
    /// Prefix of the last line of the definition.
    pub terminator_prefix: String,
}

/// The legacy formats a migration should strip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyRules {
    pub definition: Option<AnchoredDefinition>,
    pub marker_pairs: Vec<MarkerPair>,
}

/// A legacy artifact that was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyArtifact {
    /// Inline definition spanning these 1-based lines, inclusive.
    Definition { first_line: usize, last_line: usize },
    /// Blocks delimited by an old marker pair.
    MarkerBlock { start_marker: String, count: usize },
}

/// Result of [`strip_legacy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub content: String,
    pub removed: Vec<LegacyArtifact>,
}

impl Migration {
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Remove the anchored inline definition, if it is complete.
///
/// An anchor with no terminator after it leaves the content untouched: the
/// end of the definition is unknown, so nothing is deleted.
pub fn strip_definition(
    content: &str,
    definition: &AnchoredDefinition,
) -> Option<(String, LegacyArtifact)> {
    let lines: Vec<&str> = content.split('\n').collect();

    let first = lines
        .iter()
        .position(|line| line.contains(&definition.anchor))?;

    let Some(offset) = lines[first + 1..]
        .iter()
        .position(|line| line.starts_with(&definition.terminator_prefix))
    else {
        tracing::warn!(
            anchor = %definition.anchor,
            line = first + 1,
            "Legacy definition has no terminator; leaving it in place"
        );
        return None;
    };
    let last = first + 1 + offset;

    let kept: Vec<&str> = lines[..first]
        .iter()
        .chain(lines[last + 1..].iter())
        .copied()
        .collect();

    Some((
        kept.join("\n"),
        LegacyArtifact::Definition {
            first_line: first + 1,
            last_line: last + 1,
        },
    ))
}

/// Strip every legacy artifact described by `rules`.
///
/// The anchored definition is handled first, then each legacy marker pair in
/// order.
pub fn strip_legacy(content: &str, rules: &LegacyRules) -> Migration {
    let mut current = content.to_string();
    let mut removed = Vec::new();

    if let Some(definition) = &rules.definition
        && let Some((stripped, artifact)) = strip_definition(&current, definition)
    {
        current = stripped;
        removed.push(artifact);
    }

    for markers in &rules.marker_pairs {
        let (stripped, count) = remove_all(&current, markers);
        if count > 0 {
            current = stripped;
            removed.push(LegacyArtifact::MarkerBlock {
                start_marker: markers.start().to_string(),
                count,
            });
        }
    }

    if !removed.is_empty() {
        tracing::debug!(?removed, "Stripped legacy artifacts");
    }

    Migration {
        content: current,
        removed,
    }
}
