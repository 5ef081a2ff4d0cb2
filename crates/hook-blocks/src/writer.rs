//! Block writing functionality.
//!
//! Provides upsert and removal of marker-delimited blocks. All functions are
//! deterministic: identical inputs give byte-identical outputs.

use crate::error::Result;
use crate::markers::{Location, MarkerPair, locate};

/// What an upsert did to the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockChange {
    /// No usable block existed; a new one was appended.
    Inserted,
    /// An existing block was replaced with different content.
    Replaced,
    /// The existing block already matched byte-for-byte.
    Unchanged,
}

/// Result of [`upsert_block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upsert {
    pub content: String,
    pub change: BlockChange,
}

/// Result of [`remove_block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub content: String,
    pub removed: bool,
}

/// Render a complete block: start marker, body, end marker.
///
/// Trailing newlines of `body` are dropped so the rendering does not depend on
/// how the body was produced.
pub fn render_block(markers: &MarkerPair, body: &str) -> String {
    let body = body.trim_end_matches('\n');
    if body.is_empty() {
        format!("{}\n{}", markers.start(), markers.end())
    } else {
        format!("{}\n{}\n{}", markers.start(), body, markers.end())
    }
}

/// Inserts a new block or replaces an existing one.
///
/// If the block is found it is replaced in place; anything a user edited
/// between the markers is discarded. If it is absent or malformed (only one
/// marker, or markers out of order) a fresh block is appended after a single
/// blank line.
///
/// # Errors
/// Returns `Error::BodyContainsMarker` if `body` contains either marker.
///
/// # Example
/// ```
/// use hook_blocks::markers::MarkerPair;
/// use hook_blocks::writer::{BlockChange, upsert_block};
///
/// let markers = MarkerPair::new("# >>> demo >>>", "# <<< demo <<<").unwrap();
///
/// let first = upsert_block("alias ll='ls -la'\n", &markers, "source ~/demo.sh").unwrap();
/// assert_eq!(
///     first.content,
///     "alias ll='ls -la'\n\n# >>> demo >>>\nsource ~/demo.sh\n# <<< demo <<<\n"
/// );
///
/// let second = upsert_block(&first.content, &markers, "source ~/demo.sh").unwrap();
/// assert_eq!(second.change, BlockChange::Unchanged);
/// assert_eq!(second.content, first.content);
/// ```
pub fn upsert_block(content: &str, markers: &MarkerPair, body: &str) -> Result<Upsert> {
    markers.check_body(body)?;
    let block = render_block(markers, body);

    let upsert = match locate(content, markers) {
        Location::Found(span) => {
            if content[span.range()] == block {
                return Ok(Upsert {
                    content: content.to_string(),
                    change: BlockChange::Unchanged,
                });
            }

            let mut updated = String::with_capacity(content.len() + block.len());
            updated.push_str(&content[..span.start]);
            updated.push_str(&block);
            updated.push_str(&content[span.end..]);

            Upsert {
                content: updated,
                change: BlockChange::Replaced,
            }
        }
        location => {
            if location.is_malformed() {
                tracing::warn!(
                    ?location,
                    marker = markers.start(),
                    "Malformed block markers; appending a fresh block"
                );
            }
            Upsert {
                content: append_block(content, &block),
                change: BlockChange::Inserted,
            }
        }
    };
    Ok(upsert)
}

/// Append `block` so the previous content ends with exactly one newline,
/// followed by one blank separator line.
fn append_block(content: &str, block: &str) -> String {
    let head = content.trim_end_matches('\n');
    if head.is_empty() {
        format!("{}\n", block)
    } else {
        format!("{}\n\n{}\n", head, block)
    }
}

/// Removes a block from the content.
///
/// Deletes the block span together with the line break that terminates the
/// end marker and the blank separator line [`upsert_block`] puts in front of
/// an appended block. Content without a well-formed block is returned
/// unchanged.
///
/// # Example
/// ```
/// use hook_blocks::markers::MarkerPair;
/// use hook_blocks::writer::remove_block;
///
/// let markers = MarkerPair::new("# >>> demo >>>", "# <<< demo <<<").unwrap();
/// let content = "alias ll='ls -la'\n\n# >>> demo >>>\nsource ~/demo.sh\n# <<< demo <<<\n";
///
/// let removal = remove_block(content, &markers);
/// assert!(removal.removed);
/// assert_eq!(removal.content, "alias ll='ls -la'\n");
/// ```
pub fn remove_block(content: &str, markers: &MarkerPair) -> Removal {
    let Some(span) = locate(content, markers).span() else {
        return Removal {
            content: content.to_string(),
            removed: false,
        };
    };

    let mut before = &content[..span.start];
    let mut after = &content[span.end..];

    after = after
        .strip_prefix("\r\n")
        .or_else(|| after.strip_prefix('\n'))
        .unwrap_or(after);

    if before.trim_end_matches('\n').is_empty() {
        before = "";
    } else if before.ends_with("\n\n") {
        before = &before[..before.len() - 1];
    }

    Removal {
        content: format!("{}{}", before, after),
        removed: true,
    }
}

/// Removes every well-formed block delimited by `markers`.
///
/// Returns the new content and the number of blocks removed.
pub fn remove_all(content: &str, markers: &MarkerPair) -> (String, usize) {
    let mut current = content.to_string();
    let mut count = 0;

    loop {
        let removal = remove_block(&current, markers);
        if !removal.removed {
            return (current, count);
        }
        current = removal.content;
        count += 1;
    }
}
