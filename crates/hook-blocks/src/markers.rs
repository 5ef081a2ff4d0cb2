//! Marker pairs and block location.
//!
//! Markers are matched as literal substrings by byte offset. [`locate`]
//! classifies every marker layout into one of the [`Location`] cases so that
//! callers never do their own index arithmetic.

use std::ops::Range;

use crate::error::{Error, Result};

/// The literal start and end lines delimiting a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarkerPair {
    start: String,
    end: String,
}

impl MarkerPair {
    /// Create a marker pair.
    ///
    /// # Errors
    /// Returns `Error::InvalidMarkers` if either marker is empty or spans
    /// several lines, or if one marker contains the other (the locator could
    /// then mistake one for the other).
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Result<Self> {
        let start = start.into();
        let end = end.into();

        let reason = if start.trim().is_empty() || end.trim().is_empty() {
            Some("markers must not be empty")
        } else if start.contains('\n') || end.contains('\n') {
            Some("markers must be single lines")
        } else if start.contains(&end) || end.contains(&start) {
            Some("one marker must not contain the other")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(Error::InvalidMarkers { start, end, reason }),
            None => Ok(Self { start, end }),
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// Check that `body` can sit between these markers.
    ///
    /// A body containing either marker would be found as a block boundary
    /// by [`locate`] on the next run.
    pub fn check_body(&self, body: &str) -> Result<()> {
        for marker in [&self.start, &self.end] {
            if body.contains(marker.as_str()) {
                return Err(Error::BodyContainsMarker {
                    marker: marker.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Byte range of a block, from the first byte of the start marker up to and
/// including the last byte of the end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Where a marker pair sits in some content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Both markers present with the start before the end.
    Found(Span),
    /// Only the start marker is present.
    StartOnly(usize),
    /// Only the end marker is present.
    EndOnly(usize),
    /// Both markers are present but no end marker follows a start marker.
    Reversed { start: usize, end: usize },
    /// Neither marker is present.
    Absent,
}

impl Location {
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Found(span) => Some(*span),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Whether some marker text is present without forming a usable block.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::StartOnly(_) | Self::EndOnly(_) | Self::Reversed { .. }
        )
    }
}

/// Locate the block delimited by `markers` in `content`.
///
/// The block is the first end marker that has a start marker somewhere before
/// it, paired with the nearest such start marker. A stray start marker earlier
/// in the file is therefore never treated as the beginning of the block, and
/// the span can never swallow text between two unrelated markers.
///
/// # Example
/// ```
/// use hook_blocks::markers::{Location, MarkerPair, locate};
///
/// let markers = MarkerPair::new("# >>> demo >>>", "# <<< demo <<<").unwrap();
/// let content = "a\n# >>> demo >>>\nx\n# <<< demo <<<\n";
///
/// let span = locate(content, &markers).span().unwrap();
/// assert_eq!(&content[span.range()], "# >>> demo >>>\nx\n# <<< demo <<<");
/// ```
pub fn locate(content: &str, markers: &MarkerPair) -> Location {
    for (end_pos, _) in content.match_indices(markers.end()) {
        if let Some(start_pos) = content[..end_pos].rfind(markers.start()) {
            return Location::Found(Span {
                start: start_pos,
                end: end_pos + markers.end().len(),
            });
        }
    }

    match (content.find(markers.start()), content.find(markers.end())) {
        (None, None) => Location::Absent,
        (Some(start), None) => Location::StartOnly(start),
        (None, Some(end)) => Location::EndOnly(end),
        (Some(start), Some(end)) => Location::Reversed { start, end },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> MarkerPair {
        MarkerPair::new("# >>> demo >>>", "# <<< demo <<<").unwrap()
    }

    #[test]
    fn test_marker_pair_rejects_empty() {
        assert!(MarkerPair::new("", "# end").is_err());
        assert!(MarkerPair::new("# start", "   ").is_err());
    }

    #[test]
    fn test_marker_pair_rejects_nested() {
        assert!(MarkerPair::new("# tool", "# tool end").is_err());
        assert!(MarkerPair::new("# same", "# same").is_err());
    }

    #[test]
    fn test_marker_pair_rejects_multiline() {
        assert!(MarkerPair::new("# a\n# b", "# c").is_err());
    }

    #[test]
    fn test_check_body_rejects_either_marker() {
        let markers = demo();
        assert!(markers.check_body("source ~/demo.sh").is_ok());
        assert!(markers.check_body("# >>> demo >>>\nsource ~/demo.sh").is_err());
        assert!(markers.check_body("x # <<< demo <<< y").is_err());
    }

    #[test]
    fn test_locate_absent() {
        assert_eq!(locate("export A=1\n", &demo()), Location::Absent);
    }

    #[test]
    fn test_locate_found() {
        let content = "# >>> demo >>>\nbody\n# <<< demo <<<";
        assert_eq!(
            locate(content, &demo()),
            Location::Found(Span {
                start: 0,
                end: content.len()
            })
        );
    }

    #[test]
    fn test_locate_reversed() {
        let content = "# <<< demo <<<\n# >>> demo >>>\n";
        assert_eq!(
            locate(content, &demo()),
            Location::Reversed { start: 15, end: 0 }
        );
    }
}
