/// Byte ranges of script lines, used to point diagnostics at the source
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Byte offsets of a region of the script source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Zero-width span at `offset`, used for "end of input" labels
    pub fn point(offset: usize) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Convert to a Range for use with ariadne
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_span_is_empty() {
        let span = Span::point(7);
        assert!(span.is_empty());
        assert_eq!(span.range(), 7..7);
    }

    #[test]
    fn test_range_conversion() {
        let span: Span = (3..9).into();
        assert_eq!(span.len(), 6);
        let range: Range<usize> = span.into();
        assert_eq!(range, 3..9);
    }
}
