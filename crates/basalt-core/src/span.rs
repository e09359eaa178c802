//! Source location tracking for declaration records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in a specification file (1-based line and column plus byte offset).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Location {
    #[must_use]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// The region of a specification file a declaration was parsed from.
///
/// Records built by hand (tests, generated declarations) use
/// [`Span::default`], which points at the start of the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    #[must_use]
    pub const fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// Creates a zero-width span at the given line and column.
    #[must_use]
    pub const fn point(line: usize, column: usize) -> Self {
        let location = Location::new(line, column, 0);
        Self {
            start: location,
            end: location,
        }
    }

    /// Creates a span from byte offsets only.
    #[must_use]
    pub const fn from_range(start: usize, end: usize) -> Self {
        Self {
            start: Location::new(0, 0, start),
            end: Location::new(0, 0, end),
        }
    }

    /// Byte length of the span.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start.line, self.start.column)
    }
}
