//! Source positions and spans.
//!
//! The lexer owns a single mutable [`Position`] cursor; every token and
//! error stores an independent copy taken at the moment it is recorded,
//! so later cursor movement never changes an already-emitted span.

/// A line/column cursor into the character stream.
///
/// Lines and columns are 1-based. The all-zero value is reserved for
/// [`Span::INVALID`] and never produced by cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Start of input: line 1, column 1.
    pub const START: Position = Position { line: 1, column: 1 };

    /// Create a position at the given line and column.
    #[inline]
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    /// Advance the cursor over one character.
    ///
    /// `'\n'` moves to the next line, column 1. `'\r'` is a no-op so that
    /// CRLF input counts the same as LF input. Anything else moves one
    /// column to the right.
    pub fn advance(&mut self, ch: char) {
        match ch {
            '\n' => {
                self.line += 1;
                self.column = 1;
            }
            '\r' => {}
            _ => self.column += 1,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A start/end pair of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Sentinel span used when no real location is available.
    ///
    /// Both endpoints sit at 0:0, outside the 1-based domain of real
    /// positions.
    pub const INVALID: Span = Span {
        start: Position { line: 0, column: 0 },
        end: Position { line: 0, column: 0 },
    };

    /// Create a span from two positions.
    #[inline]
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Span collapsed onto a single position.
    #[inline]
    pub fn at(pos: Position) -> Self {
        Span { start: pos, end: pos }
    }

    /// Check whether this is the invalid sentinel.
    #[inline]
    pub fn is_invalid(&self) -> bool {
        *self == Span::INVALID
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_invalid() {
            write!(f, "<unknown>")
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}
