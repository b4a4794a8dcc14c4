//! Lexical tokens and their capture semantics.
//!
//! A [`Token`] is the unit passed from the lexer to the tree builder.
//! Its [`CaptureSemantic`] tag tells the builder how to interpret the
//! lexeme; the numeric identifiers behind the tags are part of the
//! contract with externally compiled grammar tables.

use crate::span::{Position, Span};
use crate::grammar::StateId;

/// The interpretation attached to a completed capture.
///
/// The discriminants are fixed: grammar tables are compiled against these
/// exact numbers, so they are a cross-boundary contract and must never be
/// renumbered. Use [`CaptureSemantic::from_id`] at the table boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CaptureSemantic {
    /// No semantic; the capture directives carry one forward.
    None = 0,
    /// Document label.
    Label = 1,
    /// Attribute name.
    Attribute = 2,
    /// Literal text (or an attribute value).
    Literal = 3,
    /// Attribute assignment marker.
    Assign = 4,
    /// Opens a nested subdocument.
    SubdocStart = 5,
    /// Closes the innermost open subdocument.
    SubdocEnd = 6,
    /// A registered single-character attribute shortcut.
    ShorthandSymbol = 7,
    /// The value following a shorthand symbol.
    ShorthandAttrib = 8,
}

impl CaptureSemantic {
    /// The fixed external identifier for this semantic.
    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a semantic by its external identifier.
    pub fn from_id(id: u8) -> Option<CaptureSemantic> {
        use CaptureSemantic::*;
        Some(match id {
            0 => None,
            1 => Label,
            2 => Attribute,
            3 => Literal,
            4 => Assign,
            5 => SubdocStart,
            6 => SubdocEnd,
            7 => ShorthandSymbol,
            8 => ShorthandAttrib,
            _ => return Option::None,
        })
    }
}

impl std::fmt::Display for CaptureSemantic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CaptureSemantic::None => "none",
            CaptureSemantic::Label => "label",
            CaptureSemantic::Attribute => "attribute",
            CaptureSemantic::Literal => "literal",
            CaptureSemantic::Assign => "assign",
            CaptureSemantic::SubdocStart => "subdoc-start",
            CaptureSemantic::SubdocEnd => "subdoc-end",
            CaptureSemantic::ShorthandSymbol => "shorthand-symbol",
            CaptureSemantic::ShorthandAttrib => "shorthand-attrib",
        };
        f.write_str(name)
    }
}

/// One completed capture, emitted exactly once by the lexer.
///
/// Immutable after creation. `start` and `end` are snapshots, not live
/// cursor references. `state` records the automaton state the emitting
/// production belonged to and exists purely for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub semantic: CaptureSemantic,
    pub lexeme: String,
    pub start: Position,
    pub end: Position,
    pub state: StateId,
}

impl Token {
    /// The span covered by this token.
    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}
