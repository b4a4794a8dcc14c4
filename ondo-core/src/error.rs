//! Error types.
//!
//! Lexing and parsing failures are fatal to the pass that raised them;
//! there is no recovery or resynchronization. Shorthand validation
//! failures are configuration errors raised before any stream work
//! starts.

use thiserror::Error;

use crate::grammar::StateId;
use crate::span::{Position, Span};
use crate::token::CaptureSemantic;

/// A failure while driving the automaton over the character stream.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// No production in the current state accepted the character pair.
    #[error("no production matches {current:?} (lookahead {}) in state {state} at {span}", fmt_lookahead(.lookahead))]
    NoMatch {
        current: char,
        /// `None` means the lookahead slot was end of stream.
        lookahead: Option<char>,
        state: StateId,
        /// From the last open capture start, or collapsed onto the
        /// current position when no capture was open.
        span: Span,
    },

    /// Input ended while a non-accepting state was on top of the stack.
    #[error("unexpected end of input in state {state} at {at}")]
    UnexpectedEndOfInput { state: StateId, at: Position },

    /// Characters remained after the automaton stack emptied.
    #[error("trailing input {current:?} after automaton completed at {at}")]
    TrailingInput { current: char, at: Position },
}

fn fmt_lookahead(lookahead: &Option<char>) -> String {
    match lookahead {
        Some(ch) => format!("{ch:?}"),
        None => "<end of stream>".to_string(),
    }
}

impl LexError {
    /// The span or position the error points at.
    pub fn span(&self) -> Span {
        match self {
            LexError::NoMatch { span, .. } => *span,
            LexError::UnexpectedEndOfInput { at, .. } | LexError::TrailingInput { at, .. } => {
                Span::at(*at)
            }
        }
    }
}

/// A structurally invalid token sequence reaching the tree builder.
///
/// Well-formed grammars do not produce these sequences; the builder
/// re-validates anyway.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("label already set at {span}")]
    LabelAlreadySet { span: Span },

    #[error("subdocument end with no open subdocument at {span}")]
    UnbalancedSubdocEnd { span: Span },

    #[error("attribute assignment without a literal value at {span}")]
    MissingAttributeValue { span: Span },

    #[error("shorthand symbol without a following shorthand value at {span}")]
    DanglingShorthand { span: Span },

    #[error("no expansion registered for shorthand symbol {symbol:?} at {span}")]
    UnknownShorthand { symbol: String, span: Span },

    #[error("unexpected {semantic} token at {span}")]
    UnexpectedToken { semantic: CaptureSemantic, span: Span },

    #[error("{open} subdocument(s) left open at end of input")]
    UnclosedSubdocument { open: usize },
}

impl ParseError {
    /// The span the error points at ([`Span::INVALID`] when none is
    /// available).
    pub fn span(&self) -> Span {
        match self {
            ParseError::LabelAlreadySet { span }
            | ParseError::UnbalancedSubdocEnd { span }
            | ParseError::MissingAttributeValue { span }
            | ParseError::DanglingShorthand { span }
            | ParseError::UnknownShorthand { span, .. }
            | ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::UnclosedSubdocument { .. } => Span::INVALID,
        }
    }

    /// Fill in the span if the error was raised without one.
    pub(crate) fn with_span(self, span: Span) -> ParseError {
        match self {
            ParseError::LabelAlreadySet { span: old } if old.is_invalid() => {
                ParseError::LabelAlreadySet { span }
            }
            other => other,
        }
    }
}

/// A rejected shorthand configuration, raised at parser construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("shorthand symbol {symbol:?} must be exactly one character")]
    SymbolNotSingleChar { symbol: String },

    #[error("shorthand symbol {symbol:?} has an empty expansion")]
    EmptyExpansion { symbol: String },

    #[error("shorthand symbol {symbol:?} is outside the grammar's allowable shorthand set")]
    DisallowedSymbol { symbol: char },

    #[error("expansion for {symbol:?} contains disallowed character {ch:?}")]
    DisallowedExpansionChar { symbol: char, ch: char },
}

/// Any failure surfaced by [`Parser`](crate::Parser) entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
