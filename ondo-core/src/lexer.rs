//! Table-driven pushdown lexer.
//!
//! The lexer drives a stack of state ids over the character stream. Each
//! `(current, lookahead)` pair selects the first production of the
//! top-of-stack state whose matchers accept both slots; the production's
//! capture directive may open, extend or emit a token, and its successor
//! states replace the consumed state on the stack.
//!
//! Tokens come out of a lazy, pull-based iterator: the automaton only
//! advances when the consumer asks for the next token, suspending at
//! token boundaries. A pass is single forward and not restartable; the
//! first error fuses the iterator.

use std::collections::BTreeSet;

use tracing::trace;

use crate::error::LexError;
use crate::grammar::{CharSet, Production, StateId};
use crate::span::{Position, Span};
use crate::stream::Lookahead;
use crate::token::{CaptureSemantic, Token};

/// Lazily lexes one character stream against materialized grammar
/// tables. Created by [`Parser::lex`](crate::Parser::lex).
pub struct Lexer<'g, I: Iterator<Item = char>> {
    sets: &'g [CharSet],
    states: &'g [Vec<Production>],
    end_states: &'g BTreeSet<StateId>,
    input: Lookahead<I>,
    /// Automaton stack; the top state's production list is scanned for
    /// each input pair.
    stack: Vec<StateId>,
    cursor: Position,
    buffer: String,
    capture_start: Option<Position>,
    pending: CaptureSemantic,
    finished: bool,
}

impl<'g, I: Iterator<Item = char>> Lexer<'g, I> {
    pub(crate) fn new(
        sets: &'g [CharSet],
        states: &'g [Vec<Production>],
        end_states: &'g BTreeSet<StateId>,
        input: Lookahead<I>,
    ) -> Self {
        Lexer {
            sets,
            states,
            end_states,
            input,
            stack: vec![0],
            cursor: Position::START,
            buffer: String::new(),
            capture_start: None,
            pending: CaptureSemantic::None,
            finished: false,
        }
    }

    /// The cursor position after the last consumed character.
    pub fn position(&self) -> Position {
        self.cursor
    }

    fn no_match_span(&self) -> Span {
        match self.capture_start {
            Some(start) => Span::new(start, self.cursor),
            None => Span::at(self.cursor),
        }
    }
}

impl<'g, I: Iterator<Item = char>> Iterator for Lexer<'g, I> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Result<Token, LexError>> {
        if self.finished {
            return None;
        }

        loop {
            let Some((current, lookahead)) = self.input.next() else {
                // Stream exhausted: the top of the stack decides whether
                // this is a clean end.
                self.finished = true;
                if let Some(&state) = self.stack.last() {
                    if !self.end_states.contains(&state) {
                        return Some(Err(LexError::UnexpectedEndOfInput {
                            state,
                            at: self.cursor,
                        }));
                    }
                }
                return None;
            };

            // The cursor moves over `current` before it is matched, so
            // recorded positions sit just past the consumed character.
            self.cursor.advance(current);

            let Some(&state) = self.stack.last() else {
                self.finished = true;
                return Some(Err(LexError::TrailingInput { current, at: self.cursor }));
            };

            // Borrow the table through 'g so the stack can be mutated
            // while the production is held.
            let table: &'g [Vec<Production>] = self.states;
            let productions = table.get(state).map(Vec::as_slice).unwrap_or(&[]);

            // First-match rule: ambiguous grammars resolve in table order.
            let Some(production) = productions.iter().find(|p| {
                p.current.accepts(self.sets, Some(current))
                    && p.lookahead.accepts(self.sets, lookahead)
            }) else {
                self.finished = true;
                return Some(Err(LexError::NoMatch {
                    current,
                    lookahead,
                    state,
                    span: self.no_match_span(),
                }));
            };

            let capture = production.capture;
            if capture.start {
                self.buffer.clear();
                self.capture_start = Some(self.cursor);
                self.pending = capture.semantic;
            }
            if capture.take {
                self.buffer.push(current);
            }

            let mut emitted = None;
            if capture.end {
                // The ending production's semantic wins when it carries
                // one; otherwise the semantic recorded at capture start.
                let semantic = if capture.semantic != CaptureSemantic::None {
                    capture.semantic
                } else {
                    self.pending
                };
                let start = self.capture_start.take().unwrap_or(self.cursor);
                emitted = Some(Token {
                    semantic,
                    lexeme: std::mem::take(&mut self.buffer),
                    start,
                    end: self.cursor,
                    state,
                });
                self.pending = CaptureSemantic::None;
            }

            self.stack.pop();
            self.stack.extend_from_slice(production.push_order());

            if let Some(token) = emitted {
                trace!(state, semantic = %token.semantic, lexeme = %token.lexeme, "token");
                return Some(Ok(token));
            }
        }
    }
}

impl<'g, I: Iterator<Item = char>> std::iter::FusedIterator for Lexer<'g, I> {}
