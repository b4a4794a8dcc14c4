//! Token-to-tree assembly.
//!
//! The builder folds the token stream into a [`Document`] tree with a
//! stack of open documents: subdocument-start pushes a fresh node,
//! subdocument-end pops it and attaches it to the node below. One token
//! of lookahead pairs attribute names with their assigned values and
//! shorthand symbols with their trailing value.

use std::iter::Peekable;

use tracing::trace;

use crate::document::Document;
use crate::error::{Error, LexError, ParseError};
use crate::shorthand::Shorthands;
use crate::token::{CaptureSemantic, Token};

/// Folds a token stream into a single root [`Document`].
pub struct TreeBuilder<'s> {
    shorthands: &'s Shorthands,
    /// Open documents, innermost on top. Never empty while building.
    stack: Vec<Document>,
}

impl<'s> TreeBuilder<'s> {
    /// Start a build against a shorthand configuration.
    pub fn new(shorthands: &'s Shorthands) -> Self {
        TreeBuilder { shorthands, stack: vec![Document::new()] }
    }

    /// Consume the token stream and return the completed root document.
    ///
    /// Lexer errors pass through unchanged; structural errors abort the
    /// build at the offending token.
    pub fn build(
        mut self,
        tokens: impl IntoIterator<Item = Result<Token, LexError>>,
    ) -> Result<Document, Error> {
        let mut tokens = tokens.into_iter().peekable();

        while let Some(token) = tokens.next() {
            let token = token?;
            trace!(semantic = %token.semantic, lexeme = %token.lexeme, depth = self.stack.len(), "fold");
            self.fold(token, &mut tokens)?;
        }

        // Every opened subdocument must have been closed.
        if self.stack.len() > 1 {
            return Err(ParseError::UnclosedSubdocument { open: self.stack.len() - 1 }.into());
        }
        // Seeded with the root and only ever popped behind a length
        // check, so the stack cannot be empty here.
        self.stack.pop().ok_or(ParseError::UnclosedSubdocument { open: 0 }.into())
    }

    fn fold<T>(&mut self, token: Token, tokens: &mut Peekable<T>) -> Result<(), Error>
    where
        T: Iterator<Item = Result<Token, LexError>>,
    {
        match token.semantic {
            CaptureSemantic::Label => {
                self.top()
                    .set_label(token.lexeme.as_str())
                    .map_err(|e| e.with_span(token.span()))?;
            }

            CaptureSemantic::Literal => {
                self.top().push_text(token.lexeme);
            }

            CaptureSemantic::Attribute => {
                let value = self.take_assigned_value(tokens)?;
                self.top().add_attribute(&token.lexeme, value.as_deref().unwrap_or(""));
            }

            CaptureSemantic::ShorthandSymbol => {
                let span = token.span();
                let Some(name) = self.shorthands.expand(&token.lexeme) else {
                    return Err(ParseError::UnknownShorthand { symbol: token.lexeme, span }.into());
                };
                let name = name.to_string();
                let value = match tokens.next() {
                    Some(Ok(value)) if value.semantic == CaptureSemantic::ShorthandAttrib => value,
                    Some(Err(e)) => return Err(e.into()),
                    _ => {
                        return Err(ParseError::DanglingShorthand { span }.into());
                    }
                };
                self.top().add_attribute(&name, &value.lexeme);
            }

            CaptureSemantic::SubdocStart => {
                self.stack.push(Document::new());
            }

            CaptureSemantic::SubdocEnd => {
                if self.stack.len() == 1 {
                    return Err(ParseError::UnbalancedSubdocEnd { span: token.span() }.into());
                }
                // Length checked above.
                if let Some(done) = self.stack.pop() {
                    self.top().push_document(done);
                }
            }

            // Assign and shorthand-attrib tokens are consumed by the
            // lookahead arms above; reaching one here means the grammar
            // emitted it without its introducing token.
            CaptureSemantic::None
            | CaptureSemantic::Assign
            | CaptureSemantic::ShorthandAttrib => {
                return Err(ParseError::UnexpectedToken {
                    semantic: token.semantic,
                    span: token.span(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// If the next token is an assignment, consume it and require the
    /// literal value behind it. A bare attribute name yields `None`.
    fn take_assigned_value<T>(&mut self, tokens: &mut Peekable<T>) -> Result<Option<String>, Error>
    where
        T: Iterator<Item = Result<Token, LexError>>,
    {
        let Some(assign) = tokens
            .next_if(|t| matches!(t, Ok(t) if t.semantic == CaptureSemantic::Assign))
        else {
            return Ok(None);
        };
        let assign = assign?;

        match tokens.next() {
            Some(Ok(value)) if value.semantic == CaptureSemantic::Literal => {
                Ok(Some(value.lexeme))
            }
            Some(Err(e)) => Err(e.into()),
            _ => Err(ParseError::MissingAttributeValue { span: assign.span() }.into()),
        }
    }

    fn top(&mut self) -> &mut Document {
        // Invariant upheld in fold: the root is never popped.
        self.stack.last_mut().unwrap_or_else(|| unreachable!())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::{Position, Span};
    use pretty_assertions::assert_eq;

    fn tok(semantic: CaptureSemantic, lexeme: &str) -> Result<Token, LexError> {
        Ok(Token {
            semantic,
            lexeme: lexeme.to_string(),
            start: Position::START,
            end: Position::START,
            state: 0,
        })
    }

    fn build(tokens: Vec<Result<Token, LexError>>) -> Result<Document, Error> {
        TreeBuilder::new(&Shorthands::default()).build(tokens)
    }

    #[test]
    fn test_label_and_literal() {
        let doc = build(vec![
            tok(CaptureSemantic::Label, "note"),
            tok(CaptureSemantic::Literal, "hello"),
        ])
        .unwrap();
        assert_eq!(doc.label(), Some("note"));
        assert_eq!(doc.children()[0].as_text(), Some("hello"));
    }

    #[test]
    fn test_attribute_with_assigned_value() {
        let doc = build(vec![
            tok(CaptureSemantic::Attribute, "to"),
            tok(CaptureSemantic::Assign, "="),
            tok(CaptureSemantic::Literal, "world"),
        ])
        .unwrap();
        assert_eq!(doc.attribute("to"), Some("world"));
        assert!(doc.children().is_empty());
    }

    #[test]
    fn test_bare_attribute_gets_empty_value() {
        let doc = build(vec![tok(CaptureSemantic::Attribute, "draft")]).unwrap();
        assert_eq!(doc.attribute("draft"), Some(""));
    }

    #[test]
    fn test_assignment_without_value_fails() {
        let err = build(vec![
            tok(CaptureSemantic::Attribute, "to"),
            tok(CaptureSemantic::Assign, "="),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::MissingAttributeValue { .. })
        ));
    }

    #[test]
    fn test_subdocument_nesting() {
        let doc = build(vec![
            tok(CaptureSemantic::Label, "outer"),
            tok(CaptureSemantic::SubdocStart, "<"),
            tok(CaptureSemantic::Label, "inner"),
            tok(CaptureSemantic::SubdocEnd, ">"),
        ])
        .unwrap();
        assert_eq!(doc.label(), Some("outer"));
        let inner = doc.child_documents().next().unwrap();
        assert_eq!(inner.label(), Some("inner"));
    }

    #[test]
    fn test_unbalanced_end_fails() {
        let err = build(vec![tok(CaptureSemantic::SubdocEnd, ">")]).unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::UnbalancedSubdocEnd { .. })
        ));
    }

    #[test]
    fn test_unclosed_subdocument_fails() {
        let err = build(vec![
            tok(CaptureSemantic::SubdocStart, "<"),
            tok(CaptureSemantic::SubdocStart, "<"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            Error::Parse(ParseError::UnclosedSubdocument { open: 2 })
        );
    }

    #[test]
    fn test_second_label_fails() {
        let err = build(vec![
            tok(CaptureSemantic::Label, "one"),
            tok(CaptureSemantic::Label, "two"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::LabelAlreadySet { .. })));
    }

    #[test]
    fn test_shorthand_expands_to_attribute() {
        let grammar = crate::builtin::BuiltinGrammar;
        let shorthands = Shorthands::validate(
            &grammar,
            vec![("#".to_string(), "id".to_string())],
        )
        .unwrap();
        let doc = TreeBuilder::new(&shorthands)
            .build(vec![
                tok(CaptureSemantic::ShorthandSymbol, "#"),
                tok(CaptureSemantic::ShorthandAttrib, "main"),
            ])
            .unwrap();
        assert_eq!(doc.attribute("id"), Some("main"));
    }

    #[test]
    fn test_unknown_shorthand_fails() {
        let err = build(vec![
            tok(CaptureSemantic::ShorthandSymbol, "#"),
            tok(CaptureSemantic::ShorthandAttrib, "main"),
        ])
        .unwrap_err();
        // The error keeps both the offending symbol and its location.
        match err {
            Error::Parse(ParseError::UnknownShorthand { symbol, span }) => {
                assert_eq!(symbol, "#");
                assert_eq!(span, Span::at(Position::START));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dangling_shorthand_fails() {
        let grammar = crate::builtin::BuiltinGrammar;
        let shorthands = Shorthands::validate(
            &grammar,
            vec![("#".to_string(), "id".to_string())],
        )
        .unwrap();
        let err = TreeBuilder::new(&shorthands)
            .build(vec![tok(CaptureSemantic::ShorthandSymbol, "#")])
            .unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::DanglingShorthand { .. })));
    }

    #[test]
    fn test_lex_error_passes_through() {
        let err = build(vec![Err(LexError::TrailingInput {
            current: 'x',
            at: Position::START,
        })])
        .unwrap_err();
        assert!(matches!(err, Error::Lex(LexError::TrailingInput { .. })));
    }
}
