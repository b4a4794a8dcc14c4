//! ondo Core Parser
//!
//! Table-driven pushdown lexer and tree builder for labeled document
//! notations. Grammars arrive as precompiled tables; the crate executes
//! them lazily over a character stream and folds the resulting tokens
//! into a [`Document`] tree.
//!
//! # Architecture
//!
//! - **grammar.rs** - Terminal sets, matchers, productions, the
//!   [`GrammarTables`] seam
//! - **lexer.rs** - The pushdown automaton, a pull-based token iterator
//! - **tree.rs** - Token stream to [`Document`] tree assembly
//! - **document.rs** - The tree node: label, attribute multimap, children
//! - **shorthand.rs** - Validated single-character attribute shortcuts
//! - **builtin.rs** - A hand-compiled demonstration grammar
//! - **span.rs** - Position/Span types
//!
//! # Example
//!
//! ```
//! use ondo_core::{BuiltinGrammar, Parser};
//!
//! let parser = Parser::with_shorthands(
//!     BuiltinGrammar,
//!     vec![("#".to_string(), "id".to_string())],
//! )?;
//! let doc = parser.parse("greeting to='world' #main")?;
//! assert_eq!(doc.label(), Some("greeting"));
//! assert_eq!(doc.attribute("to"), Some("world"));
//! assert_eq!(doc.attribute("id"), Some("main"));
//! # Ok::<(), ondo_core::Error>(())
//! ```

pub mod builtin;
pub mod document;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod shorthand;
pub mod span;
pub mod stream;
pub mod token;
pub mod tree;

pub use builtin::BuiltinGrammar;
pub use document::{Child, Document};
pub use error::{ConfigError, Error, LexError, ParseError};
pub use grammar::{
    Capture, CharSet, GrammarTables, Matcher, Production, ProductionFactory, StateId,
    END_OF_STREAM_SET,
};
pub use lexer::Lexer;
pub use parser::Parser;
pub use shorthand::Shorthands;
pub use span::{Position, Span};
pub use stream::Lookahead;
pub use token::{CaptureSemantic, Token};
pub use tree::TreeBuilder;
