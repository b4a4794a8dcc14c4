//! The parser façade.
//!
//! A [`Parser`] materializes one grammar's tables plus a validated
//! shorthand configuration, then hands out any number of lexing passes
//! or full parses over independent inputs. The parser itself is
//! immutable after construction; each pass carries its own cursor and
//! stack state.

use std::collections::BTreeSet;

use tracing::debug;

use crate::document::Document;
use crate::error::{ConfigError, Error};
use crate::grammar::{CharSet, GrammarTables, Production, ProductionFactory, StateId};
use crate::lexer::Lexer;
use crate::shorthand::Shorthands;
use crate::stream::Lookahead;
use crate::tree::TreeBuilder;

/// A reusable parser for one grammar and shorthand configuration.
#[derive(Debug)]
pub struct Parser<G: GrammarTables> {
    grammar: G,
    sets: Vec<CharSet>,
    states: Vec<Vec<Production>>,
    end_states: BTreeSet<StateId>,
    shorthands: Shorthands,
}

impl<G: GrammarTables> Parser<G> {
    /// Build a parser with no shorthands registered.
    pub fn new(grammar: G) -> Self {
        match Self::with_shorthands(grammar, std::iter::empty()) {
            Ok(parser) => parser,
            // An empty shorthand table cannot fail validation.
            Err(_) => unreachable!("empty shorthand configuration rejected"),
        }
    }

    /// Build a parser, validating and registering shorthand pairs.
    ///
    /// The registered symbols extend this instance's terminal alphabet
    /// through the grammar's shorthand terminal set.
    pub fn with_shorthands(
        grammar: G,
        pairs: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, ConfigError> {
        let shorthands = Shorthands::validate(&grammar, pairs)?;
        let sets = grammar.terminal_sets(&shorthands.symbols());
        let states = grammar.states(&ProductionFactory::new());
        let end_states = grammar.end_states();
        debug!(
            states = states.len(),
            terminal_sets = sets.len(),
            shorthands = !shorthands.is_empty(),
            "parser tables materialized"
        );
        Ok(Parser { grammar, sets, states, end_states, shorthands })
    }

    /// The grammar this parser was built from.
    pub fn grammar(&self) -> &G {
        &self.grammar
    }

    /// The validated shorthand configuration.
    pub fn shorthands(&self) -> &Shorthands {
        &self.shorthands
    }

    /// Every character usable as a terminal by this instance: the
    /// grammar's base alphabet plus the registered shorthand symbols.
    pub fn terminals(&self) -> CharSet {
        self.grammar.terminals().union(&self.shorthands.symbols())
    }

    /// Start a lazy lexing pass over a character source.
    ///
    /// The source is read forward exactly once; the returned iterator
    /// yields tokens on demand and fuses after the first error.
    pub fn lex<I>(&self, input: I) -> Lexer<'_, I::IntoIter>
    where
        I: IntoIterator<Item = char>,
    {
        Lexer::new(
            &self.sets,
            &self.states,
            &self.end_states,
            Lookahead::new(input.into_iter()),
        )
    }

    /// Start a lazy lexing pass over a string slice.
    pub fn lex_str<'a>(&self, input: &'a str) -> Lexer<'_, std::str::Chars<'a>> {
        self.lex(input.chars())
    }

    /// Lex and build the document tree for a character source.
    pub fn parse_chars<I>(&self, input: I) -> Result<Document, Error>
    where
        I: IntoIterator<Item = char>,
    {
        TreeBuilder::new(&self.shorthands).build(self.lex(input))
    }

    /// Lex and build the document tree for a string slice.
    pub fn parse(&self, input: &str) -> Result<Document, Error> {
        self.parse_chars(input.chars())
    }
}
