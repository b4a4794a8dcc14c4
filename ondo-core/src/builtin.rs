//! Built-in document notation.
//!
//! A small hand-compiled grammar exercising every table feature. The
//! notation: the first word of a document is its label, later bare words
//! are flag attributes, `name='value'` assigns an attribute value,
//! `'text'` is a literal child, `<` and `>` delimit subdocuments, and a
//! registered shorthand symbol followed by a word records the expanded
//! attribute:
//!
//! ```text
//! greeting to='world' #main < note 'hello' >
//! ```

use std::collections::BTreeSet;

use crate::grammar::{
    Capture, CharSet, GrammarTables, Matcher, Production, ProductionFactory, StateId,
};
use crate::token::CaptureSemantic;

// Terminal set ids. Id 1 is the reserved end-of-stream set.
const LETTER: usize = 2;
const WHITESPACE: usize = 3;
const QUOTE: usize = 4;
const EQUALS: usize = 5;
const OPEN: usize = 6;
const CLOSE: usize = 7;
const SHORTHAND: usize = 8;

// State ids.
const DOC_START: StateId = 0;
const LABEL_REST: StateId = 1;
const BODY: StateId = 2;
const ATTR_REST: StateId = 3;
const ASSIGN: StateId = 4;
const LIT_OPEN: StateId = 5;
const LIT_BODY: StateId = 6;
const SH_FIRST: StateId = 7;
const SH_REST: StateId = 8;

/// Matcher accepting any slot, present or absent.
fn any() -> Matcher {
    // Set 0 is empty, so the inverted test always passes.
    Matcher::not(0)
}

/// Tables for the built-in notation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinGrammar;

impl GrammarTables for BuiltinGrammar {
    fn terminal_sets(&self, extra_shorthand: &CharSet) -> Vec<CharSet> {
        vec![
            CharSet::new(),
            CharSet::new(),
            CharSet::range('a', 'z'),
            CharSet::of(" \t\r\n"),
            CharSet::of("'"),
            CharSet::of("="),
            CharSet::of("<"),
            CharSet::of(">"),
            extra_shorthand.clone(),
        ]
    }

    fn terminals(&self) -> CharSet {
        CharSet::range('a', 'z')
            .union(&CharSet::of(" \t\r\n"))
            .union(&CharSet::of("'=<>"))
    }

    fn allowable_shorthand_symbol(&self, ch: char) -> bool {
        ch.is_ascii_lowercase() || "#.@!%~+*".contains(ch)
    }

    fn states(&self, f: &ProductionFactory) -> Vec<Vec<Production>> {
        let letter = Matcher::of(LETTER);
        let not_letter = Matcher::not(LETTER);
        let ws = Matcher::of(WHITESPACE);
        let quote = Matcher::of(QUOTE);
        let equals = Matcher::of(EQUALS);
        let open = Matcher::of(OPEN);
        let close = Matcher::of(CLOSE);
        let shorthand = Matcher::of(SHORTHAND);

        vec![
            // DOC_START: leading whitespace, then the label word. A bare
            // `>` closes a label-less subdocument.
            vec![
                f.production(ws, any(), &[DOC_START], Capture::NONE),
                f.production(
                    letter,
                    letter,
                    &[LABEL_REST, BODY],
                    Capture::begin(CaptureSemantic::Label),
                ),
                f.production(letter, not_letter, &[BODY], Capture::single(CaptureSemantic::Label)),
                f.production(close, any(), &[], Capture::single(CaptureSemantic::SubdocEnd)),
            ],
            // LABEL_REST: remaining label characters.
            vec![
                f.production(letter, letter, &[LABEL_REST], Capture::take()),
                f.production(letter, not_letter, &[], Capture::finish(CaptureSemantic::None)),
            ],
            // BODY: everything after the label. Registered shorthand
            // symbols are tried before attribute words, and the `=`
            // lookahead is tried before the catch-all word end, so
            // table order carries the disambiguation.
            vec![
                f.production(ws, any(), &[BODY], Capture::NONE),
                f.production(
                    shorthand,
                    any(),
                    &[SH_FIRST, BODY],
                    Capture::single(CaptureSemantic::ShorthandSymbol),
                ),
                f.production(
                    letter,
                    letter,
                    &[ATTR_REST, BODY],
                    Capture::begin(CaptureSemantic::Attribute),
                ),
                f.production(
                    letter,
                    equals,
                    &[ASSIGN, BODY],
                    Capture::single(CaptureSemantic::Attribute),
                ),
                f.production(
                    letter,
                    not_letter,
                    &[BODY],
                    Capture::single(CaptureSemantic::Attribute),
                ),
                f.production(
                    quote,
                    any(),
                    &[LIT_BODY, BODY],
                    Capture::mark(CaptureSemantic::Literal),
                ),
                f.production(
                    open,
                    any(),
                    &[DOC_START, BODY],
                    Capture::single(CaptureSemantic::SubdocStart),
                ),
                f.production(close, any(), &[], Capture::single(CaptureSemantic::SubdocEnd)),
            ],
            // ATTR_REST: remaining attribute word characters.
            vec![
                f.production(letter, letter, &[ATTR_REST], Capture::take()),
                f.production(letter, equals, &[ASSIGN], Capture::finish(CaptureSemantic::None)),
                f.production(letter, not_letter, &[], Capture::finish(CaptureSemantic::None)),
            ],
            // ASSIGN: the `=` itself; a quoted value must follow.
            vec![f.production(equals, quote, &[LIT_OPEN], Capture::single(CaptureSemantic::Assign))],
            // LIT_OPEN: opening quote of an assigned value; the quote is
            // not part of the lexeme.
            vec![f.production(quote, any(), &[LIT_BODY], Capture::mark(CaptureSemantic::Literal))],
            // LIT_BODY: anything up to the closing quote.
            vec![
                f.production(quote, any(), &[], Capture::close(CaptureSemantic::None)),
                f.production(Matcher::not(QUOTE), any(), &[LIT_BODY], Capture::take()),
            ],
            // SH_FIRST: first character of a shorthand value word.
            vec![
                f.production(
                    letter,
                    letter,
                    &[SH_REST],
                    Capture::begin(CaptureSemantic::ShorthandAttrib),
                ),
                f.production(
                    letter,
                    not_letter,
                    &[],
                    Capture::single(CaptureSemantic::ShorthandAttrib),
                ),
            ],
            // SH_REST: remaining shorthand value characters.
            vec![
                f.production(letter, letter, &[SH_REST], Capture::take()),
                f.production(letter, not_letter, &[], Capture::finish(CaptureSemantic::None)),
            ],
        ]
    }

    fn end_states(&self) -> BTreeSet<StateId> {
        BTreeSet::from([DOC_START, BODY])
    }
}
