//! Integration tests for end-to-end parsing with the built-in notation.
//!
//! Organized by construct, from simplest to most complex, finishing
//! with the error paths. Each test goes through the full pipeline:
//! character stream, lexer, tree builder.

use ondo_core::{BuiltinGrammar, Document, Error, LexError, ParseError, Parser};
use pretty_assertions::assert_eq;

// =============================================================================
// Test Helpers
// =============================================================================

fn parse(input: &str) -> Result<Document, Error> {
    Parser::new(BuiltinGrammar).parse(input)
}

/// Parser with `#` bound to `id` and `.` bound to `class`.
fn parser_with_shorthands() -> Parser<BuiltinGrammar> {
    Parser::with_shorthands(
        BuiltinGrammar,
        vec![
            ("#".to_string(), "id".to_string()),
            (".".to_string(), "class".to_string()),
        ],
    )
    .unwrap()
}

// =============================================================================
// Labels
// =============================================================================

#[test]
fn empty_input_yields_empty_root() {
    let doc = parse("").unwrap();
    assert_eq!(doc.label(), None);
    assert!(doc.children().is_empty());
    assert!(doc.split_attributes().is_empty());
}

#[test]
fn whitespace_only_input_yields_empty_root() {
    let doc = parse("  \n\t ").unwrap();
    assert_eq!(doc.label(), None);
}

#[test]
fn first_word_is_the_label() {
    let doc = parse("greeting").unwrap();
    assert_eq!(doc.label(), Some("greeting"));
}

#[test]
fn single_character_label() {
    let doc = parse("x").unwrap();
    assert_eq!(doc.label(), Some("x"));
}

#[test]
fn leading_whitespace_is_skipped() {
    let doc = parse("  \n greeting").unwrap();
    assert_eq!(doc.label(), Some("greeting"));
}

// =============================================================================
// Attributes
// =============================================================================

#[test]
fn bare_words_after_label_are_flag_attributes() {
    let doc = parse("doc draft hidden").unwrap();
    assert_eq!(doc.attribute("draft"), Some(""));
    assert_eq!(doc.attribute("hidden"), Some(""));
    assert_eq!(doc.split_attributes().len(), 2);
}

#[test]
fn assigned_attribute_takes_quoted_value() {
    let doc = parse("greeting to='world'").unwrap();
    assert_eq!(doc.attribute("to"), Some("world"));
}

#[test]
fn single_character_attribute_name() {
    let doc = parse("doc k='v'").unwrap();
    assert_eq!(doc.attribute("k"), Some("v"));
}

#[test]
fn repeated_attribute_values_join_with_space() {
    let doc = parse("doc k='one' k='two'").unwrap();
    assert_eq!(doc.attribute("k"), Some("one two"));
    assert_eq!(doc.split_attributes()["k"], vec!["one", "two"]);
}

#[test]
fn attribute_value_may_contain_spaces_and_newlines() {
    let doc = parse("doc msg='hello there\neveryone'").unwrap();
    assert_eq!(doc.attribute("msg"), Some("hello there\neveryone"));
}

#[test]
fn empty_quoted_value_records_empty_string() {
    let doc = parse("doc k=''").unwrap();
    assert_eq!(doc.attribute("k"), Some(""));
    assert!(doc.split_attributes().contains_key("k"));
}

#[test]
fn attribute_order_is_preserved() {
    let doc = parse("doc zeta='1' alpha='2' mid").unwrap();
    let names: Vec<_> = doc.attributes().keys().cloned().collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn quoted_text_becomes_a_text_child() {
    let doc = parse("note 'hello world'").unwrap();
    assert_eq!(doc.children().len(), 1);
    assert_eq!(doc.children()[0].as_text(), Some("hello world"));
}

#[test]
fn multiple_literals_stay_in_order() {
    let doc = parse("note 'one' 'two' 'three'").unwrap();
    let texts: Vec<_> = doc.children().iter().filter_map(|c| c.as_text()).collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
}

#[test]
fn empty_literal_is_kept() {
    let doc = parse("note ''").unwrap();
    assert_eq!(doc.children()[0].as_text(), Some(""));
}

// =============================================================================
// Subdocuments
// =============================================================================

#[test]
fn angle_brackets_nest_a_child_document() {
    let doc = parse("outer < inner >").unwrap();
    assert_eq!(doc.label(), Some("outer"));
    let children: Vec<_> = doc.child_documents().collect();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].label(), Some("inner"));
}

#[test]
fn text_and_children_interleave_in_order() {
    let doc = parse("outer 'before' < inner > 'after'").unwrap();
    assert_eq!(doc.children().len(), 3);
    assert_eq!(doc.children()[0].as_text(), Some("before"));
    assert!(doc.children()[1].as_document().is_some());
    assert_eq!(doc.children()[2].as_text(), Some("after"));
}

#[test]
fn subdocuments_nest_recursively() {
    let doc = parse("a < b < c < d > > >").unwrap();
    let b = doc.child_documents().next().unwrap();
    let c = b.child_documents().next().unwrap();
    let d = c.child_documents().next().unwrap();
    assert_eq!(d.label(), Some("d"));
    assert!(d.children().is_empty());
}

#[test]
fn label_less_child_is_allowed() {
    let doc = parse("outer < >").unwrap();
    let child = doc.child_documents().next().unwrap();
    assert_eq!(child.label(), None);
}

#[test]
fn siblings_attach_to_the_same_parent() {
    let doc = parse("root < one > < two > < three >").unwrap();
    let labels: Vec<_> = doc.child_documents().map(|d| d.label().unwrap()).collect();
    assert_eq!(labels, vec!["one", "two", "three"]);
}

#[test]
fn children_carry_their_own_attributes() {
    let doc = parse("outer shared='x' < inner own='y' >").unwrap();
    assert_eq!(doc.attribute("shared"), Some("x"));
    assert_eq!(doc.attribute("own"), None);
    let inner = doc.child_documents().next().unwrap();
    assert_eq!(inner.attribute("own"), Some("y"));
    assert_eq!(inner.attribute("shared"), None);
}

#[test]
fn all_text_flattens_the_subtree() {
    let doc = parse("a 'x' < b 'y' < c 'z' > >").unwrap();
    assert_eq!(doc.all_text(), "xyz");
}

// =============================================================================
// Shorthands
// =============================================================================

#[test]
fn shorthand_symbol_expands_to_attribute_name() {
    let doc = parser_with_shorthands().parse("greeting #main").unwrap();
    assert_eq!(doc.attribute("id"), Some("main"));
    assert_eq!(doc.attribute("#"), None);
}

#[test]
fn multiple_shorthands_in_one_document() {
    let doc = parser_with_shorthands().parse("widget #root .wide .tall").unwrap();
    assert_eq!(doc.attribute("id"), Some("root"));
    assert_eq!(doc.attribute("class"), Some("wide tall"));
}

#[test]
fn shorthands_work_inside_subdocuments() {
    let doc = parser_with_shorthands().parse("outer < inner #nested >").unwrap();
    let inner = doc.child_documents().next().unwrap();
    assert_eq!(inner.attribute("id"), Some("nested"));
}

#[test]
fn unregistered_symbol_is_a_lex_error() {
    // Without a registration `#` is not a terminal at all.
    let err = parse("greeting #main").unwrap_err();
    assert!(matches!(err, Error::Lex(LexError::NoMatch { current: '#', .. })));
}

#[test]
fn shorthand_registration_is_per_parser_instance() {
    let with = parser_with_shorthands();
    let without = Parser::new(BuiltinGrammar);
    assert!(with.parse("greeting #main").is_ok());
    assert!(without.parse("greeting #main").is_err());
}

// =============================================================================
// The Whole Notation
// =============================================================================

#[test]
fn kitchen_sink_document() {
    let input = "page title='home' #main draft <\n  section .intro 'welcome'\n  < item n='1' >\n>";
    let doc = parser_with_shorthands().parse(input).unwrap();

    assert_eq!(doc.label(), Some("page"));
    assert_eq!(doc.attribute("title"), Some("home"));
    assert_eq!(doc.attribute("id"), Some("main"));
    assert_eq!(doc.attribute("draft"), Some(""));

    let section = doc.child_documents().next().unwrap();
    assert_eq!(section.label(), Some("section"));
    assert_eq!(section.attribute("class"), Some("intro"));
    assert_eq!(section.children()[0].as_text(), Some("welcome"));

    let item = section.child_documents().next().unwrap();
    assert_eq!(item.label(), Some("item"));
    assert_eq!(item.attribute("n"), Some("1"));
}

// =============================================================================
// Error Paths
// =============================================================================

#[test]
fn unclosed_subdocument_fails() {
    let err = parse("outer < inner").unwrap_err();
    assert_eq!(err, Error::Parse(ParseError::UnclosedSubdocument { open: 1 }));
}

#[test]
fn stray_close_fails() {
    let err = parse("outer >").unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::UnbalancedSubdocEnd { .. })));
}

#[test]
fn assignment_without_quoted_value_fails() {
    let err = parse("doc k=").unwrap_err();
    assert!(matches!(err, Error::Lex(LexError::NoMatch { current: '=', .. })));
}

#[test]
fn unterminated_literal_fails() {
    let err = parse("doc 'abc").unwrap_err();
    assert!(matches!(err, Error::Lex(LexError::UnexpectedEndOfInput { .. })));
}

#[test]
fn error_positions_point_into_the_input() {
    let err = parse("doc\n 'abc").unwrap_err();
    let Error::Lex(err) = err else { panic!("expected lex error") };
    assert_eq!(err.span().end.line, 2);
}

#[test]
fn uppercase_input_is_rejected() {
    let err = parse("Greeting").unwrap_err();
    assert!(matches!(err, Error::Lex(LexError::NoMatch { current: 'G', .. })));
}
