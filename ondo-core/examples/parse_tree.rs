//! Parse a document in the built-in notation and print its tree.
//!
//! Run with: cargo run --example parse_tree

use ondo_core::{BuiltinGrammar, Child, Document, Parser};

const INPUT: &str = "page title='home' #main <\n  section .intro 'welcome'\n  < item n='1' >\n>";

fn main() -> Result<(), ondo_core::Error> {
    let parser = Parser::with_shorthands(
        BuiltinGrammar,
        vec![
            ("#".to_string(), "id".to_string()),
            (".".to_string(), "class".to_string()),
        ],
    )?;

    let doc = parser.parse(INPUT)?;
    print_tree(&doc, 0);
    Ok(())
}

fn print_tree(doc: &Document, depth: usize) {
    let indent = "  ".repeat(depth);
    println!("{indent}{}", doc.label().unwrap_or("(unlabeled)"));
    for (name, value) in doc.attributes() {
        println!("{indent}  @{name} = {value:?}");
    }
    for child in doc.children() {
        match child {
            Child::Text(text) => println!("{indent}  {text:?}"),
            Child::Document(sub) => print_tree(sub, depth + 1),
        }
    }
}
