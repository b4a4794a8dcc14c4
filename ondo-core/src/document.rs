//! The document tree produced by parsing.
//!
//! A [`Document`] is a labeled node carrying an insertion-ordered
//! attribute multimap and an ordered child sequence mixing literal text
//! with nested documents. Children are exclusively owned by their
//! parent's child sequence.

use indexmap::IndexMap;
use once_cell::unsync::OnceCell;

use crate::error::ParseError;
use crate::span::Span;

/// One entry in a document's child sequence.
#[derive(Debug)]
pub enum Child {
    /// Literal text content.
    Text(String),
    /// A nested subdocument.
    Document(Document),
}

impl Child {
    /// Check if this is a text child.
    pub fn is_text(&self) -> bool {
        matches!(self, Child::Text(_))
    }

    /// Get the text content if this is a text child.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Child::Text(text) => Some(text),
            Child::Document(_) => None,
        }
    }

    /// Get the nested document if this is a document child.
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Child::Document(doc) => Some(doc),
            Child::Text(_) => None,
        }
    }
}

/// A parse-tree node: optional label, attribute multimap, ordered
/// children.
#[derive(Debug, Default)]
pub struct Document {
    label: Option<String>,
    split_attributes: IndexMap<String, Vec<String>>,
    children: Vec<Child>,
    /// Joined attribute view, computed on first read and never
    /// invalidated.
    attributes: OnceCell<IndexMap<String, String>>,
}

impl Document {
    /// Create an empty, unlabeled document.
    pub fn new() -> Self {
        Document::default()
    }

    /// The document's label, if one was assigned.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Assign the label. A label may be assigned at most once; a second
    /// assignment fails and the first value is retained.
    pub fn set_label(&mut self, label: impl Into<String>) -> Result<(), ParseError> {
        if self.label.is_some() {
            return Err(ParseError::LabelAlreadySet { span: Span::INVALID });
        }
        self.label = Some(label.into());
        Ok(())
    }

    /// Record an attribute value under `name`.
    ///
    /// Surrounding whitespace is trimmed from the raw value. Repeated
    /// names accumulate values in insertion order.
    pub fn add_attribute(&mut self, name: &str, raw_value: &str) {
        self.split_attributes
            .entry(name.to_string())
            .or_default()
            .push(raw_value.trim().to_string());
    }

    /// Per-name value sequences, in insertion order.
    pub fn split_attributes(&self) -> &IndexMap<String, Vec<String>> {
        &self.split_attributes
    }

    /// Read-only view joining each name's values with a single space.
    ///
    /// Computed once on first read and cached for the lifetime of the
    /// node: mutating the attributes after reading this view leaves it
    /// stale. Finish recording before reading.
    pub fn attributes(&self) -> &IndexMap<String, String> {
        self.attributes.get_or_init(|| {
            self.split_attributes
                .iter()
                .map(|(name, values)| (name.clone(), values.join(" ")))
                .collect()
        })
    }

    /// Look up a single attribute in the joined view.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes().get(name).map(String::as_str)
    }

    /// The ordered child sequence.
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Append a literal text child.
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Child::Text(text.into()));
    }

    /// Append a nested document child.
    pub fn push_document(&mut self, doc: Document) {
        self.children.push(Child::Document(doc));
    }

    /// Iterate over the nested document children only.
    pub fn child_documents(&self) -> impl Iterator<Item = &Document> {
        self.children.iter().filter_map(Child::as_document)
    }

    /// Recursively collect all literal text under this node.
    pub fn all_text(&self) -> String {
        let mut result = String::new();
        self.collect_text(&mut result);
        result
    }

    fn collect_text(&self, buf: &mut String) {
        for child in &self.children {
            match child {
                Child::Text(text) => buf.push_str(text),
                Child::Document(doc) => doc.collect_text(buf),
            }
        }
    }
}
