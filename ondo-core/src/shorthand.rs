//! Caller-supplied single-character attribute shortcuts.
//!
//! A shorthand maps one symbol character to a full attribute name, e.g.
//! `#` to `id`. The table is validated eagerly against the grammar's
//! allowable-shorthand character set when the parser is constructed, and
//! the accepted symbols extend that parser instance's terminal alphabet
//! only.

use indexmap::IndexMap;

use crate::error::ConfigError;
use crate::grammar::{CharSet, GrammarTables};

/// A validated symbol-to-expansion table.
#[derive(Debug, Clone, Default)]
pub struct Shorthands {
    map: IndexMap<char, String>,
}

impl Shorthands {
    /// Validate and register shorthand pairs against a grammar.
    ///
    /// Every symbol must be exactly one character, every expansion
    /// non-empty, and the symbol plus every expansion character must be
    /// members of the grammar's allowable-shorthand set. The first
    /// violation fails the whole construction.
    pub fn validate<G: GrammarTables>(
        grammar: &G,
        pairs: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, ConfigError> {
        let mut map = IndexMap::new();
        for (symbol, expansion) in pairs {
            let mut chars = symbol.chars();
            let (Some(sym), None) = (chars.next(), chars.next()) else {
                return Err(ConfigError::SymbolNotSingleChar { symbol });
            };
            if expansion.is_empty() {
                return Err(ConfigError::EmptyExpansion { symbol });
            }
            if !grammar.allowable_shorthand_symbol(sym) {
                return Err(ConfigError::DisallowedSymbol { symbol: sym });
            }
            if let Some(ch) = expansion
                .chars()
                .find(|&ch| !grammar.allowable_shorthand_symbol(ch))
            {
                return Err(ConfigError::DisallowedExpansionChar { symbol: sym, ch });
            }
            map.insert(sym, expansion);
        }
        Ok(Shorthands { map })
    }

    /// The expansion bound to a symbol lexeme, if any.
    ///
    /// The lexeme must be the single symbol character.
    pub fn expand(&self, lexeme: &str) -> Option<&str> {
        let mut chars = lexeme.chars();
        match (chars.next(), chars.next()) {
            (Some(sym), None) => self.map.get(&sym).map(String::as_str),
            _ => None,
        }
    }

    /// The registered symbol characters.
    pub fn symbols(&self) -> CharSet {
        self.map.keys().copied().collect()
    }

    /// Whether any shorthand is registered.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
