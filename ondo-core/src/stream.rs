//! One-character-lookahead adapter over a character source.
//!
//! The lexer consumes `(current, lookahead)` pairs; the final pair
//! carries `None` as its lookahead. The source is read exactly once,
//! forward only.

/// Wraps a character iterator with a single slot of lookahead.
#[derive(Debug)]
pub struct Lookahead<I: Iterator<Item = char>> {
    inner: I,
    peeked: Option<char>,
    primed: bool,
}

impl<I: Iterator<Item = char>> Lookahead<I> {
    /// Adapt any character iterator.
    pub fn new(inner: I) -> Self {
        Lookahead { inner, peeked: None, primed: false }
    }
}

impl<'a> Lookahead<std::str::Chars<'a>> {
    /// Adapt a string slice.
    pub fn from_str(input: &'a str) -> Self {
        Lookahead::new(input.chars())
    }
}

impl<I: Iterator<Item = char>> Iterator for Lookahead<I> {
    type Item = (char, Option<char>);

    fn next(&mut self) -> Option<(char, Option<char>)> {
        if !self.primed {
            self.peeked = self.inner.next();
            self.primed = true;
        }
        let current = self.peeked.take()?;
        self.peeked = self.inner.next();
        Some((current, self.peeked))
    }
}
