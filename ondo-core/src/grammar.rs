//! Grammar table types and the interface to the grammar compiler.
//!
//! The crate does not compile grammars. It executes tables that an
//! external grammar compiler produced: an indexed list of terminal
//! character sets, a per-state list of [`Production`]s, and the set of
//! accepting states. [`GrammarTables`] is the seam those tables cross.

use std::collections::BTreeSet;

use crate::token::CaptureSemantic;

/// Index into the production table; the unit pushed and popped on the
/// automaton stack.
pub type StateId = usize;

/// Reserved terminal set id meaning "end of stream".
///
/// A matcher over this set accepts exactly when there is no character,
/// regardless of what set the tables put at index 1.
pub const END_OF_STREAM_SET: usize = 1;

/// A set of characters usable in a matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharSet(BTreeSet<char>);

impl CharSet {
    /// The empty set.
    pub fn new() -> Self {
        CharSet(BTreeSet::new())
    }

    /// Build a set from every character of `chars`.
    pub fn of(chars: &str) -> Self {
        CharSet(chars.chars().collect())
    }

    /// Build a set from an inclusive character range.
    pub fn range(lo: char, hi: char) -> Self {
        CharSet((lo..=hi).collect())
    }

    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        self.0.contains(&ch)
    }

    #[inline]
    pub fn insert(&mut self, ch: char) -> bool {
        self.0.insert(ch)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Union with another set, returning a new set.
    pub fn union(&self, other: &CharSet) -> CharSet {
        CharSet(self.0.union(&other.0).copied().collect())
    }

    /// Iterate over the members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        CharSet(iter.into_iter().collect())
    }
}

/// A character-class test over one stream slot.
///
/// `set` indexes the grammar's terminal sets; `invert` flips the result.
/// [`END_OF_STREAM_SET`] tests for an absent character instead of set
/// membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matcher {
    pub set: usize,
    pub invert: bool,
}

impl Matcher {
    /// Matcher accepting characters in the given terminal set.
    #[inline]
    pub fn of(set: usize) -> Self {
        Matcher { set, invert: false }
    }

    /// Matcher accepting characters outside the given terminal set.
    ///
    /// An inverted matcher over [`END_OF_STREAM_SET`] accepts any present
    /// character; an inverted matcher over an ordinary set also accepts
    /// the absent character, since absence is never a set member.
    #[inline]
    pub fn not(set: usize) -> Self {
        Matcher { set, invert: true }
    }

    /// Test a stream slot against this matcher.
    pub(crate) fn accepts(&self, sets: &[CharSet], ch: Option<char>) -> bool {
        let hit = if self.set == END_OF_STREAM_SET {
            ch.is_none()
        } else {
            match ch {
                Some(c) => sets.get(self.set).is_some_and(|set| set.contains(c)),
                None => false,
            }
        };
        hit != self.invert
    }
}

/// What a production does with the matched character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    /// Reset the pending buffer and record the capture start here.
    pub start: bool,
    /// Append the current character to the pending buffer.
    pub take: bool,
    /// Emit the pending buffer as a token.
    pub end: bool,
    /// Semantic recorded at capture start, or stamped onto the emitted
    /// token when set on the ending production.
    pub semantic: CaptureSemantic,
}

impl Capture {
    /// No capture activity at all.
    pub const NONE: Capture = Capture {
        start: false,
        take: false,
        end: false,
        semantic: CaptureSemantic::None,
    };

    /// Begin a capture with the current character.
    pub fn begin(semantic: CaptureSemantic) -> Self {
        Capture { start: true, take: true, end: false, semantic }
    }

    /// Continue an open capture.
    pub fn take() -> Self {
        Capture { start: false, take: true, end: false, semantic: CaptureSemantic::None }
    }

    /// Take the current character and emit the capture.
    pub fn finish(semantic: CaptureSemantic) -> Self {
        Capture { start: false, take: true, end: true, semantic }
    }

    /// Begin, take and emit in a single character.
    pub fn single(semantic: CaptureSemantic) -> Self {
        Capture { start: true, take: true, end: true, semantic }
    }

    /// Emit the capture without taking the current character.
    pub fn close(semantic: CaptureSemantic) -> Self {
        Capture { start: false, take: false, end: true, semantic }
    }

    /// Begin a capture at this position without taking the character
    /// (used for delimiters that should not appear in the lexeme).
    pub fn mark(semantic: CaptureSemantic) -> Self {
        Capture { start: true, take: false, end: false, semantic }
    }
}

/// One automaton transition: a current/lookahead character-class test,
/// a capture directive, and the successor states.
///
/// Successors are stored in the order they must be pushed so that
/// popping the stack processes the author's left-to-right order; use
/// [`ProductionFactory`] to build productions from source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub current: Matcher,
    pub lookahead: Matcher,
    successors: Vec<StateId>,
    pub capture: Capture,
}

impl Production {
    /// Successors in stored (pop-correct) order.
    #[inline]
    pub(crate) fn push_order(&self) -> &[StateId] {
        &self.successors
    }

    /// Successors in the author's left-to-right order.
    pub fn successors(&self) -> impl Iterator<Item = StateId> + '_ {
        self.successors.iter().rev().copied()
    }
}

/// Builds [`Production`]s for grammar tables.
///
/// The factory is handed to [`GrammarTables::states`] so table producers
/// never depend on the stored successor order: `successors` is given
/// left-to-right and reversed here.
#[derive(Debug, Default)]
pub struct ProductionFactory {
    _private: (),
}

impl ProductionFactory {
    pub(crate) fn new() -> Self {
        ProductionFactory { _private: () }
    }

    /// Build a production. `successors` is in left-to-right processing
    /// order and may hold at most three states.
    pub fn production(
        &self,
        current: Matcher,
        lookahead: Matcher,
        successors: &[StateId],
        capture: Capture,
    ) -> Production {
        debug_assert!(successors.len() <= 3, "productions push at most 3 successor states");
        Production {
            current,
            lookahead,
            successors: successors.iter().rev().copied().collect(),
            capture,
        }
    }
}

/// The tables an external grammar compiler supplies.
///
/// Implementations are immutable descriptions; the parser materializes
/// them once per instance. Within each state's production list, order is
/// significant: the lexer selects the first production whose matchers
/// accept, so ambiguous grammars resolve deterministically in table
/// order.
pub trait GrammarTables {
    /// Terminal character sets, indexed by terminal set id. Index
    /// [`END_OF_STREAM_SET`] is reserved and its contents ignored.
    /// `extra_shorthand` holds the shorthand symbols registered on the
    /// parser instance, for grammars that expose a shorthand set.
    fn terminal_sets(&self, extra_shorthand: &CharSet) -> Vec<CharSet>;

    /// Every character usable as a terminal in the base alphabet,
    /// before any shorthand extension.
    fn terminals(&self) -> CharSet;

    /// Whether a character may serve as a shorthand symbol or appear in
    /// a shorthand expansion.
    fn allowable_shorthand_symbol(&self, ch: char) -> bool;

    /// Per-state production lists, indexed by state id. State 0 is the
    /// start state.
    fn states(&self, factory: &ProductionFactory) -> Vec<Vec<Production>>;

    /// States that may legally remain on top of the stack when input
    /// ends.
    fn end_states(&self) -> BTreeSet<StateId>;
}
