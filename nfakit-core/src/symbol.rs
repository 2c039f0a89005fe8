//! Symbol types for automaton transitions.

use std::fmt;
use std::hash::Hash;

/// Bound for values that can make up an automaton's input alphabet.
pub trait InputSymbol: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> InputSymbol for T {}

/// A transition label: either the null symbol or a literal from the alphabet.
///
/// `Epsilon` lives only in the transition space. Alphabets hold bare `S`
/// values, so a determinized automaton can never expose it as input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol<S> {
    Epsilon,
    Literal(S),
}

impl<S> Symbol<S> {
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// The literal value, or `None` for epsilon.
    #[inline]
    pub fn literal(&self) -> Option<&S> {
        match self {
            Symbol::Epsilon => None,
            Symbol::Literal(s) => Some(s),
        }
    }
}

impl<S> From<S> for Symbol<S> {
    fn from(value: S) -> Self {
        Symbol::Literal(value)
    }
}

impl<S: fmt::Display> fmt::Display for Symbol<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => f.write_str("ε"),
            Symbol::Literal(s) => s.fmt(f),
        }
    }
}
