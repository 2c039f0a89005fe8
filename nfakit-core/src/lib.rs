// nfakit core - Nondeterministic finite automata
//
// This crate implements the automaton engine underneath nfakit:
// - An arena-backed automaton store with named states and set-valued transitions
// - Epsilon closure and the move/step function
// - Simulation of a full input sequence
// - Thompson-style combinators (concatenation, union, Kleene star)
// - Subset construction (NFA to DFA)
//
// Every combinator and the determinizer return a brand-new automaton and
// leave their inputs untouched.

mod closure;
mod combinators;
mod simulate;
mod state;
mod store;
mod subset;
mod symbol;

pub use combinators::{concat, literal, star, union};
pub use state::{StateId, StateSet, SubsetKey};
pub use store::Nfa;
pub use subset::{Determinized, SubsetConfig, SubsetConstruction};
pub use symbol::{InputSymbol, Symbol};

use thiserror::Error;

/// Errors that can occur while building or running an automaton
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NfaError {
    #[error("symbol {symbol} not in the defined alphabet")]
    InvalidSymbol { symbol: String },

    #[error("automaton has no initial state")]
    NoInitialState,

    #[error("state {0} is not a final state")]
    MissingFinalState(StateId),

    #[error("state {0} does not exist")]
    UnknownState(StateId),

    #[error("alphabets of the combined automata differ")]
    AlphabetMismatch,

    #[error("DFA state limit exceeded: {states} states (max: {max})")]
    StateLimitExceeded { states: usize, max: usize },
}

impl NfaError {
    /// Build an `InvalidSymbol` error from any debuggable symbol
    pub(crate) fn invalid_symbol<S: std::fmt::Debug>(symbol: &S) -> Self {
        NfaError::InvalidSymbol {
            symbol: format!("{symbol:?}"),
        }
    }
}

/// Result type for automaton operations
pub type NfaResult<T> = Result<T, NfaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_symbol_display() {
        let err = NfaError::invalid_symbol(&'*');
        assert_eq!(err.to_string(), "symbol '*' not in the defined alphabet");
    }

    #[test]
    fn test_error_display_names_state() {
        assert!(NfaError::UnknownState(7).to_string().contains('7'));
        assert!(NfaError::MissingFinalState(3).to_string().contains('3'));

        let err = NfaError::StateLimitExceeded { states: 11, max: 10 };
        assert!(err.to_string().contains("max: 10"));
    }
}
