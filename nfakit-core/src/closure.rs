//! Epsilon closure and the move/step function.

use crate::state::{StateId, StateSet};
use crate::store::Nfa;
use crate::symbol::{InputSymbol, Symbol};
use crate::{NfaError, NfaResult};
use tracing::trace;

impl<S: InputSymbol> Nfa<S> {
    /// Smallest superset of `states` closed under epsilon transitions.
    ///
    /// Worklist fixpoint: every round follows the epsilon edges of the states
    /// added since the previous round, so each state is expanded exactly once
    /// and epsilon cycles terminate.
    pub fn closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut processed = StateSet::with_capacity(closure.len());

        loop {
            let pending: Vec<StateId> = closure.difference(&processed).copied().collect();
            if pending.is_empty() {
                break;
            }

            for state in pending {
                processed.insert(state);
                if let Some(dests) = self.destinations(state, &Symbol::Epsilon) {
                    closure.extend(dests.iter().copied());
                }
            }
        }

        closure
    }

    /// Epsilon closure of a single state
    pub fn closure_of(&self, state: StateId) -> StateSet {
        self.closure(&StateSet::from_iter([state]))
    }

    /// States reachable from `states` after consuming `symbol`.
    ///
    /// The closure is taken both before and after the symbol is consumed, so
    /// a step landing on a state with outgoing epsilon edges is fully absorbed
    /// before the next symbol is read.
    pub fn move_on(&self, states: &StateSet, symbol: &S) -> NfaResult<StateSet> {
        if !self.has_symbol(symbol) {
            return Err(NfaError::invalid_symbol(symbol));
        }

        let label = Symbol::Literal(symbol.clone());
        let mut reached = StateSet::default();
        let closed = self.closure(states);
        for &state in closed.iter() {
            if let Some(dests) = self.destinations(state, &label) {
                reached.extend(dests.iter().copied());
            }
        }

        let next = self.closure(&reached);
        trace!(
            symbol = ?symbol,
            from = states.len(),
            to = next.len(),
            "Moved on symbol"
        );
        Ok(next)
    }
}
