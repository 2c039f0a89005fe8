// Simulation engine
//
// Drives the move function over a fully materialized input sequence and
// reports acceptance.

use crate::state::StateSet;
use crate::store::Nfa;
use crate::symbol::InputSymbol;
use crate::{NfaError, NfaResult};
use tracing::trace;

impl<S: InputSymbol> Nfa<S> {
    /// Does the automaton accept `input`?
    ///
    /// Fails with `NoInitialState` when no initial state is designated and
    /// with `InvalidSymbol` on the first symbol outside the alphabet that is
    /// read before the run dies out.
    pub fn accepts(&self, input: impl IntoIterator<Item = S>) -> NfaResult<bool> {
        let reached = self.run(input)?;
        Ok(!reached.is_disjoint(self.final_set()))
    }

    /// The state set reached after consuming all of `input`
    ///
    /// Stops early with an empty set once no state is left, since nothing
    /// can be reached from the empty set.
    pub fn run(&self, input: impl IntoIterator<Item = S>) -> NfaResult<StateSet> {
        let initial = self.initial().ok_or(NfaError::NoInitialState)?;
        let mut current = self.closure_of(initial);

        for (position, symbol) in input.into_iter().enumerate() {
            current = self.move_on(&current, &symbol)?;
            trace!(position, symbol = ?symbol, active = current.len(), "Simulation step");

            if current.is_empty() {
                trace!(position, "No active states left, rejecting");
                break;
            }
        }

        Ok(current)
    }
}
