//! Subset construction algorithm for converting an NFA to a DFA.

use crate::state::{subset_key, subset_label, StateId, StateSet, SubsetKey};
use crate::store::Nfa;
use crate::symbol::InputSymbol;
use crate::{NfaError, NfaResult};
use indexmap::IndexMap;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Configuration for subset construction
#[derive(Debug, Clone, Default)]
pub struct SubsetConfig {
    /// Maximum number of DFA states to create (0 = unlimited)
    pub max_dfa_states: usize,
}

/// Result of a subset construction
#[derive(Debug, Clone)]
pub struct Determinized<S> {
    /// The deterministic automaton
    pub dfa: Nfa<S>,

    /// DFA state -> the sorted NFA states it stands for
    pub state_mapping: IndexMap<StateId, Vec<StateId>>,
}

/// NFA to DFA converter
#[derive(Debug, Clone, Default)]
pub struct SubsetConstruction {
    config: SubsetConfig,
}

impl SubsetConstruction {
    pub fn new(config: SubsetConfig) -> Self {
        Self { config }
    }

    /// Convert `nfa` into an equivalent DFA
    ///
    /// Every DFA state is an epsilon-closed subset of NFA states, keyed by
    /// its sorted content so equal subsets collapse into one state. The empty
    /// subset is kept as a non-accepting dead state, which makes the result
    /// complete: every state has exactly one edge per alphabet symbol.
    pub fn convert<S: InputSymbol>(&self, nfa: &Nfa<S>) -> NfaResult<Determinized<S>> {
        let initial = nfa.initial().ok_or(NfaError::NoInitialState)?;

        let mut dfa = Nfa::new(nfa.alphabet().iter().cloned());
        let mut subsets: IndexMap<SubsetKey, StateId> = IndexMap::new();
        let mut worklist: VecDeque<(StateId, StateSet)> = VecDeque::new();

        let start = nfa.closure_of(initial);
        let start_id = self.allocate(&mut dfa, &mut subsets, nfa, &start)?;
        dfa.set_initial(start_id)?;
        worklist.push_back((start_id, start));

        while let Some((from, subset)) = worklist.pop_front() {
            trace!(dfa_state = from, nfa_states = subset.len(), "Expanding subset");

            for symbol in nfa.alphabet() {
                let next = nfa.move_on(&subset, symbol)?;
                let to = match subsets.get(&subset_key(&next)) {
                    Some(&existing) => existing,
                    None => {
                        let created = self.allocate(&mut dfa, &mut subsets, nfa, &next)?;
                        worklist.push_back((created, next));
                        created
                    }
                };
                dfa.add_transition(from, symbol.clone(), to)?;
            }
        }

        debug!(
            nfa_states = nfa.state_count(),
            dfa_states = dfa.state_count(),
            "Subset construction complete"
        );

        let state_mapping = subsets
            .into_iter()
            .map(|(key, id)| (id, key.into_vec()))
            .collect();

        Ok(Determinized { dfa, state_mapping })
    }

    /// Create the DFA state standing for `subset`
    fn allocate<S: InputSymbol>(
        &self,
        dfa: &mut Nfa<S>,
        subsets: &mut IndexMap<SubsetKey, StateId>,
        nfa: &Nfa<S>,
        subset: &StateSet,
    ) -> NfaResult<StateId> {
        let max = self.config.max_dfa_states;
        if max > 0 && subsets.len() >= max {
            return Err(NfaError::StateLimitExceeded {
                states: subsets.len() + 1,
                max,
            });
        }

        let key = subset_key(subset);
        let accepting = !subset.is_disjoint(nfa.final_set());
        let id = dfa.add_state(false, accepting, Some(&subset_label(&key)));
        subsets.insert(key, id);
        Ok(id)
    }
}

impl<S: InputSymbol> Nfa<S> {
    /// Equivalent DFA built by unbounded subset construction
    pub fn to_dfa(&self) -> NfaResult<Nfa<S>> {
        SubsetConstruction::default()
            .convert(self)
            .map(|determinized| determinized.dfa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;

    fn ab() -> Nfa<char> {
        Nfa::new("ab".chars())
    }

    fn assert_complete_dfa(dfa: &Nfa<char>) {
        assert!(dfa.is_deterministic());
        for (state, _) in dfa.states() {
            let edges = dfa.transitions_from(state).unwrap();
            assert!(!edges.contains_key(&Symbol::Epsilon));
            assert_eq!(edges.len(), dfa.alphabet().len());
        }
    }

    #[test]
    fn test_subset_construction_basic() {
        // 0 -a-> 1, 0 -a-> 2, 1 -b-> 3(final), 2 -b-> 3(final)
        let mut nfa = ab();
        for _ in 0..4 {
            nfa.add_state(false, false, None);
        }
        nfa.set_initial(0).unwrap();
        nfa.mark_final(3).unwrap();
        nfa.add_transition(0, 'a', 1).unwrap();
        nfa.add_transition(0, 'a', 2).unwrap();
        nfa.add_transition(1, 'b', 3).unwrap();
        nfa.add_transition(2, 'b', 3).unwrap();

        let dfa = nfa.to_dfa().unwrap();

        assert_complete_dfa(&dfa);
        assert_eq!(dfa.initial(), Some(0));
        // {0}, {1,2}, {} and {3}
        assert_eq!(dfa.state_count(), 4);
        assert!(dfa.accepts("ab".chars()).unwrap());
        assert!(!dfa.accepts("a".chars()).unwrap());
        assert!(!dfa.accepts("abb".chars()).unwrap());
    }

    #[test]
    fn test_subset_construction_with_epsilon() {
        // 0 -ε-> 1 -a-> 2(final)
        let mut nfa = ab();
        let s0 = nfa.add_state(true, false, None);
        let s1 = nfa.add_state(false, false, None);
        let s2 = nfa.add_state(false, true, None);
        nfa.add_epsilon_transition(s0, s1).unwrap();
        nfa.add_transition(s1, 'a', s2).unwrap();

        let result = SubsetConstruction::default().convert(&nfa).unwrap();

        assert_complete_dfa(&result.dfa);
        assert_eq!(result.state_mapping[&0], vec![0, 1]);
        assert_eq!(result.dfa.state_name(0), Some("{0,1}"));
        assert!(result.dfa.accepts("a".chars()).unwrap());
        assert!(!result.dfa.accepts("".chars()).unwrap());
    }

    #[test]
    fn test_dead_state_is_shared() {
        let mut nfa = ab();
        let s0 = nfa.add_state(true, false, None);
        let s1 = nfa.add_state(false, true, None);
        nfa.add_transition(s0, 'a', s1).unwrap();

        let result = SubsetConstruction::default().convert(&nfa).unwrap();
        let dead: Vec<StateId> = result
            .state_mapping
            .iter()
            .filter(|(_, nfa_states)| nfa_states.is_empty())
            .map(|(&id, _)| id)
            .collect();

        assert_eq!(dead.len(), 1);
        assert!(!result.dfa.is_final(dead[0]));
        assert_eq!(result.dfa.state_name(dead[0]), Some("{}"));
        assert_complete_dfa(&result.dfa);
    }

    #[test]
    fn test_accepting_initial_subset() {
        let mut nfa = ab();
        let s0 = nfa.add_state(true, false, None);
        let s1 = nfa.add_state(false, true, None);
        nfa.add_epsilon_transition(s0, s1).unwrap();

        let dfa = nfa.to_dfa().unwrap();
        assert!(dfa.is_final(0));
        assert!(dfa.accepts("".chars()).unwrap());
    }

    #[test]
    fn test_no_initial_state() {
        let mut nfa = ab();
        nfa.add_state(false, true, None);
        assert_eq!(nfa.to_dfa().unwrap_err(), NfaError::NoInitialState);
    }

    #[test]
    fn test_state_limit() {
        // (a|b)*a(a|b)(a|b): the DFA needs 8 states
        let mut nfa = ab();
        let s0 = nfa.add_state(true, false, None);
        let s1 = nfa.add_state(false, false, None);
        let s2 = nfa.add_state(false, false, None);
        let s3 = nfa.add_state(false, true, None);
        nfa.add_multiple(s0, [('a', s0), ('b', s0)]).unwrap();
        nfa.add_transition(s0, 'a', s1).unwrap();
        nfa.add_multiple(s1, [('a', s2), ('b', s2)]).unwrap();
        nfa.add_multiple(s2, [('a', s3), ('b', s3)]).unwrap();

        let unlimited = SubsetConstruction::default().convert(&nfa).unwrap();
        assert_eq!(unlimited.dfa.state_count(), 8);

        let limited = SubsetConstruction::new(SubsetConfig { max_dfa_states: 5 }).convert(&nfa);
        assert_eq!(
            limited.unwrap_err(),
            NfaError::StateLimitExceeded { states: 6, max: 5 }
        );
    }

    #[test]
    fn test_input_is_not_modified() {
        let mut nfa = ab();
        let s0 = nfa.add_state(true, false, None);
        nfa.add_transition(s0, 'a', s0).unwrap();
        nfa.add_epsilon_transition(s0, s0).unwrap();

        nfa.to_dfa().unwrap();
        assert_eq!(nfa.state_count(), 1);
        assert!(nfa.has_transition(s0, Symbol::Epsilon, s0));
    }
}
