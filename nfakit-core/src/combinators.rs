// Structural combinators
//
// Thompson-style constructions that build a new automaton from one or two
// existing ones:
// - concat: L(A)·L(B)
// - union:  L(A) ∪ L(B)
// - star:   L(A)*
//
// Operands are copied under fresh, disjoint state ids (0..N in the result)
// and wired together with epsilon edges. Inputs are never modified.

use crate::state::StateId;
use crate::store::Nfa;
use crate::symbol::InputSymbol;
use crate::{NfaError, NfaResult};
use indexmap::IndexMap;
use tracing::debug;

/// Old id -> new id for one copied operand
struct Remap(IndexMap<StateId, StateId>);

impl Remap {
    fn get(&self, id: StateId) -> NfaResult<StateId> {
        self.0.get(&id).copied().ok_or(NfaError::UnknownState(id))
    }
}

/// Copy every state (keeping its name) and every edge of `source` into `target`
fn copy_states<S: InputSymbol>(target: &mut Nfa<S>, source: &Nfa<S>) -> NfaResult<Remap> {
    let mut remap = IndexMap::with_capacity(source.state_count());
    for (id, name) in source.states() {
        remap.insert(id, target.add_state(false, false, Some(&name)));
    }
    let remap = Remap(remap);

    for (from, symbol, to) in source.transitions() {
        target.add_transition(remap.get(from)?, symbol.clone(), remap.get(to)?)?;
    }

    Ok(remap)
}

fn same_alphabet<S: InputSymbol>(a: &Nfa<S>, b: &Nfa<S>) -> bool {
    a.alphabet().len() == b.alphabet().len() && a.alphabet().iter().all(|s| b.has_symbol(s))
}

/// Validate a pair of operands and return their initial states
fn check_operands<S: InputSymbol>(a: &Nfa<S>, b: &Nfa<S>) -> NfaResult<(StateId, StateId)> {
    if !same_alphabet(a, b) {
        return Err(NfaError::AlphabetMismatch);
    }
    let a_initial = a.initial().ok_or(NfaError::NoInitialState)?;
    let b_initial = b.initial().ok_or(NfaError::NoInitialState)?;
    Ok((a_initial, b_initial))
}

fn empty_like<S: InputSymbol>(nfa: &Nfa<S>) -> Nfa<S> {
    Nfa::new(nfa.alphabet().iter().cloned())
}

/// Automaton accepting every `u` in L(a) followed by every `v` in L(b)
pub fn concat<S: InputSymbol>(a: &Nfa<S>, b: &Nfa<S>) -> NfaResult<Nfa<S>> {
    let (a_initial, b_initial) = check_operands(a, b)?;

    let mut out = empty_like(a);
    let first = copy_states(&mut out, a)?;
    let second = copy_states(&mut out, b)?;

    out.set_initial(first.get(a_initial)?)?;

    let bridge = second.get(b_initial)?;
    for p in a.finals() {
        out.add_epsilon_transition(first.get(p)?, bridge)?;
    }
    for p in b.finals() {
        out.mark_final(second.get(p)?)?;
    }

    debug!(states = out.state_count(), "Concatenated automata");
    Ok(out)
}

/// Automaton accepting anything either `a` or `b` accepts
pub fn union<S: InputSymbol>(a: &Nfa<S>, b: &Nfa<S>) -> NfaResult<Nfa<S>> {
    let (a_initial, b_initial) = check_operands(a, b)?;

    let mut out = empty_like(a);
    let first = copy_states(&mut out, a)?;
    let second = copy_states(&mut out, b)?;

    let start = out.add_state(true, false, None);
    let accept = out.add_state(false, true, None);

    out.add_epsilon_transition(start, first.get(a_initial)?)?;
    out.add_epsilon_transition(start, second.get(b_initial)?)?;

    for p in a.finals() {
        out.add_epsilon_transition(first.get(p)?, accept)?;
    }
    for p in b.finals() {
        out.add_epsilon_transition(second.get(p)?, accept)?;
    }

    debug!(states = out.state_count(), "Built union automaton");
    Ok(out)
}

/// Automaton accepting zero or more repetitions of strings accepted by `a`
pub fn star<S: InputSymbol>(a: &Nfa<S>) -> NfaResult<Nfa<S>> {
    let a_initial = a.initial().ok_or(NfaError::NoInitialState)?;

    let mut out = empty_like(a);
    let inner = copy_states(&mut out, a)?;

    let start = out.add_state(true, false, None);
    let accept = out.add_state(false, true, None);
    let loop_head = inner.get(a_initial)?;

    out.add_epsilon_transition(start, loop_head)?;
    out.add_epsilon_transition(start, accept)?;

    for p in a.finals() {
        let p = inner.get(p)?;
        out.add_epsilon_transition(p, loop_head)?;
        out.add_epsilon_transition(p, accept)?;
    }

    debug!(states = out.state_count(), "Built star automaton");
    Ok(out)
}

/// Automaton accepting exactly `sequence`
///
/// A chain of single-symbol edges from the initial state to one final
/// state. The empty sequence yields a single state that is both.
pub fn literal<S: InputSymbol>(
    alphabet: impl IntoIterator<Item = S>,
    sequence: impl IntoIterator<Item = S>,
) -> NfaResult<Nfa<S>> {
    let mut nfa = Nfa::new(alphabet);
    let mut current = nfa.add_state(true, false, None);

    for symbol in sequence {
        let next = nfa.add_state(false, false, None);
        nfa.add_transition(current, symbol, next)?;
        current = next;
    }

    nfa.mark_final(current)?;
    Ok(nfa)
}

impl<S: InputSymbol> Nfa<S> {
    /// See [`concat`]
    pub fn concat(&self, other: &Nfa<S>) -> NfaResult<Nfa<S>> {
        concat(self, other)
    }

    /// See [`union`]
    pub fn union(&self, other: &Nfa<S>) -> NfaResult<Nfa<S>> {
        union(self, other)
    }

    /// See [`star`]
    pub fn star(&self) -> NfaResult<Nfa<S>> {
        star(self)
    }

    /// See [`literal`]
    pub fn literal(
        alphabet: impl IntoIterator<Item = S>,
        sequence: impl IntoIterator<Item = S>,
    ) -> NfaResult<Nfa<S>> {
        literal(alphabet, sequence)
    }
}
