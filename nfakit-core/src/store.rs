// Automaton store
//
// Owns the alphabet, the state arena, the initial marker and the final set.
// No algorithm lives here beyond raw mutation and queries; closure, simulation,
// combinators and subset construction are layered on top in their own modules.
//
// States live in an arena indexed by id. Removing a state leaves a tombstone
// so ids are never reused within one automaton.

use crate::state::{StateId, StateRecord, StateSet};
use crate::symbol::{InputSymbol, Symbol};
use crate::{NfaError, NfaResult};
use ahash::AHashMap;
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

/// A nondeterministic finite automaton over the alphabet `S`
///
/// The same type holds deterministic automata: determinism is a property
/// checked with [`Nfa::is_deterministic`], not a separate representation.
#[derive(Debug, Clone)]
pub struct Nfa<S> {
    /// Input alphabet in insertion order (never contains epsilon)
    alphabet: IndexSet<S>,

    /// State arena; `None` marks a removed state
    states: Vec<Option<StateRecord<S>>>,

    /// Designated initial state
    initial: Option<StateId>,

    /// Accepting states
    finals: StateSet,
}

impl<S: InputSymbol> Nfa<S> {
    /// Create an empty automaton over a fixed alphabet
    pub fn new(alphabet: impl IntoIterator<Item = S>) -> Self {
        Self {
            alphabet: alphabet.into_iter().collect(),
            states: Vec::new(),
            initial: None,
            finals: StateSet::default(),
        }
    }

    pub fn alphabet(&self) -> &IndexSet<S> {
        &self.alphabet
    }

    pub fn has_symbol(&self, symbol: &S) -> bool {
        self.alphabet.contains(symbol)
    }

    /// Number of live states
    pub fn state_count(&self) -> usize {
        self.states.iter().flatten().count()
    }

    pub fn contains_state(&self, id: StateId) -> bool {
        self.record(id).is_ok()
    }

    /// Add a new state and return its id
    ///
    /// `is_initial` replaces any previously designated initial state.
    pub fn add_state(&mut self, is_initial: bool, is_final: bool, name: Option<&str>) -> StateId {
        let id = self.states.len() as StateId;
        let name = name.map_or_else(|| id.to_string(), str::to_string);
        self.states.push(Some(StateRecord::new(name)));

        if is_final {
            self.finals.insert(id);
        }
        if is_initial {
            self.initial = Some(id);
        }

        id
    }

    /// Remove a state and every transition that targets it
    pub fn remove_state(&mut self, id: StateId) -> NfaResult<()> {
        if self
            .states
            .get_mut(id as usize)
            .and_then(|slot| slot.take())
            .is_none()
        {
            return Err(NfaError::UnknownState(id));
        }

        for record in self.states.iter_mut().flatten() {
            record.forget(id);
        }

        if self.initial == Some(id) {
            self.initial = None;
        }
        self.finals.remove(&id);

        debug!(state = id, remaining = self.state_count(), "Removed state");
        Ok(())
    }

    /// Designate the initial state, returning the previous one
    pub fn set_initial(&mut self, id: StateId) -> NfaResult<Option<StateId>> {
        self.record(id)?;
        Ok(self.initial.replace(id))
    }

    pub fn initial(&self) -> Option<StateId> {
        self.initial
    }

    pub fn mark_final(&mut self, id: StateId) -> NfaResult<()> {
        self.record(id)?;
        self.finals.insert(id);
        Ok(())
    }

    pub fn unmark_final(&mut self, id: StateId) -> NfaResult<()> {
        if self.finals.remove(&id) {
            Ok(())
        } else {
            Err(NfaError::MissingFinalState(id))
        }
    }

    pub fn is_final(&self, id: StateId) -> bool {
        self.finals.contains(&id)
    }

    /// Accepting states in ascending order
    pub fn finals(&self) -> Vec<StateId> {
        let mut finals: Vec<StateId> = self.finals.iter().copied().collect();
        finals.sort_unstable();
        finals
    }

    pub(crate) fn final_set(&self) -> &StateSet {
        &self.finals
    }

    pub fn state_name(&self, id: StateId) -> Option<&str> {
        self.record(id).ok().map(|record| record.name.as_str())
    }

    /// All live states as id -> name, in ascending id order
    pub fn states(&self) -> IndexMap<StateId, String> {
        self.live_states()
            .map(|(id, record)| (id, record.name.clone()))
            .collect()
    }

    /// Add an edge `from -symbol-> to`
    pub fn add_transition(
        &mut self,
        from: StateId,
        symbol: impl Into<Symbol<S>>,
        to: StateId,
    ) -> NfaResult<()> {
        let symbol = symbol.into();
        self.check_symbol(&symbol)?;
        self.record(to)?;
        self.record_mut(from)?.add(symbol, to);
        Ok(())
    }

    pub fn add_epsilon_transition(&mut self, from: StateId, to: StateId) -> NfaResult<()> {
        self.add_transition(from, Symbol::Epsilon, to)
    }

    /// Union a set of destinations into the edges of `from` on `symbol`
    ///
    /// Every destination is validated before anything is inserted.
    pub fn add_transition_set(
        &mut self,
        from: StateId,
        symbol: impl Into<Symbol<S>>,
        to: impl IntoIterator<Item = StateId>,
    ) -> NfaResult<()> {
        let symbol = symbol.into();
        self.check_symbol(&symbol)?;
        let targets: Vec<StateId> = to.into_iter().collect();
        for &target in &targets {
            self.record(target)?;
        }

        let record = self.record_mut(from)?;
        for target in targets {
            record.add(symbol.clone(), target);
        }
        Ok(())
    }

    /// Add one edge from `from` per `(symbol, destination)` entry
    pub fn add_multiple<T>(
        &mut self,
        from: StateId,
        edges: impl IntoIterator<Item = (T, StateId)>,
    ) -> NfaResult<()>
    where
        T: Into<Symbol<S>>,
    {
        let edges: Vec<(Symbol<S>, StateId)> = edges
            .into_iter()
            .map(|(symbol, to)| (symbol.into(), to))
            .collect();
        for (symbol, to) in &edges {
            self.check_symbol(symbol)?;
            self.record(*to)?;
        }

        let record = self.record_mut(from)?;
        for (symbol, to) in edges {
            record.add(symbol, to);
        }
        Ok(())
    }

    /// Is there an edge `from -symbol-> to`?
    pub fn has_transition(&self, from: StateId, symbol: impl Into<Symbol<S>>, to: StateId) -> bool {
        self.destinations(from, &symbol.into())
            .is_some_and(|dests| dests.contains(&to))
    }

    /// Is there an edge `from -> to` on any symbol, epsilon included?
    pub fn has_any_transition(&self, from: StateId, to: StateId) -> bool {
        self.record(from).is_ok_and(|record| record.points_to(to))
    }

    /// Destinations of one state on one symbol
    pub fn delta(&self, state: StateId, symbol: &Symbol<S>) -> NfaResult<StateSet> {
        self.check_symbol(symbol)?;
        let record = self.record(state)?;
        Ok(record.destinations(symbol).cloned().unwrap_or_default())
    }

    /// All edges leaving `id` as symbol -> destinations
    pub fn transitions_from(&self, id: StateId) -> NfaResult<AHashMap<Symbol<S>, StateSet>> {
        Ok(self.record(id)?.transitions.clone())
    }

    /// All edges on `symbol` as source -> destinations, in ascending source order
    ///
    /// A symbol of the alphabet without edges yields an empty map; a symbol
    /// outside the alphabet is an error.
    pub fn transitions_on(
        &self,
        symbol: impl Into<Symbol<S>>,
    ) -> NfaResult<IndexMap<StateId, StateSet>> {
        let symbol = symbol.into();
        self.check_symbol(&symbol)?;
        Ok(self
            .live_states()
            .filter_map(|(id, record)| record.destinations(&symbol).map(|dests| (id, dests.clone())))
            .collect())
    }

    /// Iterate over every edge as `(from, symbol, to)`
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, &Symbol<S>, StateId)> + '_ {
        self.live_states().flat_map(|(from, record)| {
            record
                .transitions
                .iter()
                .flat_map(move |(symbol, dests)| dests.iter().map(move |&to| (from, symbol, to)))
        })
    }

    /// No epsilon edges and at most one destination per (state, symbol)
    pub fn is_deterministic(&self) -> bool {
        self.states.iter().flatten().all(|record| {
            record
                .transitions
                .iter()
                .all(|(symbol, dests)| !symbol.is_epsilon() && dests.len() <= 1)
        })
    }

    pub(crate) fn live_states(&self) -> impl Iterator<Item = (StateId, &StateRecord<S>)> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|record| (idx as StateId, record)))
    }

    /// Destinations of a live state on a symbol without validation
    pub(crate) fn destinations(&self, state: StateId, symbol: &Symbol<S>) -> Option<&StateSet> {
        self.record(state).ok()?.destinations(symbol)
    }

    pub(crate) fn check_symbol(&self, symbol: &Symbol<S>) -> NfaResult<()> {
        match symbol {
            Symbol::Epsilon => Ok(()),
            Symbol::Literal(s) if self.alphabet.contains(s) => Ok(()),
            Symbol::Literal(s) => Err(NfaError::invalid_symbol(s)),
        }
    }

    fn record(&self, id: StateId) -> NfaResult<&StateRecord<S>> {
        self.states
            .get(id as usize)
            .and_then(Option::as_ref)
            .ok_or(NfaError::UnknownState(id))
    }

    fn record_mut(&mut self, id: StateId) -> NfaResult<&mut StateRecord<S>> {
        self.states
            .get_mut(id as usize)
            .and_then(Option::as_mut)
            .ok_or(NfaError::UnknownState(id))
    }
}
