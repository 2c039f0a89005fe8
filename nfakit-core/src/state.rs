// State structures
//
// This module defines the per-state data kept by the automaton store:
// - StateId: dense, never-reused handle
// - StateSet: unordered set of handles used for destinations and closures
// - SubsetKey: canonical sorted form of a StateSet used by the determinizer

use crate::symbol::Symbol;
use ahash::{AHashMap, AHashSet};
use smallvec::SmallVec;
use std::hash::Hash;

/// Unique identifier for a state within one automaton
pub type StateId = u32;

/// Set of state identifiers
pub type StateSet = AHashSet<StateId>;

/// Canonical, hashable form of a state set (sorted ascending, no duplicates)
///
/// Most subsets seen in practice are small, so they stay inline.
pub type SubsetKey = SmallVec<[StateId; 8]>;

/// Build the canonical key of a state set
pub fn subset_key(states: &StateSet) -> SubsetKey {
    let mut key: SubsetKey = states.iter().copied().collect();
    key.sort_unstable();
    key
}

/// Render a canonical key as `{0,1,2}`
pub fn subset_label(key: &[StateId]) -> String {
    let ids: Vec<String> = key.iter().map(|id| id.to_string()).collect();
    format!("{{{}}}", ids.join(","))
}

/// A live state in the arena
#[derive(Debug, Clone)]
pub(crate) struct StateRecord<S> {
    /// Display name (defaults to the decimal id)
    pub name: String,

    /// Outgoing transitions: symbol -> destinations
    ///
    /// Only symbols with at least one destination are kept.
    pub transitions: AHashMap<Symbol<S>, StateSet>,
}

impl<S: Eq + Hash> StateRecord<S> {
    pub fn new(name: String) -> Self {
        Self {
            name,
            transitions: AHashMap::default(),
        }
    }

    /// Destinations on one symbol, `None` when there is no edge
    pub fn destinations(&self, symbol: &Symbol<S>) -> Option<&StateSet> {
        self.transitions.get(symbol)
    }

    pub fn add(&mut self, symbol: Symbol<S>, to: StateId) {
        self.transitions.entry(symbol).or_default().insert(to);
    }

    /// Drop `target` from every destination set, pruning sets that become empty
    pub fn forget(&mut self, target: StateId) {
        self.transitions.retain(|_, dests| {
            dests.remove(&target);
            !dests.is_empty()
        });
    }

    pub fn points_to(&self, target: StateId) -> bool {
        self.transitions.values().any(|dests| dests.contains(&target))
    }
}
