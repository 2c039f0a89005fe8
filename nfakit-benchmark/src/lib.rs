// Benchmark workloads
//
// Automata and inputs shared by the criterion benches. Everything random is
// seeded so runs are comparable.

use nfakit_core::{literal, Nfa, NfaResult, StateId};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

pub const BINARY: [char; 2] = ['0', '1'];

/// Two-state DFA over {0,1} accepting an even number of 1s
pub fn parity_dfa() -> NfaResult<Nfa<char>> {
    let mut nfa = Nfa::new(BINARY);
    let even = nfa.add_state(true, true, Some("even"));
    let odd = nfa.add_state(false, false, Some("odd"));
    nfa.add_multiple(even, [('0', even), ('1', odd)])?;
    nfa.add_multiple(odd, [('0', odd), ('1', even)])?;
    Ok(nfa)
}

/// NFA for "the n-th symbol from the end is a 1"
///
/// n + 1 states for n >= 1; its minimal DFA has 2^n states, so this is the worst case
/// for subset construction.
pub fn nth_from_end(n: usize) -> NfaResult<Nfa<char>> {
    let mut nfa = Nfa::new(BINARY);
    let start = nfa.add_state(true, false, None);
    nfa.add_multiple(start, [('0', start), ('1', start)])?;

    let mut current = nfa.add_state(false, n <= 1, None);
    nfa.add_transition(start, '1', current)?;
    for i in 1..n {
        let next = nfa.add_state(false, i + 1 == n, None);
        nfa.add_multiple(current, [('0', next), ('1', next)])?;
        current = next;
    }
    Ok(nfa)
}

/// Random NFA with `states` states over {0,1}, including epsilon edges
pub fn random_nfa(states: usize, seed: u64) -> NfaResult<Nfa<char>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut nfa = Nfa::new(BINARY);
    let count = states.max(1) as StateId;

    for id in 0..count {
        nfa.add_state(id == 0, rng.random_bool(0.2), None);
    }
    for from in 0..count {
        for _ in 0..3 {
            let to = rng.random_range(0..count);
            let symbol = BINARY[rng.random_range(0..BINARY.len())];
            nfa.add_transition(from, symbol, to)?;
        }
        if rng.random_bool(0.15) {
            nfa.add_epsilon_transition(from, rng.random_range(0..count))?;
        }
    }
    Ok(nfa)
}

/// `(w1|w2|...|wk)*` built from literals with the combinators
pub fn keyword_loop(words: &[&str]) -> NfaResult<Nfa<char>> {
    let alphabet = || ('a'..='z').chain(BINARY);
    let mut pieces = words.iter().map(|word| literal(alphabet(), word.chars()));

    let mut combined = match pieces.next() {
        Some(first) => first?,
        None => literal(alphabet(), std::iter::empty())?,
    };
    for piece in pieces {
        combined = combined.union(&piece?)?;
    }
    combined.star()
}

/// Random input over {0,1}
pub fn random_input(len: usize, seed: u64) -> Vec<char> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| BINARY[rng.random_range(0..BINARY.len())])
        .collect()
}
