//! Subset construction, Brzozowski minimization, and trim.

use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::dfa::Dfa;
use crate::nfa::Nfa;
use crate::sentinel::{StateId, INVALID_STATE};
use crate::transition::Transition;

fn subset_key(set: &BTreeSet<StateId>) -> Rc<[StateId]> {
    set.iter().copied().collect()
}

fn subset_is_final(set: &BTreeSet<StateId>, nfa: &Nfa) -> bool {
    set.iter().any(|s| nfa.final_states().contains(s))
}

/// Subset construction: compiles `nfa` into an equivalent [`Dfa`] over the
/// same alphabet.
#[must_use]
pub fn determinize(nfa: &Nfa) -> Dfa {
    let mut dfa = Dfa::new(Rc::clone(nfa.alphabet()));

    let mut initial = nfa.initial_states().clone();
    nfa.epsilon_closure_in_place(&mut initial);

    let mut subset_ids: IndexMap<Rc<[StateId]>, StateId> = IndexMap::new();
    let mut queue: VecDeque<BTreeSet<StateId>> = VecDeque::new();

    let initial_state = dfa.new_state();
    subset_ids.insert(subset_key(&initial), initial_state);
    dfa.set_initial_state_unchecked(initial_state);
    if subset_is_final(&initial, nfa) {
        dfa.set_final_unchecked(initial_state, true);
    }
    queue.push_back(initial);

    while let Some(subset) = queue.pop_front() {
        let from_state = subset_ids[&subset_key(&subset)];
        for symbol in nfa.available_symbols(&subset) {
            let target = nfa.reachable(&subset, symbol);
            if target.is_empty() {
                continue;
            }
            let key = subset_key(&target);
            let to_state = if let Some(&id) = subset_ids.get(&key) {
                id
            } else {
                let id = dfa.new_state();
                subset_ids.insert(key, id);
                if subset_is_final(&target, nfa) {
                    dfa.set_final_unchecked(id, true);
                }
                queue.push_back(target);
                id
            };
            dfa.add_unchecked(Transition::new(from_state, symbol, to_state));
        }
    }
    dfa
}

/// Reverses `dfa`: swaps the direction of every transition and swaps the
/// initial/final roles, producing an (in general nondeterministic) [`Nfa`]
/// over the same alphabet.
#[must_use]
pub fn reverse(dfa: &Dfa) -> Nfa {
    let mut nfa = Nfa::new(Rc::clone(dfa.alphabet()));
    for t in dfa.sorted_transitions() {
        nfa.add_transition_unchecked(Transition::new(t.to, t.symbol, t.from));
    }
    for &f in dfa.final_states() {
        nfa.set_initial_unchecked(f, true);
    }
    if dfa.initial_state() != INVALID_STATE {
        nfa.set_final_unchecked(dfa.initial_state(), true);
    }
    nfa
}

/// Brzozowski minimization: reverse, determinize, reverse, determinize. Works
/// for any DFA, minimal/trim or not.
#[must_use]
pub fn minimize(dfa: &Dfa) -> Dfa {
    let once = determinize(&reverse(dfa));
    determinize(&reverse(&once))
}

/// Drops every state that is not both reachable from the initial state and
/// able to reach some final state, along with any transition mentioning such
/// a state.
#[must_use]
pub fn trim(dfa: &Dfa) -> Dfa {
    let accessible = accessible_states(dfa);
    let co_accessible = co_accessible_states(dfa);
    let keep: BTreeSet<StateId> = accessible.intersection(&co_accessible).copied().collect();

    let mut trimmed = Dfa::new(Rc::clone(dfa.alphabet()));
    if dfa.initial_state() != INVALID_STATE && keep.contains(&dfa.initial_state()) {
        trimmed.set_initial_state_unchecked(dfa.initial_state());
    }
    for t in dfa.sorted_transitions() {
        if keep.contains(&t.from) && keep.contains(&t.to) {
            trimmed.add_unchecked(t);
        }
    }
    for &f in dfa.final_states() {
        if keep.contains(&f) {
            trimmed.set_final_unchecked(f, true);
        }
    }
    trimmed
}

fn accessible_states(dfa: &Dfa) -> BTreeSet<StateId> {
    let mut seen = BTreeSet::new();
    if dfa.initial_state() == INVALID_STATE {
        return seen;
    }
    let mut worklist = vec![dfa.initial_state()];
    seen.insert(dfa.initial_state());
    while let Some(state) = worklist.pop() {
        for t in dfa.transitions_from(state) {
            if seen.insert(t.to) {
                worklist.push(t.to);
            }
        }
    }
    seen
}

fn co_accessible_states(dfa: &Dfa) -> BTreeSet<StateId> {
    let predecessors = reverse(dfa);
    let mut seen: BTreeSet<StateId> = dfa.final_states().clone();
    let mut worklist: Vec<StateId> = seen.iter().copied().collect();
    while let Some(state) = worklist.pop() {
        for t in predecessors.transitions_from(state) {
            if seen.insert(t.to) {
                worklist.push(t.to);
            }
        }
    }
    seen
}
