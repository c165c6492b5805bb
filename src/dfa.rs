//! Mutable deterministic finite automaton: the add-with-determinism invariant.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::alphabet::{AlphabetView, MutableAlphabet};
use crate::errors::ContractViolation;
use crate::sentinel::{StateId, SymbolId, INVALID_STATE};
use crate::store::{StateView, TransitionStore};
use crate::transition::Transition;

/// A mutable deterministic finite automaton.
///
/// Every mutation preserves the determinism invariant: inserting a
/// transition whose `(from, symbol)` pair is already present is a no-op, the
/// existing transition wins (§4.4).
#[derive(Debug, Clone)]
pub struct Dfa {
    alphabet: Rc<RefCell<MutableAlphabet>>,
    transitions: TransitionStore,
    sorted: Vec<Transition>,
    initial: StateId,
    finals: BTreeSet<StateId>,
    max_state: StateId,
}

fn check_state(state: StateId) -> Result<(), ContractViolation> {
    if state < 0 {
        Err(ContractViolation::NegativeState(state))
    } else {
        Ok(())
    }
}

impl Dfa {
    /// Creates an empty DFA (no initial state) over `alphabet`.
    #[must_use]
    pub fn new(alphabet: Rc<RefCell<MutableAlphabet>>) -> Self {
        Self {
            alphabet,
            transitions: TransitionStore::new(),
            sorted: Vec::new(),
            initial: INVALID_STATE,
            finals: BTreeSet::new(),
            max_state: -1,
        }
    }

    /// The alphabet this DFA's transitions are indexed against.
    #[must_use]
    pub fn alphabet(&self) -> &Rc<RefCell<MutableAlphabet>> {
        &self.alphabet
    }

    /// The current upper bound on allocated states.
    #[must_use]
    pub fn max_state(&self) -> StateId {
        self.max_state
    }

    /// Allocates and returns a fresh, unused state.
    pub fn new_state(&mut self) -> StateId {
        self.max_state += 1;
        self.max_state
    }

    fn touch(&mut self, state: StateId) {
        if state > self.max_state {
            self.max_state = state;
        }
    }

    /// Inserts `t` if no transition already exists for `(t.from, t.symbol)`.
    /// Returns `Ok(true)` if inserted, `Ok(false)` if a conflicting
    /// transition already won.
    pub fn add(&mut self, t: Transition) -> Result<bool, ContractViolation> {
        check_state(t.from)?;
        check_state(t.to)?;
        Ok(self.add_unchecked(t))
    }

    /// Inserts `t` without validation, preserving the determinism invariant.
    /// Used internally by algorithms that only construct states through
    /// [`Dfa::new_state`].
    pub(crate) fn add_unchecked(&mut self, t: Transition) -> bool {
        if self
            .transitions
            .deterministic_lookup(t.from, t.symbol)
            .is_some()
        {
            return false;
        }
        self.touch(t.from);
        self.touch(t.to);
        let inserted = self.transitions.insert(t);
        if inserted {
            let idx = self.sorted.partition_point(|existing| *existing < t);
            self.sorted.insert(idx, t);
        }
        inserted
    }

    /// Sets the unique initial state (or [`crate::sentinel::INVALID_STATE`]
    /// to clear it).
    pub fn set_initial_state(&mut self, state: StateId) -> Result<(), ContractViolation> {
        if state != INVALID_STATE {
            check_state(state)?;
        }
        self.set_initial_state_unchecked(state);
        Ok(())
    }

    pub(crate) fn set_initial_state_unchecked(&mut self, state: StateId) {
        if state != INVALID_STATE {
            self.touch(state);
        }
        self.initial = state;
    }

    /// The unique initial state, or [`crate::sentinel::INVALID_STATE`].
    #[must_use]
    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    /// Marks or unmarks `state` as final.
    pub fn set_final(&mut self, state: StateId, is_final: bool) -> Result<(), ContractViolation> {
        check_state(state)?;
        self.set_final_unchecked(state, is_final);
        Ok(())
    }

    pub(crate) fn set_final_unchecked(&mut self, state: StateId, is_final: bool) {
        self.touch(state);
        if is_final {
            self.finals.insert(state);
        } else {
            self.finals.remove(&state);
        }
    }

    /// The final states.
    #[must_use]
    pub fn final_states(&self) -> &BTreeSet<StateId> {
        &self.finals
    }

    /// Whether `state` is final.
    #[must_use]
    pub fn is_final(&self, state: StateId) -> bool {
        self.finals.contains(&state)
    }

    /// The unique transition destination for `(state, symbol)`, or
    /// [`crate::sentinel::INVALID_STATE`].
    #[must_use]
    pub fn transition(&self, state: StateId, symbol: SymbolId) -> StateId {
        self.transitions
            .deterministic_lookup(state, symbol)
            .map_or(INVALID_STATE, |t| t.to)
    }

    /// Transitions leaving `state`, in symbol order.
    pub fn transitions_from(&self, state: StateId) -> impl Iterator<Item = &Transition> {
        self.transitions.from_state(state)
    }

    /// All transitions, in default order (e.g. for the BFS canonicalization
    /// in [`crate::mfa`]).
    #[must_use]
    pub fn sorted_transitions(&self) -> Vec<Transition> {
        self.sorted.clone()
    }

    /// A zero-copy, binary-search-backed view over the transitions leaving
    /// `state`, backed by the same incrementally maintained sorted array as
    /// [`Dfa::sorted_transitions`]. Mirrors [`crate::mfa::Mfa::state_view`].
    #[must_use]
    pub fn state_view(&self, state: StateId) -> StateView<'_> {
        StateView::new(state, &self.sorted)
    }

    /// Feeds `symbols` through the DFA starting at the initial state.
    /// Rejects (returns `false`) as soon as a symbol is unknown to the
    /// alphabet or no transition exists; otherwise accepts iff the state
    /// reached is final.
    pub fn accepts<'a, I>(&self, symbols: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut state = self.initial;
        if state == INVALID_STATE {
            return false;
        }
        let alphabet = self.alphabet.borrow();
        for symbol in symbols {
            let idx = alphabet.index_of(symbol);
            if idx < 0 {
                return false;
            }
            state = self.transition(state, idx);
            if state == INVALID_STATE {
                return false;
            }
        }
        self.is_final(state)
    }

    /// The lazy sequence of states visited while feeding `symbols`, starting
    /// with the initial state. Stops (does not yield further) once a symbol
    /// is unknown or a transition is missing, signalling rejection by
    /// truncation.
    #[must_use]
    pub fn state_path<'a>(&'a self, symbols: &'a [&'a str]) -> DfaStatePath<'a> {
        DfaStatePath {
            dfa: self,
            symbols,
            next: Some(self.initial).filter(|&s| s != INVALID_STATE),
            index: 0,
        }
    }
}

/// Iterator over the states visited by [`Dfa::state_path`].
pub struct DfaStatePath<'a> {
    dfa: &'a Dfa,
    symbols: &'a [&'a str],
    next: Option<StateId>,
    index: usize,
}

impl Iterator for DfaStatePath<'_> {
    type Item = StateId;

    fn next(&mut self) -> Option<StateId> {
        let current = self.next?;
        if self.index >= self.symbols.len() {
            self.next = None;
            return Some(current);
        }
        let symbol = self.symbols[self.index];
        self.index += 1;
        let idx = self.dfa.alphabet.borrow().index_of(symbol);
        self.next = if idx < 0 {
            None
        } else {
            let to = self.dfa.transition(current, idx);
            (to != INVALID_STATE).then_some(to)
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> Dfa {
        Dfa::new(Rc::new(RefCell::new(MutableAlphabet::new())))
    }

    #[test]
    fn add_is_a_no_op_on_conflict() {
        let mut dfa = fresh();
        assert_eq!(dfa.add(Transition::new(0, 0, 1)), Ok(true));
        assert_eq!(dfa.add(Transition::new(0, 0, 2)), Ok(false));
        assert_eq!(dfa.transition(0, 0), 1);
    }

    #[test]
    fn state_view_matches_transitions_from() {
        let mut dfa = fresh();
        dfa.add(Transition::new(0, 0, 1)).unwrap();
        dfa.add(Transition::new(0, 2, 3)).unwrap();
        dfa.add(Transition::new(1, 1, 2)).unwrap();

        let view = dfa.state_view(0);
        assert_eq!(view.transitions().len(), 2);
        assert_eq!(view.transition(2), Some(3));
        assert_eq!(view.transition(1), None);
    }

    #[test]
    fn accepts_rejects_on_unknown_symbol_or_missing_transition() {
        let mut dfa = fresh();
        dfa.alphabet.borrow_mut().get_or_add("a");
        dfa.set_initial_state(0).unwrap();
        dfa.add(Transition::new(0, 0, 1)).unwrap();
        dfa.set_final(1, true).unwrap();
        assert!(dfa.accepts(["a"]));
        assert!(!dfa.accepts(["b"]));
        assert!(!dfa.accepts(["a", "a"]));
    }

    #[test]
    fn accepts_empty_input_iff_initial_is_final() {
        let mut dfa = fresh();
        dfa.set_initial_state(0).unwrap();
        assert!(!dfa.accepts(Vec::<&str>::new()));
        dfa.set_final(0, true).unwrap();
        assert!(dfa.accepts(Vec::<&str>::new()));
    }

    #[test]
    fn state_path_truncates_on_rejection() {
        let mut dfa = fresh();
        dfa.alphabet.borrow_mut().get_or_add("a");
        dfa.set_initial_state(0).unwrap();
        dfa.add(Transition::new(0, 0, 1)).unwrap();
        let symbols = ["a", "a"];
        let path: Vec<_> = dfa.state_path(&symbols).collect();
        assert_eq!(path, vec![0, 1]);
    }
}
