//! Transition storage: a mutable dual-ordered store for NFAs/DFAs, and an
//! immutable sorted-array view for MFAs.

use std::collections::BTreeSet;

use crate::sentinel::{StateId, SymbolId};
use crate::transition::{ByTarget, Transition};

/// A mutable store of transitions kept in two parallel orderings so both
/// "transitions from state s" and "transitions into state s" can be answered
/// with an O(log n) range query instead of a linear scan.
#[derive(Debug, Clone, Default)]
pub struct TransitionStore {
    by_source: BTreeSet<Transition>,
    by_target: BTreeSet<ByTarget>,
}

impl TransitionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transitions stored.
    pub fn len(&self) -> usize {
        self.by_source.len()
    }

    /// Whether the store holds no transitions.
    pub fn is_empty(&self) -> bool {
        self.by_source.is_empty()
    }

    /// Inserts `t`, returning `true` if it was not already present.
    pub fn insert(&mut self, t: Transition) -> bool {
        let inserted = self.by_source.insert(t);
        if inserted {
            self.by_target.insert(t.by_target());
        }
        inserted
    }

    /// Removes `t`, returning `true` if it was present.
    pub fn remove(&mut self, t: Transition) -> bool {
        let removed = self.by_source.remove(&t);
        if removed {
            self.by_target.remove(&t.by_target());
        }
        removed
    }

    /// Whether a transition matching `t` exists.
    pub fn contains(&self, t: Transition) -> bool {
        self.by_source.contains(&t)
    }

    /// All transitions, in default `(from, symbol, to)` order.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.by_source.iter()
    }

    /// The transitions whose `from == state`, in symbol order.
    pub fn from_state(&self, state: StateId) -> impl Iterator<Item = &Transition> {
        let lo = Transition::new(state, SymbolId::MIN, StateId::MIN);
        let hi = Transition::new(state, SymbolId::MAX, StateId::MAX);
        self.by_source.range(lo..=hi)
    }

    /// The transitions whose `from == state` and `symbol == symbol`.
    pub fn from_state_symbol(
        &self,
        state: StateId,
        symbol: SymbolId,
    ) -> impl Iterator<Item = &Transition> {
        let lo = Transition::new(state, symbol, StateId::MIN);
        let hi = Transition::new(state, symbol, StateId::MAX);
        self.by_source.range(lo..=hi)
    }

    /// The unique transition `(state, symbol, _)`, if any. Intended for
    /// deterministic stores where at most one such transition can exist.
    pub fn deterministic_lookup(&self, state: StateId, symbol: SymbolId) -> Option<Transition> {
        self.from_state_symbol(state, symbol).next().copied()
    }

    /// The transitions whose `to == state`, in `(symbol, from)` order.
    pub fn into_state(&self, state: StateId) -> impl Iterator<Item = Transition> + '_ {
        let lo = ByTarget(Transition::new(StateId::MIN, SymbolId::MIN, state));
        let hi = ByTarget(Transition::new(StateId::MAX, SymbolId::MAX, state));
        self.by_target.range(lo..=hi).map(|bt| bt.0)
    }
}

/// A zero-copy, binary-search-backed view over the transitions of a single
/// source state within a sorted transition array (the representation used by
/// [`crate::mfa::Mfa`]).
#[derive(Debug, Clone, Copy)]
pub struct StateView<'a> {
    state: StateId,
    slice: &'a [Transition],
}

impl<'a> StateView<'a> {
    /// Computes the view for `state` within `sorted`, a slice sorted in
    /// default `(from, symbol, to)` order.
    #[must_use]
    pub fn new(state: StateId, sorted: &'a [Transition]) -> Self {
        let lo = sorted.partition_point(|t| t.from < state);
        let hi = sorted.partition_point(|t| t.from <= state);
        Self {
            state,
            slice: &sorted[lo..hi],
        }
    }

    /// The state this view was computed for.
    #[must_use]
    pub fn state(&self) -> StateId {
        self.state
    }

    /// All transitions out of this state, in symbol order.
    #[must_use]
    pub fn transitions(&self) -> &'a [Transition] {
        self.slice
    }

    /// The destination state for `symbol`, via binary search, or `None`.
    #[must_use]
    pub fn transition(&self, symbol: SymbolId) -> Option<StateId> {
        self.slice
            .binary_search_by(|t| t.symbol.cmp(&symbol))
            .ok()
            .map(|idx| self.slice[idx].to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_state_range_query() {
        let mut store = TransitionStore::new();
        store.insert(Transition::new(0, 0, 1));
        store.insert(Transition::new(0, 1, 2));
        store.insert(Transition::new(1, 0, 2));
        let from0: Vec<_> = store.from_state(0).copied().collect();
        assert_eq!(
            from0,
            vec![Transition::new(0, 0, 1), Transition::new(0, 1, 2)]
        );
    }

    #[test]
    fn into_state_range_query() {
        let mut store = TransitionStore::new();
        store.insert(Transition::new(0, 0, 2));
        store.insert(Transition::new(1, 0, 2));
        store.insert(Transition::new(0, 0, 1));
        let mut into2: Vec<_> = store.into_state(2).collect();
        into2.sort();
        let mut expected = vec![Transition::new(0, 0, 2), Transition::new(1, 0, 2)];
        expected.sort();
        assert_eq!(into2, expected);
    }

    #[test]
    fn deterministic_lookup_finds_unique_transition() {
        let mut store = TransitionStore::new();
        store.insert(Transition::new(0, 3, 9));
        assert_eq!(
            store.deterministic_lookup(0, 3),
            Some(Transition::new(0, 3, 9))
        );
        assert_eq!(store.deterministic_lookup(0, 4), None);
    }

    #[test]
    fn state_view_binary_searches_within_slice() {
        let sorted = vec![
            Transition::new(0, 0, 1),
            Transition::new(0, 2, 3),
            Transition::new(1, 1, 2),
        ];
        let view = StateView::new(0, &sorted);
        assert_eq!(view.transitions().len(), 2);
        assert_eq!(view.transition(2), Some(3));
        assert_eq!(view.transition(1), None);

        let view1 = StateView::new(1, &sorted);
        assert_eq!(view1.transitions().len(), 1);
        assert_eq!(view1.transition(1), Some(2));
    }
}
