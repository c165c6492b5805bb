//! Value types for symbolic and epsilon transitions, and their total orderings.

use std::cmp::Ordering;

use crate::sentinel::{StateId, SymbolId, INVALID_STATE, INVALID_SYMBOL};

/// A symbolic transition `(from, symbol, to)`.
///
/// The default ordering is lexicographic on `(from, symbol, to)`; see
/// [`Transition::by_target`] for the secondary `(to, symbol, from)` ordering
/// used to answer "who reaches this state" queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    /// The source state.
    pub from: StateId,
    /// The symbol consumed.
    pub symbol: SymbolId,
    /// The destination state.
    pub to: StateId,
}

impl Transition {
    /// Creates a new transition.
    #[must_use]
    pub fn new(from: StateId, symbol: SymbolId, to: StateId) -> Self {
        Self { from, symbol, to }
    }

    /// The sentinel invalid transition `(-1, -1, -1)`, used only as a marker
    /// return value, never stored in a transition set.
    pub const INVALID: Transition = Transition {
        from: INVALID_STATE,
        symbol: INVALID_SYMBOL,
        to: INVALID_STATE,
    };

    /// Wraps this transition in the `(to, symbol, from)` ordering.
    #[must_use]
    pub fn by_target(self) -> ByTarget {
        ByTarget(self)
    }
}

impl PartialOrd for Transition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Transition {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.from, self.symbol, self.to).cmp(&(other.from, other.symbol, other.to))
    }
}

/// A [`Transition`] ordered by `(to, symbol, from)` instead of the default
/// `(from, symbol, to)`. Used by the dual-ordered mutable transition store to
/// answer predecessor queries without a linear scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByTarget(pub Transition);

impl PartialOrd for ByTarget {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByTarget {
    fn cmp(&self, other: &Self) -> Ordering {
        let a = self.0;
        let b = other.0;
        (a.to, a.symbol, a.from).cmp(&(b.to, b.symbol, b.from))
    }
}

/// An epsilon transition `(from, to)`, ordered lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EpsilonTransition {
    /// The source state.
    pub from: StateId,
    /// The destination state.
    pub to: StateId,
}

impl EpsilonTransition {
    /// Creates a new epsilon transition.
    #[must_use]
    pub fn new(from: StateId, to: StateId) -> Self {
        Self { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order_is_lexicographic() {
        let a = Transition::new(0, 5, 1);
        let b = Transition::new(0, 5, 2);
        let c = Transition::new(1, 0, 0);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn by_target_order_groups_on_destination() {
        let a = Transition::new(5, 1, 0).by_target();
        let b = Transition::new(2, 9, 0).by_target();
        let c = Transition::new(0, 0, 1).by_target();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn invalid_transition_is_all_sentinels() {
        assert_eq!(Transition::INVALID.from, INVALID_STATE);
        assert_eq!(Transition::INVALID.symbol, INVALID_SYMBOL);
        assert_eq!(Transition::INVALID.to, INVALID_STATE);
    }
}
