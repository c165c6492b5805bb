//! The immutable, minimal, canonically-numbered automaton.

use std::collections::{HashMap, VecDeque};
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use crate::alphabet::{AlphabetView, CanonicalAlphabet};
use crate::dfa::Dfa;
use crate::sentinel::{StateId, SymbolId, INVALID_STATE};
use crate::store::StateView;
use crate::transition::Transition;

/// An immutable, minimal, canonically-numbered deterministic automaton.
///
/// Once constructed an `Mfa` is never mutated, which (together with
/// [`CanonicalAlphabet`] also being frozen) makes it safe to share across
/// threads via [`Arc`] — unlike [`crate::nfa::Nfa`]/[`Dfa`], which share
/// state through `Rc<RefCell<_>>` and are intentionally confined to a single
/// thread (§5).
#[derive(Debug, Clone)]
pub struct Mfa {
    alphabet: Arc<CanonicalAlphabet>,
    transitions: Box<[Transition]>,
    finals: Box<[StateId]>,
    state_count: usize,
}

impl Mfa {
    /// The empty-language MFA: zero states, zero transitions.
    #[must_use]
    pub fn empty(alphabet: Arc<CanonicalAlphabet>) -> Self {
        Self {
            alphabet,
            transitions: Box::new([]),
            finals: Box::new([]),
            state_count: 0,
        }
    }

    /// Canonicalizes `dfa` (assumed already minimal) into an `Mfa`, per the
    /// breadth-first renumbering of §4.6: BFS from the initial state,
    /// visiting outgoing transitions in lexicographic order of the *symbol
    /// string*, assigning canonical index `i` to the `i`-th state dequeued.
    ///
    /// `source_alphabet` resolves `dfa`'s symbol indices to strings; the
    /// returned `Mfa` is built against its own freshly sorted
    /// [`CanonicalAlphabet`] derived from the same symbol set.
    #[must_use]
    pub fn from_minimized_dfa(dfa: &Dfa, source_alphabet: &dyn AlphabetView) -> Self {
        let canonical = Arc::new(CanonicalAlphabet::from_view(source_alphabet));
        Self::canonicalize(dfa, source_alphabet, canonical)
    }

    /// As [`Mfa::from_minimized_dfa`], but reusing an already-built canonical
    /// alphabet instead of deriving a fresh one. Used when several MFAs must
    /// be compared or combined against one shared canonical alphabet.
    #[must_use]
    pub fn from_minimized_dfa_with_alphabet(
        dfa: &Dfa,
        source_alphabet: &dyn AlphabetView,
        canonical: Arc<CanonicalAlphabet>,
    ) -> Self {
        Self::canonicalize(dfa, source_alphabet, canonical)
    }

    fn canonicalize(
        dfa: &Dfa,
        source_alphabet: &dyn AlphabetView,
        canonical: Arc<CanonicalAlphabet>,
    ) -> Self {
        if dfa.final_states().is_empty() {
            return Self::empty(canonical);
        }
        let start = dfa.initial_state();
        if start == INVALID_STATE {
            return Self::empty(canonical);
        }

        let mut canon_id: HashMap<StateId, StateId> = HashMap::new();
        canon_id.insert(start, 0);
        let mut next_id: StateId = 1;
        let mut queue: VecDeque<StateId> = VecDeque::new();
        queue.push_back(start);
        let mut transitions: Vec<Transition> = Vec::new();

        while let Some(old_from) = queue.pop_front() {
            let new_from = canon_id[&old_from];
            let mut outgoing: Vec<&Transition> = dfa.transitions_from(old_from).collect();
            outgoing.sort_by(|a, b| {
                let sa = source_alphabet
                    .symbol_at(a.symbol)
                    .expect("transition symbol is within the source alphabet");
                let sb = source_alphabet
                    .symbol_at(b.symbol)
                    .expect("transition symbol is within the source alphabet");
                sa.cmp(sb)
            });
            for t in outgoing {
                let new_to = *canon_id.entry(t.to).or_insert_with(|| {
                    let id = next_id;
                    next_id += 1;
                    queue.push_back(t.to);
                    id
                });
                let symbol_str = source_alphabet
                    .symbol_at(t.symbol)
                    .expect("transition symbol is within the source alphabet");
                let new_symbol = canonical.index_of(symbol_str);
                transitions.push(Transition::new(new_from, new_symbol, new_to));
            }
        }
        transitions.sort();

        let mut finals: Vec<StateId> = dfa
            .final_states()
            .iter()
            .filter_map(|old| canon_id.get(old).copied())
            .collect();
        finals.sort_unstable();

        Self {
            alphabet: canonical,
            transitions: transitions.into_boxed_slice(),
            finals: finals.into_boxed_slice(),
            state_count: canon_id.len(),
        }
    }

    /// The canonical alphabet this MFA's transitions are indexed against.
    #[must_use]
    pub fn alphabet(&self) -> &Arc<CanonicalAlphabet> {
        &self.alphabet
    }

    /// Number of states, `[0, state_count)`.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// State `0` if non-empty, else [`crate::sentinel::INVALID_STATE`].
    #[must_use]
    pub fn initial_state(&self) -> StateId {
        if self.state_count == 0 {
            INVALID_STATE
        } else {
            0
        }
    }

    /// The final states, sorted ascending.
    #[must_use]
    pub fn final_states(&self) -> &[StateId] {
        &self.finals
    }

    /// Whether `state` is final.
    #[must_use]
    pub fn is_final(&self, state: StateId) -> bool {
        self.finals.binary_search(&state).is_ok()
    }

    /// All transitions, sorted in default `(from, symbol, to)` order.
    #[must_use]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// A zero-copy view over the transitions leaving `state`.
    #[must_use]
    pub fn state_view(&self, state: StateId) -> StateView<'_> {
        StateView::new(state, &self.transitions)
    }

    /// The unique destination for `(state, symbol)`, or
    /// [`crate::sentinel::INVALID_STATE`].
    #[must_use]
    pub fn transition(&self, state: StateId, symbol: SymbolId) -> StateId {
        self.state_view(state)
            .transition(symbol)
            .unwrap_or(INVALID_STATE)
    }

    /// Feeds `symbols` through the MFA starting at state `0`.
    pub fn accepts<'a, I>(&self, symbols: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut state = self.initial_state();
        if state == INVALID_STATE {
            return false;
        }
        for symbol in symbols {
            let idx = self.alphabet.index_of(symbol);
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

    /// Whether `self` and `other` accept the same language: their
    /// transition arrays and final-state arrays are pairwise equal, and for
    /// every symbol index mentioned, both alphabets yield the same symbol
    /// string. The two alphabets need not be equal as objects (§4.6).
    #[must_use]
    pub fn language_eq(&self, other: &Mfa) -> bool {
        if *self.finals != *other.finals {
            return false;
        }
        if self.transitions.len() != other.transitions.len() {
            return false;
        }
        self.transitions.iter().zip(other.transitions.iter()).all(|(a, b)| {
            a.from == b.from
                && a.to == b.to
                && a.symbol == b.symbol
                && self.alphabet.symbol_at(a.symbol) == other.alphabet.symbol_at(b.symbol)
        })
    }

    /// As [`Mfa::language_eq`], but additionally requiring the alphabets to
    /// be equal as objects (same contents, same order).
    #[must_use]
    pub fn strict_eq(&self, other: &Mfa) -> bool {
        self.language_eq(other) && self.alphabet == other.alphabet
    }
}

impl Display for Mfa {
    /// The canonical debug string form: `S#=<n>, F#=<n>[: [f0, f1, …]],
    /// T#=<n>[: [from→to sym, …]]`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "S#={}, F#={}", self.state_count, self.finals.len())?;
        if !self.finals.is_empty() {
            write!(f, ": [")?;
            for (i, s) in self.finals.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{s}")?;
            }
            write!(f, "]")?;
        }
        write!(f, ", T#={}", self.transitions.len())?;
        if !self.transitions.is_empty() {
            write!(f, ": [")?;
            for (i, t) in self.transitions.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                let symbol = self.alphabet.symbol_at(t.symbol).unwrap_or("?");
                write!(f, "{}\u{2192}{} {}", t.from, t.to, symbol)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
