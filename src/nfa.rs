//! Mutable nondeterministic finite automaton: epsilon closures and reachability.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::alphabet::MutableAlphabet;
use crate::errors::ContractViolation;
use crate::sentinel::{StateId, SymbolId};
use crate::store::TransitionStore;
use crate::transition::{EpsilonTransition, Transition};

/// A mutable nondeterministic finite automaton.
///
/// Owns a shared, append-only [`MutableAlphabet`] (see §5: automata may share
/// an alphabet; mutating it only appends, so sharing stays sound), a set of
/// symbolic transitions, a set of epsilon transitions, a set of initial
/// states, a set of final states, and an upper bound on the states in use.
#[derive(Debug, Clone)]
pub struct Nfa {
    alphabet: Rc<RefCell<MutableAlphabet>>,
    transitions: TransitionStore,
    epsilons: BTreeSet<EpsilonTransition>,
    initial: BTreeSet<StateId>,
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

fn check_symbol(symbol: SymbolId) -> Result<(), ContractViolation> {
    if symbol < 0 {
        Err(ContractViolation::NegativeSymbol(symbol))
    } else {
        Ok(())
    }
}

impl Nfa {
    /// Creates an empty NFA over `alphabet`.
    #[must_use]
    pub fn new(alphabet: Rc<RefCell<MutableAlphabet>>) -> Self {
        Self {
            alphabet,
            transitions: TransitionStore::new(),
            epsilons: BTreeSet::new(),
            initial: BTreeSet::new(),
            finals: BTreeSet::new(),
            max_state: -1,
        }
    }

    /// The alphabet this NFA's transitions are indexed against.
    #[must_use]
    pub fn alphabet(&self) -> &Rc<RefCell<MutableAlphabet>> {
        &self.alphabet
    }

    /// The current upper bound on allocated states. `max_state() + 1` is
    /// always an unused state number.
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

    /// Inserts `t`, validating that both endpoints and the symbol are
    /// non-negative.
    pub fn add_transition(&mut self, t: Transition) -> Result<(), ContractViolation> {
        check_state(t.from)?;
        check_state(t.to)?;
        check_symbol(t.symbol)?;
        self.add_transition_unchecked(t);
        Ok(())
    }

    /// Inserts `t` without validation. Used internally by algorithms that
    /// only ever construct states through [`Nfa::new_state`].
    pub(crate) fn add_transition_unchecked(&mut self, t: Transition) {
        self.touch(t.from);
        self.touch(t.to);
        self.transitions.insert(t);
    }

    /// Inserts `e`, validating that both endpoints are non-negative.
    pub fn add_epsilon(&mut self, e: EpsilonTransition) -> Result<(), ContractViolation> {
        check_state(e.from)?;
        check_state(e.to)?;
        self.add_epsilon_unchecked(e);
        Ok(())
    }

    pub(crate) fn add_epsilon_unchecked(&mut self, e: EpsilonTransition) {
        self.touch(e.from);
        self.touch(e.to);
        self.epsilons.insert(e);
    }

    /// Marks or unmarks `state` as an initial state.
    pub fn set_initial(&mut self, state: StateId, is_initial: bool) -> Result<(), ContractViolation> {
        check_state(state)?;
        self.set_initial_unchecked(state, is_initial);
        Ok(())
    }

    pub(crate) fn set_initial_unchecked(&mut self, state: StateId, is_initial: bool) {
        self.touch(state);
        if is_initial {
            self.initial.insert(state);
        } else {
            self.initial.remove(&state);
        }
    }

    /// Marks or unmarks `state` as a final state.
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

    /// The initial states.
    #[must_use]
    pub fn initial_states(&self) -> &BTreeSet<StateId> {
        &self.initial
    }

    /// The final states.
    #[must_use]
    pub fn final_states(&self) -> &BTreeSet<StateId> {
        &self.finals
    }

    /// Builds a chain accepting exactly the sequence `seq` of symbol indices:
    /// allocates a fresh initial state, walks `seq` allocating one fresh
    /// state per symbol, and marks the chain's last state final.
    pub fn union_with_sequence(&mut self, seq: &[SymbolId]) {
        let start = self.new_state();
        self.initial.insert(start);
        let mut current = start;
        for &symbol in seq {
            let next = self.new_state();
            self.add_transition_unchecked(Transition::new(current, symbol, next));
            current = next;
        }
        self.finals.insert(current);
    }

    /// Transitions leaving `state`, in symbol order.
    pub fn transitions_from(&self, state: StateId) -> impl Iterator<Item = &Transition> {
        self.transitions.from_state(state)
    }

    /// Transitions leaving `state` on `symbol`.
    pub fn transitions_from_symbol(
        &self,
        state: StateId,
        symbol: SymbolId,
    ) -> impl Iterator<Item = &Transition> {
        self.transitions.from_state_symbol(state, symbol)
    }

    /// The set of `toState`s reachable directly from `state` on `symbol`.
    #[must_use]
    pub fn reachable_on_symbol(&self, state: StateId, symbol: SymbolId) -> BTreeSet<StateId> {
        self.transitions_from_symbol(state, symbol)
            .map(|t| t.to)
            .collect()
    }

    /// The states reachable from `state` via a single epsilon transition.
    #[must_use]
    pub fn epsilon_reach(&self, state: StateId) -> BTreeSet<StateId> {
        let lo = EpsilonTransition::new(state, StateId::MIN);
        let hi = EpsilonTransition::new(state, StateId::MAX);
        self.epsilons.range(lo..=hi).map(|e| e.to).collect()
    }

    /// Expands `states` in place to its epsilon closure, via a worklist. A
    /// state with a self-loop on epsilon remains included.
    pub fn epsilon_closure_in_place(&self, states: &mut BTreeSet<StateId>) {
        let mut worklist: Vec<StateId> = states.iter().copied().collect();
        while let Some(state) = worklist.pop() {
            for next in self.epsilon_reach(state) {
                if states.insert(next) {
                    worklist.push(next);
                }
            }
        }
    }

    /// Epsilon-closes `from_states`, steps on `symbol`, then epsilon-closes
    /// the result.
    #[must_use]
    pub fn reachable(&self, from_states: &BTreeSet<StateId>, symbol: SymbolId) -> BTreeSet<StateId> {
        let mut closure = from_states.clone();
        self.epsilon_closure_in_place(&mut closure);
        let mut stepped: BTreeSet<StateId> = BTreeSet::new();
        for state in &closure {
            stepped.extend(self.reachable_on_symbol(*state, symbol));
        }
        self.epsilon_closure_in_place(&mut stepped);
        stepped
    }

    /// The union of symbols on outgoing symbolic transitions from any state
    /// in `from_states`.
    #[must_use]
    pub fn available_symbols(&self, from_states: &BTreeSet<StateId>) -> BTreeSet<SymbolId> {
        from_states
            .iter()
            .flat_map(|s| self.transitions_from(*s).map(|t| t.symbol))
            .collect()
    }

    /// Whether any initial state reaches a final state under epsilon closure.
    #[must_use]
    pub fn accepts_epsilon(&self) -> bool {
        let mut closure = self.initial.clone();
        self.epsilon_closure_in_place(&mut closure);
        closure.iter().any(|s| self.finals.contains(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> Nfa {
        Nfa::new(Rc::new(RefCell::new(MutableAlphabet::new())))
    }

    #[test]
    fn new_state_allocates_contiguously() {
        let mut nfa = fresh();
        assert_eq!(nfa.new_state(), 0);
        assert_eq!(nfa.new_state(), 1);
        assert_eq!(nfa.max_state(), 1);
    }

    #[test]
    fn add_transition_rejects_negative_states() {
        let mut nfa = fresh();
        assert_eq!(
            nfa.add_transition(Transition::new(-1, 0, 1)),
            Err(ContractViolation::NegativeState(-1))
        );
    }

    #[test]
    fn epsilon_closure_follows_chain_and_self_loop() {
        let mut nfa = fresh();
        nfa.add_epsilon_unchecked(EpsilonTransition::new(0, 1));
        nfa.add_epsilon_unchecked(EpsilonTransition::new(1, 2));
        nfa.add_epsilon_unchecked(EpsilonTransition::new(2, 2));
        let mut set: BTreeSet<StateId> = [0].into_iter().collect();
        nfa.epsilon_closure_in_place(&mut set);
        assert_eq!(set, [0, 1, 2].into_iter().collect());
    }

    #[test]
    fn accepts_epsilon_true_iff_initial_reaches_final_via_eps() {
        let mut nfa = fresh();
        nfa.set_initial(0, true).unwrap();
        nfa.add_epsilon_unchecked(EpsilonTransition::new(0, 1));
        assert!(!nfa.accepts_epsilon());
        nfa.set_final(1, true).unwrap();
        assert!(nfa.accepts_epsilon());
    }

    #[test]
    fn reachable_closes_before_and_after_the_step() {
        let mut nfa = fresh();
        // 0 --eps--> 1 --'a'--> 2 --eps--> 3
        nfa.add_epsilon_unchecked(EpsilonTransition::new(0, 1));
        nfa.add_transition_unchecked(Transition::new(1, 0, 2));
        nfa.add_epsilon_unchecked(EpsilonTransition::new(2, 3));
        let from: BTreeSet<StateId> = [0].into_iter().collect();
        let result = nfa.reachable(&from, 0);
        assert_eq!(result, [2, 3].into_iter().collect());
    }

    #[test]
    fn union_with_sequence_builds_a_chain() {
        let mut nfa = fresh();
        nfa.union_with_sequence(&[0, 1]);
        assert_eq!(nfa.initial_states().len(), 1);
        assert_eq!(nfa.final_states().len(), 1);
        let start = *nfa.initial_states().iter().next().unwrap();
        let mid = nfa.reachable_on_symbol(start, 0);
        assert_eq!(mid.len(), 1);
        let end = nfa.reachable_on_symbol(*mid.iter().next().unwrap(), 1);
        assert_eq!(end, *nfa.final_states());
    }
}
