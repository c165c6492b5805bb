//! Product construction: intersection of deterministic automata.
//!
//! Difference is deliberately not implemented as a separate asymmetric
//! product here. An in-place asymmetric-finality product over two possibly
//! partial DFAs is only correct if the right-hand operand is total (every
//! state has an outgoing transition for every symbol) — otherwise a missing
//! transition would have to be treated as an eternal non-accepting path, not
//! skipped. [`crate::ops::complement::complement`] already builds exactly
//! that total form, so the compiler computes difference as the testable
//! identity `A - B == A & !B` (§8) instead of duplicating that logic here.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::alphabet::{AlphabetView, MutableAlphabet};
use crate::dfa::Dfa;
use crate::sentinel::{StateId, INVALID_STATE, INVALID_SYMBOL};
use crate::transition::Transition;

fn pack(a: StateId, b: StateId) -> i64 {
    ((a as i64) << 32) | (b as i64 & 0xffff_ffff)
}

/// Pairs the states of `a` and `b` by a work queue: `(qA, qB)` is final iff
/// both sides are final. A symbol is translated by string from `a`'s
/// alphabet into `b`'s; if `b` has no matching symbol, or no transition on
/// it, that path is dropped (the pair it would have reached is simply never
/// visited). Returns the product DFA together with the fresh alphabet its
/// transitions are indexed against.
#[must_use]
pub fn intersect(
    a: &Dfa,
    alphabet_a: &dyn AlphabetView,
    b: &Dfa,
    alphabet_b: &dyn AlphabetView,
) -> (Dfa, Rc<RefCell<MutableAlphabet>>) {
    let out_alphabet = Rc::new(RefCell::new(MutableAlphabet::new()));
    {
        let mut out = out_alphabet.borrow_mut();
        out.add_all(alphabet_a.symbols());
        out.add_all(alphabet_b.symbols());
    }
    let mut out_dfa = Dfa::new(Rc::clone(&out_alphabet));

    if a.initial_state() == INVALID_STATE || b.initial_state() == INVALID_STATE {
        return (out_dfa, out_alphabet);
    }

    let mut pair_ids: IndexMap<i64, StateId> = IndexMap::new();
    let mut queue: VecDeque<(StateId, StateId)> = VecDeque::new();

    let start = (a.initial_state(), b.initial_state());
    let start_id = out_dfa.new_state();
    pair_ids.insert(pack(start.0, start.1), start_id);
    out_dfa.set_initial_state_unchecked(start_id);
    if a.is_final(start.0) && b.is_final(start.1) {
        out_dfa.set_final_unchecked(start_id, true);
    }
    queue.push_back(start);

    while let Some((qa, qb)) = queue.pop_front() {
        let from_id = pair_ids[&pack(qa, qb)];
        for t in a.transitions_from(qa) {
            let symbol_str = alphabet_a
                .symbol_at(t.symbol)
                .expect("transition symbol is within its own alphabet");
            let b_symbol = alphabet_b.index_of(symbol_str);
            if b_symbol == INVALID_SYMBOL {
                continue;
            }
            let qb_next = b.transition(qb, b_symbol);
            if qb_next == INVALID_STATE {
                continue;
            }
            let qa_next = t.to;
            let key = pack(qa_next, qb_next);
            let to_id = if let Some(&id) = pair_ids.get(&key) {
                id
            } else {
                let id = out_dfa.new_state();
                pair_ids.insert(key, id);
                if a.is_final(qa_next) && b.is_final(qb_next) {
                    out_dfa.set_final_unchecked(id, true);
                }
                queue.push_back((qa_next, qb_next));
                id
            };
            let out_symbol = out_alphabet.borrow_mut().get_or_add(symbol_str);
            out_dfa.add_unchecked(Transition::new(from_id, out_symbol, to_id));
        }
    }

    (out_dfa, out_alphabet)
}
