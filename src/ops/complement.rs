//! Totalize-then-flip complement construction.

use std::rc::Rc;

use crate::dfa::Dfa;
use crate::sentinel::{SymbolId, INVALID_STATE};
use crate::transition::Transition;

/// Totalizes `dfa` against its own alphabet (adding a self-looping sink for
/// every missing `(state, symbol)` pair) and flips final/non-final. The
/// result's language is the complement of `dfa`'s over `dfa`'s own alphabet;
/// to complement against a wider alphabet, grow that alphabet on `dfa` first.
#[must_use]
pub fn complement(dfa: &Dfa) -> Dfa {
    let alphabet_size = dfa.alphabet().borrow().size() as SymbolId;
    let mut result = Dfa::new(Rc::clone(dfa.alphabet()));

    for t in dfa.sorted_transitions() {
        result.add_unchecked(t);
    }

    let universe_end = dfa.max_state();
    let sink = universe_end + 1;

    let initial = if dfa.initial_state() == INVALID_STATE {
        sink
    } else {
        dfa.initial_state()
    };
    result.set_initial_state_unchecked(initial);

    for state in 0..=universe_end {
        for symbol in 0..alphabet_size {
            if result.transition(state, symbol) == INVALID_STATE {
                result.add_unchecked(Transition::new(state, symbol, sink));
            }
        }
    }
    for symbol in 0..alphabet_size {
        result.add_unchecked(Transition::new(sink, symbol, sink));
    }

    // Flip finality over every state in the totalized automaton, including
    // the sink: it is never final in `dfa` (it didn't exist there), so the
    // flip alone makes it final whenever that matters (e.g. complementing
    // the empty language).
    for state in 0..=sink {
        result.set_final_unchecked(state, !dfa.is_final(state));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::MutableAlphabet;
    use std::cell::RefCell;

    #[test]
    fn complement_of_empty_language_accepts_everything() {
        let alphabet = Rc::new(RefCell::new(MutableAlphabet::new()));
        alphabet.borrow_mut().get_or_add("a");
        let dfa = Dfa::new(Rc::clone(&alphabet));
        let complemented = complement(&dfa);
        assert!(complemented.accepts(Vec::<&str>::new()));
        assert!(complemented.accepts(["a"]));
        assert!(complemented.accepts(["a", "a"]));
    }

    #[test]
    fn complement_flips_acceptance_over_the_shared_alphabet() {
        let alphabet = Rc::new(RefCell::new(MutableAlphabet::new()));
        let a = alphabet.borrow_mut().get_or_add("a");
        let mut dfa = Dfa::new(Rc::clone(&alphabet));
        dfa.set_initial_state(0).unwrap();
        dfa.add(Transition::new(0, a, 1)).unwrap();
        dfa.set_final(1, true).unwrap();

        let complemented = complement(&dfa);
        assert!(complemented.accepts(Vec::<&str>::new())); // dfa rejects empty, complement accepts
        assert!(!complemented.accepts(["a"])); // dfa accepts "a", complement rejects
        assert!(complemented.accepts(["a", "a"])); // dfa rejects, complement accepts
    }

    #[test]
    fn complement_is_involutive() {
        let alphabet = Rc::new(RefCell::new(MutableAlphabet::new()));
        let a = alphabet.borrow_mut().get_or_add("a");
        let mut dfa = Dfa::new(Rc::clone(&alphabet));
        dfa.set_initial_state(0).unwrap();
        dfa.add(Transition::new(0, a, 1)).unwrap();
        dfa.set_final(1, true).unwrap();

        let twice = complement(&complement(&dfa));
        for input in [vec![], vec!["a"], vec!["a", "a"]] {
            assert_eq!(dfa.accepts(input.clone()), twice.accepts(input));
        }
    }
}
