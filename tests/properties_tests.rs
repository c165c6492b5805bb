use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use alang_fsa::{compile, ops, parse, Dfa, Mfa, MutableAlphabet, Nfa, Transition, INVALID_STATE};

fn compile_pattern(pattern: &str) -> Mfa {
    let alphabet = Rc::new(RefCell::new(MutableAlphabet::new()));
    compile(&parse(pattern).unwrap(), alphabet)
}

#[test]
fn minimize_is_idempotent() {
    let alphabet = Rc::new(RefCell::new(MutableAlphabet::new()));
    let a = alphabet.borrow_mut().get_or_add("a");
    let mut dfa = Dfa::new(Rc::clone(&alphabet));
    // Two parallel redundant chains accepting exactly "a".
    dfa.set_initial_state(0).unwrap();
    dfa.add(Transition::new(0, a, 1)).unwrap();
    dfa.set_final(1, true).unwrap();
    dfa.add(Transition::new(0, a, 1)).unwrap(); // no-op, determinism invariant

    let once = ops::minimize(&dfa);
    let twice = ops::minimize(&once);
    let mfa_once = Mfa::from_minimized_dfa(&once, &*alphabet.borrow());
    let mfa_twice = Mfa::from_minimized_dfa(&twice, &*alphabet.borrow());
    assert!(mfa_once.language_eq(&mfa_twice));
}

#[test]
fn determinize_collapses_nondeterminism_and_preserves_language() {
    let alphabet = Rc::new(RefCell::new(MutableAlphabet::new()));
    let a = alphabet.borrow_mut().get_or_add("a");
    let mut nfa = Nfa::new(Rc::clone(&alphabet));
    nfa.set_initial(0, true).unwrap();
    nfa.add_transition(Transition::new(0, a, 1)).unwrap();
    nfa.add_transition(Transition::new(0, a, 2)).unwrap();
    nfa.set_final(1, true).unwrap();
    nfa.set_final(2, true).unwrap();

    let dfa = ops::determinize(&nfa);
    assert!(dfa.accepts(["a"]));
    assert!(!dfa.accepts(Vec::<&str>::new()));

    let mut seen = HashSet::new();
    for t in dfa.sorted_transitions() {
        assert!(seen.insert((t.from, t.symbol)), "DFA has two transitions for the same (state, symbol)");
    }
}

#[test]
fn union_is_commutative() {
    assert!(compile_pattern("a|b").language_eq(&compile_pattern("b|a")));
}

#[test]
fn intersection_is_commutative() {
    let left = compile_pattern("(a|b)* & a*");
    let right = compile_pattern("a* & (a|b)*");
    assert!(left.language_eq(&right));
}

#[test]
fn complement_is_involutive() {
    assert!(compile_pattern("a~~").language_eq(&compile_pattern("a")));
}

#[test]
fn difference_matches_intersection_with_complement() {
    let via_difference = compile_pattern("a* - a");
    let via_intersection = compile_pattern("a* & a~");
    assert!(via_difference.language_eq(&via_intersection));
}

#[test]
fn kleene_star_is_idempotent() {
    assert!(compile_pattern("a**").language_eq(&compile_pattern("a*")));
}

#[test]
fn kleene_plus_is_concatenation_with_star() {
    assert!(compile_pattern("a+").language_eq(&compile_pattern("a a*")));
}

#[test]
fn option_is_union_with_the_empty_string_language() {
    let alphabet = Rc::new(RefCell::new(MutableAlphabet::new()));
    let a_mfa = compile(&parse("a").unwrap(), Rc::clone(&alphabet));

    let mut epsilon_dfa = Dfa::new(Rc::clone(&alphabet));
    epsilon_dfa.set_initial_state(0).unwrap();
    epsilon_dfa.set_final(0, true).unwrap();
    let epsilon_mfa = Mfa::from_minimized_dfa(&epsilon_dfa, &*alphabet.borrow());

    let union_mfa = ops::union(&a_mfa, &epsilon_mfa, Rc::clone(&alphabet));
    let option_mfa = compile(&parse("a?").unwrap(), Rc::clone(&alphabet));
    assert!(option_mfa.language_eq(&union_mfa));
}

#[test]
fn determinism_invariant_holds_across_a_compiled_mfa() {
    let mfa = compile_pattern("(a|b)* a b c");
    let mut seen = HashSet::new();
    for t in mfa.transitions() {
        assert!(seen.insert((t.from, t.symbol)));
    }
}

#[test]
fn canonical_numbering_starts_at_zero_or_is_invalid_for_the_empty_language() {
    assert_eq!(compile_pattern("a|b").initial_state(), 0);
    assert_eq!(compile_pattern("()").initial_state(), INVALID_STATE);
}
