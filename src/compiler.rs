//! Structural recursion compiling an [`Expr`] into a canonical [`Mfa`].
//!
//! Each case compiles its children, coerces them to whichever representation
//! the closure operation expects, applies the operation, then canonicalizes
//! back to an [`Mfa`] (§4.8). Intersection, difference, and complement need a
//! DFA view of an already-compiled `Mfa`; [`mfa_to_dfa`] rebuilds one against
//! the compiler's shared alphabet rather than the `Mfa`'s own frozen one.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::alang::Expr;
use crate::alphabet::{AlphabetView, CanonicalAlphabet, MutableAlphabet};
use crate::dfa::Dfa;
use crate::mfa::Mfa;
use crate::ops;
use crate::transition::Transition;

/// Compiles `expr` into its canonical minimal automaton, interning any new
/// symbols into `alphabet` along the way.
#[must_use]
pub fn compile(expr: &Expr, alphabet: Rc<RefCell<MutableAlphabet>>) -> Mfa {
    match expr {
        Expr::Symbol(s) => compile_symbol(s, &alphabet),
        Expr::Wildcard => compile_wildcard(&alphabet),
        Expr::EmptyLang => Mfa::empty(Arc::new(CanonicalAlphabet::from_view(&*alphabet.borrow()))),
        Expr::Union(l, r) => {
            let ml = compile(l, Rc::clone(&alphabet));
            let mr = compile(r, Rc::clone(&alphabet));
            ops::union(&ml, &mr, alphabet)
        }
        Expr::Concatenation(l, r) => {
            let ml = compile(l, Rc::clone(&alphabet));
            let mr = compile(r, Rc::clone(&alphabet));
            ops::concatenation(&ml, &mr, alphabet)
        }
        Expr::Option(x) => {
            let mx = compile(x, Rc::clone(&alphabet));
            ops::option(&mx, alphabet)
        }
        Expr::KleeneStar(x) => {
            let mx = compile(x, Rc::clone(&alphabet));
            ops::kleene_star(&mx, alphabet)
        }
        Expr::KleenePlus(x) => {
            let mx = compile(x, Rc::clone(&alphabet));
            ops::kleene_plus(&mx, alphabet)
        }
        Expr::Intersection(l, r) => {
            let ml = compile(l, Rc::clone(&alphabet));
            let mr = compile(r, Rc::clone(&alphabet));
            let dl = mfa_to_dfa(&ml, Rc::clone(&alphabet));
            let dr = mfa_to_dfa(&mr, Rc::clone(&alphabet));
            let view = alphabet.borrow();
            let (product, out_alphabet) = ops::intersect(&dl, &*view, &dr, &*view);
            drop(view);
            let minimal = ops::minimize(&product);
            Mfa::from_minimized_dfa(&minimal, &*out_alphabet.borrow())
        }
        Expr::Difference(l, r) => {
            // A - B ≡ A & !B (§8): no separate asymmetric product, see
            // `ops::product`'s doc comment for why that would be unsound.
            let ml = compile(l, Rc::clone(&alphabet));
            let mr = compile(r, Rc::clone(&alphabet));
            let dl = mfa_to_dfa(&ml, Rc::clone(&alphabet));
            let dr = mfa_to_dfa(&mr, Rc::clone(&alphabet));
            let not_dr = ops::complement(&dr);
            let view = alphabet.borrow();
            let (product, out_alphabet) = ops::intersect(&dl, &*view, &not_dr, &*view);
            drop(view);
            let minimal = ops::minimize(&product);
            Mfa::from_minimized_dfa(&minimal, &*out_alphabet.borrow())
        }
        Expr::Complement(x) => {
            let mx = compile(x, Rc::clone(&alphabet));
            let dx = mfa_to_dfa(&mx, Rc::clone(&alphabet));
            let complemented = ops::complement(&dx);
            let minimal = ops::minimize(&complemented);
            Mfa::from_minimized_dfa(&minimal, &*alphabet.borrow())
        }
    }
}

fn compile_symbol(s: &str, alphabet: &Rc<RefCell<MutableAlphabet>>) -> Mfa {
    let idx = alphabet.borrow_mut().get_or_add(s);
    let mut dfa = Dfa::new(Rc::clone(alphabet));
    let start = dfa.new_state();
    let end = dfa.new_state();
    dfa.set_initial_state_unchecked(start);
    dfa.add_unchecked(Transition::new(start, idx, end));
    dfa.set_final_unchecked(end, true);
    Mfa::from_minimized_dfa(&dfa, &*alphabet.borrow())
}

/// One transition per symbol currently interned in `alphabet` — the wildcard
/// resolves against the alphabet fixed at compile time; symbols added later
/// are not retroactively matched (§9 open question).
fn compile_wildcard(alphabet: &Rc<RefCell<MutableAlphabet>>) -> Mfa {
    let mut dfa = Dfa::new(Rc::clone(alphabet));
    let start = dfa.new_state();
    let end = dfa.new_state();
    dfa.set_initial_state_unchecked(start);
    let size = alphabet.borrow().size();
    for symbol in 0..size as i32 {
        dfa.add_unchecked(Transition::new(start, symbol, end));
    }
    dfa.set_final_unchecked(end, true);
    // Minimize rather than assume-minimal: with an empty alphabet, `end` is
    // unreachable and must be trimmed away before canonicalizing.
    let minimal = ops::minimize(&dfa);
    Mfa::from_minimized_dfa(&minimal, &*alphabet.borrow())
}

/// Rebuilds `mfa` as a mutable [`Dfa`] sharing `alphabet`, translating each
/// transition's symbol by string so it lines up with the compiler's alphabet
/// rather than `mfa`'s own frozen [`CanonicalAlphabet`]. State numbers are
/// kept as-is; an `Mfa`'s own numbering is already a contiguous `[0,
/// state_count)` range.
fn mfa_to_dfa(mfa: &Mfa, alphabet: Rc<RefCell<MutableAlphabet>>) -> Dfa {
    let mut dfa = Dfa::new(Rc::clone(&alphabet));
    for _ in 0..mfa.state_count() {
        dfa.new_state();
    }
    if mfa.state_count() == 0 {
        return dfa;
    }
    dfa.set_initial_state_unchecked(0);
    for t in mfa.transitions() {
        let symbol_str = mfa
            .alphabet()
            .symbol_at(t.symbol)
            .expect("mfa transition symbol is within its own alphabet");
        let symbol = alphabet.borrow_mut().get_or_add(symbol_str);
        dfa.add_unchecked(Transition::new(t.from, symbol, t.to));
    }
    for &f in mfa.final_states() {
        dfa.set_final_unchecked(f, true);
    }
    dfa
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alang::parse;

    fn compile_str(pattern: &str) -> Mfa {
        let alphabet = Rc::new(RefCell::new(MutableAlphabet::new()));
        let expr = parse(pattern).unwrap();
        compile(&expr, alphabet)
    }

    #[test]
    fn empty_lang_accepts_nothing_not_even_epsilon() {
        let mfa = compile_str("()");
        assert!(!mfa.accepts(Vec::<&str>::new()));
    }

    #[test]
    fn seed_scenario_two() {
        let mfa = compile_str("a b b c b");
        assert!(mfa.accepts(["a", "b", "b", "c", "b"]));
        assert!(!mfa.accepts(["a", "b", "a", "a", "b"]));
    }

    #[test]
    fn seed_scenario_three() {
        let mfa = compile_str("(a? (b | c))+");
        assert!(mfa.accepts(["a", "b", "b", "c", "b"]));
        assert!(!mfa.accepts(["a", "b", "a", "a", "b"]));
    }

    #[test]
    fn seed_scenario_five() {
        let mfa = compile_str("a*");
        assert!(mfa.accepts(Vec::<&str>::new()));
        assert!(mfa.accepts(["a", "a", "a"]));
    }

    #[test]
    fn difference_matches_intersection_with_complement() {
        let alphabet = Rc::new(RefCell::new(MutableAlphabet::new()));
        let diff = compile(&parse("a* - a").unwrap(), Rc::clone(&alphabet));
        assert!(diff.accepts(Vec::<&str>::new()));
        assert!(!diff.accepts(["a"]));
        assert!(diff.accepts(["a", "a"]));
    }

    #[test]
    fn wildcard_resolves_against_compile_time_alphabet_only() {
        let alphabet = Rc::new(RefCell::new(MutableAlphabet::new()));
        alphabet.borrow_mut().get_or_add("a");
        alphabet.borrow_mut().get_or_add("b");
        let wildcard = compile(&parse(".").unwrap(), Rc::clone(&alphabet));
        assert!(wildcard.accepts(["a"]));
        assert!(wildcard.accepts(["b"]));
        alphabet.borrow_mut().get_or_add("c");
        assert!(!wildcard.accepts(["c"]));
    }

    #[test]
    fn complement_is_total_over_its_own_alphabet() {
        let mfa = compile_str("a~");
        assert!(mfa.accepts(Vec::<&str>::new()));
        assert!(!mfa.accepts(["a"]));
        assert!(mfa.accepts(["a", "a"]));
    }
}
